mod password;
mod validation;

pub use password::{hash_password, verify_password, DEFAULT_HASH_COST, MAX_PASSWORD_LENGTH};
pub use validation::{require_positive, require_text};
