mod bearer;

pub use bearer::{extract_bearer_token, BearerAuth, BearerAuthService};
