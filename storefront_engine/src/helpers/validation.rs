//! Field checks shared by the API layer. Each returns a human-readable reason on failure, which the callers wrap in
//! their own `ValidationError` variant.

pub fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

pub fn require_positive(field: &str, value: i64) -> Result<(), String> {
    if value > 0 {
        Ok(())
    } else {
        Err(format!("{field} must be greater than zero"))
    }
}
