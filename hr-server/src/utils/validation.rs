//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! redb stores JSON blobs and enforces no lengths itself, so every text
//! field is bounded here before it reaches the store.

use crate::core::error::{DomainError, DomainResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: employee first/last name, department, project
pub const MAX_NAME_LEN: usize = 200;

/// Job titles
pub const MAX_TITLE_LEN: usize = 200;

/// Free-text reasons and notes (salary change reason, etc.)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, locations
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(DomainError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> DomainResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(DomainError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal shape check; deliverability is not our problem.
pub fn validate_email(email: &str) -> DomainResult<()> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let trimmed = email.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(DomainError::Validation(format!("invalid email: {email}")));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(DomainError::Validation(format!("invalid email: {email}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_limits() {
        assert!(validate_required_text("ok", "name", 10).is_ok());
        assert!(validate_required_text("   ", "name", 10).is_err());
        assert!(validate_required_text(&"x".repeat(11), "name", 10).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@nodot").is_err());
    }
}
