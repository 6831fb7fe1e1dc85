//! Input validation for vaultbind configuration.
//!
//! Validates variable names and required fields of bindings and credentials.

use crate::error::{ConfigError, Result};

/// Validate an environment variable name.
///
/// Variable names must be valid environment variable names:
/// - Only ASCII letters, digits, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ConfigError::InvalidVariable` if the name is invalid.
pub fn validate_variable(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::InvalidVariable {
            name: name.to_string(),
            reason: "cannot be empty".to_string(),
        }
        .into());
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidVariable {
            name: name.to_string(),
            reason: "cannot start with a digit".to_string(),
        }
        .into());
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ConfigError::InvalidVariable {
                name: name.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Substitute `default` when `name` is absent or blank.
pub fn default_if_blank(name: Option<&str>, default: &str) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => default.to_string(),
    }
}

/// Require a non-blank field value.
///
/// # Errors
///
/// Returns `ConfigError::MissingField` if the value is blank.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(field).into());
    }
    Ok(())
}

/// Whether `value` can travel as an HTTP header value.
///
/// Control bytes other than tab are rejected by the HTTP layer.
pub fn is_header_safe(value: &str) -> bool {
    !value
        .bytes()
        .any(|b| (b < 0x20 && b != b'\t') || b == 0x7f)
}

/// Require a value that can be sent as an HTTP header.
///
/// # Errors
///
/// Returns `ConfigError::ControlCharacter` if the value contains control
/// characters.
pub fn require_header_safe(field: &'static str, value: &str) -> Result<()> {
    if !is_header_safe(value) {
        return Err(ConfigError::ControlCharacter(field).into());
    }
    Ok(())
}
