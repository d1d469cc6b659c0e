//! Field-level input validation shared by the API handlers.
//!
//! Limits match what the web client enforces so both sides reject the same
//! input.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_LONG_TEXT_LEN: usize = 5000;
pub const MAX_LOCATION_LEN: usize = 200;
pub const MAX_ADDRESS_LEN: usize = 500;
pub const MAX_PHONE_LEN: usize = 50;
pub const MAX_PARTICIPANT_ROLE_LEN: usize = 50;
pub const MAX_CONTRACT_TITLE_LEN: usize = 200;
pub const MAX_CONTRACT_CONTENT_LEN: usize = 50_000;
pub const MAX_ACTIVITY_LEN: usize = 200;
pub const MAX_SCHEDULE_NOTES_LEN: usize = 1000;
pub const MAX_PARKING_INFO_LEN: usize = 2000;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_DISPLAY_NAME_LEN: usize = 2;

/// Moodboard group review states.
pub const MOODBOARD_STATUSES: &[&str] = &["PENDING", "ACCEPTED", "REJECTED"];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Require a non-blank value of at most `max` characters.
pub fn require_text(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    require_text_between(field, value, 1, max)
}

/// Require a value whose trimmed length is in `min..=max` characters.
pub fn require_text_between(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(CoreError::Validation(if min <= 1 {
            format!("{field} is required")
        } else {
            format!("{field} must be at least {min} characters")
        }));
    }
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional value against a maximum length.
pub fn optional_text(field: &str, value: Option<&str>, max: usize) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max => Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn require_email(field: &str, email: &str) -> Result<(), CoreError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be a valid email address"
        )))
    }
}

/// An optional email may be absent or empty; otherwise it must be valid.
pub fn optional_email(field: &str, email: Option<&str>) -> Result<(), CoreError> {
    match email {
        None | Some("") => Ok(()),
        Some(e) => require_email(field, e),
    }
}

/// Canonical form used for storage and matching.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

pub fn validate_moodboard_status(status: &str) -> Result<(), CoreError> {
    if MOODBOARD_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid moodboard status '{status}'. Must be one of: {}",
            MOODBOARD_STATUSES.join(", ")
        )))
    }
}

/// Result folder names become path segments, so they may not contain `/`.
pub fn validate_folder_name(name: &str) -> Result<(), CoreError> {
    require_text("Folder name", name, MAX_NAME_LEN)?;
    if name.contains('/') || name.contains('\\') || name.trim() == "." || name.trim() == ".." {
        return Err(CoreError::Validation(
            "Folder name must not contain path separators".into(),
        ));
    }
    Ok(())
}

/// Schedule item durations are whole minutes.
pub fn validate_duration_mins(duration: Option<i32>) -> Result<(), CoreError> {
    match duration {
        Some(d) if d < 0 => Err(CoreError::Validation(
            "Duration must not be negative".into(),
        )),
        _ => Ok(()),
    }
}
