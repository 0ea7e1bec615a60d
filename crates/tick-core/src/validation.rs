//! Input validation shared by the store, the interpreter, and the CLI.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::CoreError;

/// Longest accepted contact name, in characters.
pub const MAX_NAME_CHARS: usize = 50;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern compiles")
});

/// Trim a task title and reject it if nothing is left.
///
/// # Errors
///
/// Returns `CoreError::Validation` for an empty or whitespace-only title.
pub fn validate_title(raw: &str) -> Result<String, CoreError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    Ok(title.to_string())
}

/// Trim a contact name and check its length.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the name is empty or longer than 50 characters.
pub fn validate_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("name is required".into()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

/// Trim an email address and check it against the contact address pattern.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the address is empty or malformed.
pub fn validate_email(raw: &str) -> Result<String, CoreError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(CoreError::Validation("email is required".into()));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(CoreError::Validation(format!("invalid email address '{email}'")));
    }
    Ok(email.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(validate_title("  Staff Meeting ").unwrap(), "Staff Meeting");
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn name_length_is_bounded() {
        assert!(validate_name(&"a".repeat(50)).is_ok());
        assert!(validate_name(&"a".repeat(51)).is_err());
        assert!(validate_name("").is_err());
    }

    #[rstest]
    #[case("jane@example.com", true)]
    #[case("jane.doe-x@mail.example.org", true)]
    #[case("jane@example", false)]
    #[case("@example.com", false)]
    #[case("jane@@example.com", false)]
    #[case("jane example@example.com", false)]
    fn email_pattern(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(validate_email(raw).is_ok(), valid, "{raw}");
    }
}
