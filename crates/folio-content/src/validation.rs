//! Input validation and sanitization for submitted content.
//!
//! Every helper is pure and returns a [`ValidationError`] instead of
//! panicking, so handlers can branch on the result.
//!
//! ```
//! use folio_content::validation::{sanitize_input, validate_email};
//!
//! assert!(validate_email("user@example.com").is_ok());
//! assert!(validate_email("a@b").is_err());
//! assert_eq!(sanitize_input("  <b>hi</b> "), "&lt;b&gt;hi&lt;&#x2F;b&gt;");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Regex for accepted email addresses: local part, `@`, domain with at least one dot.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$").expect("Invalid regex")
});

/// Message returned when a required field is absent or blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

/// Message returned when an email address does not match [`EMAIL_REGEX`].
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";

/// Validate an email address against [`EMAIL_REGEX`].
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(email) {
        let mut err = ValidationError::new("email");
        err.message = Some(INVALID_EMAIL_MESSAGE.into());
        return Err(err);
    }

    Ok(())
}

/// Trim surrounding whitespace and escape HTML metacharacters.
pub fn sanitize_input(input: &str) -> String {
    html_escape::encode_safe(input.trim()).into_owned()
}

/// Require a field to be present and non-blank, returning its value.
pub fn require_field<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => {
            let mut err = ValidationError::new("required");
            err.message = Some(MISSING_FIELDS_MESSAGE.into());
            err.add_param("field".into(), &name);
            Err(err)
        }
    }
}

/// Require every listed field to be present and non-blank.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), ValidationError> {
    for (name, value) in fields {
        require_field(name, *value)?;
    }
    Ok(())
}

/// Reject a field that was supplied but left blank.
///
/// Absent fields pass; this is used for partial updates.
pub fn validate_optional_field(name: &str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            let mut err = ValidationError::new("blank");
            err.message = Some(format!("Field '{}' cannot be empty", name).into());
            Err(err)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        // Valid addresses
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last+tag@sub-domain.co.uk").is_ok());

        // Invalid addresses
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("bad").is_err());
        assert!(validate_email("").is_err());
        assert!(validate_email("user@@example.com").is_err());
        assert!(validate_email("us er@example.com").is_err());
    }

    #[test]
    fn test_invalid_email_message() {
        let err = validate_email("bad").unwrap_err();
        assert_eq!(err.code, "email");
        assert_eq!(err.message.as_deref(), Some(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  hello  "), "hello");
        assert_eq!(sanitize_input(""), "");
        assert_eq!(
            sanitize_input("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"
        );
        assert_eq!(sanitize_input("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
    }

    #[test]
    fn test_require_fields() {
        assert!(require_fields(&[("name", Some("A")), ("email", Some("a@b.com"))]).is_ok());
        assert!(require_fields(&[("name", Some("A")), ("email", None)]).is_err());
        assert!(require_fields(&[("name", Some("   "))]).is_err());

        let err = require_field("title", None).unwrap_err();
        assert_eq!(err.message.as_deref(), Some(MISSING_FIELDS_MESSAGE));
    }

    #[test]
    fn test_validate_optional_field() {
        assert!(validate_optional_field("title", None).is_ok());
        assert!(validate_optional_field("title", Some("New")).is_ok());
        assert!(validate_optional_field("title", Some("")).is_err());
    }
}
