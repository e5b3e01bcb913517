//! Fuzz target for contact form validation.
//!
//! Feeds arbitrary submissions through validation and sanitization and
//! checks that nothing panics and no raw markup survives into storage.

#![no_main]

use arbitrary::Arbitrary;
use folio_content::validation::{sanitize_input, validate_email};
use folio_content::NewMessage;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Submission {
    name: Option<String>,
    email: Option<String>,
    subject: Option<String>,
    message: Option<String>,
}

fuzz_target!(|input: Submission| {
    if let Some(email) = &input.email {
        let _ = validate_email(email);
        let escaped = sanitize_input(email);
        assert!(!escaped.contains('<') && !escaped.contains('>'));
    }

    let submission = NewMessage {
        name: input.name,
        email: input.email,
        subject: input.subject,
        message: input.message,
    };

    if let Ok(message) = submission.into_message(1, chrono::Utc::now()) {
        for field in [&message.name, &message.email, &message.subject, &message.message] {
            assert!(!field.contains('<'));
            assert!(!field.contains('"'));
            assert_eq!(field.trim(), field.as_str());
        }
        assert!(validate_email(&message.email).is_ok());
    }
});
