//! Contact messages submitted through the public form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{require_fields, sanitize_input, validate_email};
use crate::Result;

/// Unique identifier for a message.
pub type MessageId = u64;

/// Subject used when a message is submitted without one.
pub const DEFAULT_SUBJECT: &str = "No Subject";

/// A stored contact message. All text fields are already sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// When the message was received.
    pub timestamp: DateTime<Utc>,
}

/// Fields submitted through the contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl NewMessage {
    /// Validate the submission and build the stored message.
    ///
    /// Required fields are checked first, then the email format. Every
    /// text field is trimmed and HTML-escaped before it is stored.
    pub fn into_message(self, id: MessageId, timestamp: DateTime<Utc>) -> Result<Message> {
        require_fields(&[
            ("name", self.name.as_deref()),
            ("email", self.email.as_deref()),
            ("message", self.message.as_deref()),
        ])?;

        let email = self.email.as_deref().unwrap_or_default().trim();
        validate_email(email)?;

        let subject = match self.subject.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_SUBJECT,
        };

        Ok(Message {
            id,
            name: sanitize_input(self.name.as_deref().unwrap_or_default()),
            email: sanitize_input(email),
            subject: sanitize_input(subject),
            message: sanitize_input(self.message.as_deref().unwrap_or_default()),
            timestamp,
        })
    }
}
