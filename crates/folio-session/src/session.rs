//! Session records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::token::{SessionId, SessionToken};

/// Authorization state of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session, or an expired one.
    Anonymous,
    /// Logged in without a token. Never granted admin access.
    Authenticated,
    /// Logged in as admin with a token issued.
    TokenIssued,
}

/// Server-side record for one client.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub logged_in: bool,
    /// Only set after the admin secret was supplied.
    pub admin: bool,
    #[serde(skip)]
    pub token: Option<SessionToken>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the session is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// The state this record puts its client in at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        if !self.logged_in || self.is_expired_at(now) {
            return SessionState::Anonymous;
        }
        match &self.token {
            Some(token) if self.admin && !token.as_str().is_empty() => SessionState::TokenIssued,
            _ => SessionState::Authenticated,
        }
    }

    /// Whether the session grants admin access at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == SessionState::TokenIssued
    }

    /// The issued token text, if any.
    pub fn token_str(&self) -> Option<&str> {
        self.token.as_ref().map(SessionToken::as_str)
    }
}
