//! In-memory session store.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::{
    error::{Result, SessionError},
    session::Session,
    token::{SessionId, SessionToken},
};

/// Default session lifetime in days.
pub const DEFAULT_TTL_DAYS: i64 = 30;

/// Longest accepted session lifetime in days.
pub const MAX_TTL_DAYS: i64 = 36_500;

/// Thread-safe store of admin sessions keyed by session ID.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    admin_secret: String,
    ttl: TimeDelta,
}

impl SessionStore {
    /// Create a store checking logins against `admin_secret`.
    pub fn new(admin_secret: impl Into<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            admin_secret: admin_secret.into(),
            ttl: TimeDelta::days(DEFAULT_TTL_DAYS),
        }
    }

    /// Set the session lifetime.
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    /// Session lifetime.
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Log a client in with the admin password.
    ///
    /// An existing session ID is reused so the client keeps its cookie; the
    /// record itself is replaced with a fresh token and expiry.
    pub fn login(&self, existing: Option<SessionId>, password: &str) -> Result<Session> {
        self.login_at(existing, password, Utc::now())
    }

    /// [`login`](Self::login) with an explicit clock.
    pub fn login_at(
        &self,
        existing: Option<SessionId>,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        if password.as_bytes() != self.admin_secret.as_bytes() {
            return Err(SessionError::InvalidCredentials);
        }

        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(SessionError::ExpiryOutOfRange)?;

        let session = Session {
            id: existing.unwrap_or_default(),
            logged_in: true,
            admin: true,
            token: Some(SessionToken::generate()),
            issued_at: now,
            expires_at,
        };

        self.sessions.write().insert(session.id, session.clone());
        tracing::debug!(session = %session.id, expires_at = %session.expires_at, "Session issued");

        Ok(session)
    }

    /// Remove a client's session. Returns whether one existed.
    pub fn logout(&self, id: &SessionId) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    /// Return the session if it currently grants admin access.
    pub fn validate(&self, id: &SessionId) -> Result<Session> {
        self.validate_at(id, Utc::now())
    }

    /// [`validate`](Self::validate) with an explicit clock.
    ///
    /// An expired record is removed as a side effect.
    pub fn validate_at(&self, id: &SessionId, now: DateTime<Utc>) -> Result<Session> {
        let session = self.get_at(id, now)?;

        if !session.is_valid_at(now) {
            return Err(SessionError::NotAdmin);
        }

        Ok(session)
    }

    /// Whether the client holds a live admin session.
    pub fn is_admin(&self, id: &SessionId) -> bool {
        self.validate(id).is_ok()
    }

    /// Whether `header_token` equals the token stored for the client.
    pub fn verify_token(&self, id: &SessionId, header_token: &str) -> bool {
        self.get_at(id, Utc::now())
            .ok()
            .and_then(|s| s.token)
            .is_some_and(|t| t.matches(header_token))
    }

    /// Remove every session expired at `now`. Returns how many were removed.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        before - sessions.len()
    }

    /// Remove every expired session.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    /// Number of stored sessions, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn get_at(&self, id: &SessionId, now: DateTime<Utc>) -> Result<Session> {
        let session = self
            .sessions
            .read()
            .get(id)
            .cloned()
            .ok_or(SessionError::NotFound)?;

        if session.is_expired_at(now) {
            let mut sessions = self.sessions.write();
            // Only drop it if no concurrent login replaced the record.
            if sessions.get(id).is_some_and(|s| s.is_expired_at(now)) {
                sessions.remove(id);
            }
            return Err(SessionError::Expired);
        }

        Ok(session)
    }
}
