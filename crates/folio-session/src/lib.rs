//! # Folio Session
//!
//! Server-side admin sessions for the portfolio backend.
//!
//! A client logs in with the static admin password and receives a session
//! ID (carried in a cookie) plus an opaque token it echoes back on edits.
//! Sessions expire after a fixed lifetime and are removed on access or by
//! a periodic sweep.
//!
//! ```
//! use folio_session::{SessionError, SessionStore};
//!
//! let store = SessionStore::new("secret123");
//!
//! assert_eq!(store.login(None, "guess").unwrap_err(), SessionError::InvalidCredentials);
//!
//! let session = store.login(None, "secret123").unwrap();
//! assert!(store.is_admin(&session.id));
//! assert!(store.verify_token(&session.id, session.token_str().unwrap()));
//!
//! store.logout(&session.id);
//! assert!(!store.is_admin(&session.id));
//! ```

pub mod error;
pub mod session;
pub mod store;
pub mod token;

pub use error::{Result, SessionError};
pub use session::{Session, SessionState};
pub use store::{SessionStore, DEFAULT_TTL_DAYS, MAX_TTL_DAYS};
pub use token::{SessionId, SessionToken};
