//! # Folio Content
//!
//! In-memory storage for the portfolio's blog posts and contact messages.
//!
//! ## Overview
//!
//! - **Posts**: published articles with view and like counters
//! - **Messages**: sanitized submissions from the public contact form
//! - **Audit log**: append-only record of created content and admin actions
//!
//! ## Example
//!
//! ```
//! use folio_content::{ContentStore, NewPost};
//!
//! let store = ContentStore::seeded();
//!
//! let post = store
//!     .create_post(NewPost {
//!         title: Some("Shipping Rust".into()),
//!         summary: Some("Notes from a first release".into()),
//!         content: Some("...".into()),
//!         category: Some("Engineering".into()),
//!         image: None,
//!     })
//!     .unwrap();
//!
//! assert_eq!(post.id, 3);
//! assert_eq!(post.image, "default.jpg");
//! assert_eq!(store.get_post(post.id).unwrap().views, 1);
//! ```

pub mod audit;
pub mod error;
pub mod message;
pub mod post;
pub mod stats;
pub mod store;
pub mod validation;

pub use audit::{Action, ActivityEntry, AuditKind, AuditLog};
pub use error::{ContentError, Result};
pub use message::{Message, MessageId, NewMessage, DEFAULT_SUBJECT};
pub use post::{NewPost, Post, PostId, PostUpdate, DEFAULT_IMAGE};
pub use stats::{engagement_rate, ContentStats};
pub use store::{ContentStore, MessageOrder};
