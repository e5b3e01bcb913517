//! # Folio Node
//!
//! HTTP backend for a personal portfolio site.
//!
//! The service exposes blog-post and contact-message endpoints backed by
//! in-memory stores, and a password-based admin session that gates every
//! mutating or private route.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    HTTP API Layer                    │
//! │  • Blogs (list, read, like, create, edit, delete)    │
//! │  • Contact form and admin message listing            │
//! │  • Login / logout / session validation               │
//! │  • Dashboard stats                                   │
//! └──────────────────────────────────────────────────────┘
//!                            │
//! ┌──────────────────────────────────────────────────────┐
//! │                 Authorization Gate                   │
//! │  • Guard chains: admin, admin+token                  │
//! └──────────────────────────────────────────────────────┘
//!                            │
//! ┌──────────────────────────┬───────────────────────────┐
//! │   folio-content          │   folio-session           │
//! │  • Posts, messages       │  • Admin sessions, TTL    │
//! │  • Validation, audit log │  • Opaque tokens          │
//! └──────────────────────────┴───────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! ADMIN_PASSWORD=change-me cargo run --bin folio-node -- --port 5000
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Application state, error type and router
//! - [`blog_api`] - Blog post endpoints
//! - [`contact_api`] - Contact form endpoints
//! - [`session_api`] - Login, logout and session validation
//! - [`admin_api`] - Dashboard endpoints
//! - [`guard`] - Authorization guard chains
//! - [`config`] - Environment-driven settings
//! - [`observability`] - Structured logging and request tracing
//!
//! ## Example: Building the router
//!
//! ```rust,no_run
//! use folio_node::api::{create_router, AppState};
//! use folio_node::config::Settings;
//!
//! let settings = Settings::load().expect("valid configuration");
//! let app = create_router(AppState::from_settings(settings));
//! ```

pub mod admin_api;
pub mod api;
pub mod blog_api;
pub mod config;
pub mod contact_api;
pub mod guard;
pub mod observability;
pub mod session_api;
