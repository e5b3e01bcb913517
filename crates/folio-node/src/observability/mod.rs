//! # Observability Module
//!
//! Structured logging and request tracing for the Folio backend:
//!
//! - **Structured Logging**: pretty or JSON-formatted logs with an `EnvFilter`
//! - **Request Tracing**: request ID propagation through a tracing span
//!
//! ## Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use folio_node::observability::{init_logging, request_id_layer, LogFormat};
//!
//! init_logging("info", LogFormat::parse("json"));
//!
//! let app: Router<()> = Router::new().layer(request_id_layer());
//! ```

mod logging;
pub mod middleware;

pub use logging::{init_logging, LogFormat};
pub use middleware::{request_id_layer, RequestId, REQUEST_ID_HEADER};
