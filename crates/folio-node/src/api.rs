//! HTTP API for the Folio backend.
//!
//! Wires the blog, contact, session and admin endpoints into one router,
//! with authorization guard chains attached per route.

use axum::{
    extract::{FromRef, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::Key;
use chrono::TimeDelta;
use folio_content::{AuditLog, ContentError, ContentStore};
use folio_session::{SessionError, SessionStore, DEFAULT_TTL_DAYS, MAX_TTL_DAYS};
use serde::Serialize;
use sha2::{Digest, Sha512};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::guard::SESSION_TOKEN_HEADER;
use crate::observability::request_id_layer;
use crate::{admin_api, blog_api, contact_api, session_api};

/// Name shown in the service banner.
pub const SERVICE_NAME: &str = "Folio Portfolio Backend";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Posts and messages.
    pub content: Arc<ContentStore>,
    /// Admin sessions.
    pub sessions: Arc<SessionStore>,
    /// Loaded configuration.
    pub settings: Arc<Settings>,
    /// Key signing the session cookie.
    pub cookie_key: Key,
}

impl AppState {
    /// Build the state described by `settings`.
    pub fn from_settings(settings: Settings) -> Self {
        let mut content = if settings.seed_posts {
            ContentStore::seeded()
        } else {
            ContentStore::new()
        };
        if let Some(dir) = settings.audit_dir() {
            content = content.with_audit_log(AuditLog::new(dir));
        }

        let ttl = match settings.session_ttl_days {
            days @ 1..=MAX_TTL_DAYS => TimeDelta::days(days),
            days => {
                tracing::warn!(days, "Session TTL out of range, using default");
                TimeDelta::days(DEFAULT_TTL_DAYS)
            }
        };
        let sessions = SessionStore::new(settings.admin_password.clone()).with_ttl(ttl);

        Self {
            content: Arc::new(content),
            sessions: Arc::new(sessions),
            cookie_key: cookie_key(&settings.secret_key),
            settings: Arc::new(settings),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Derive the 64-byte cookie signing key from the configured secret.
pub fn cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The caller lacks a valid admin session or token.
    #[error("{0}")]
    Unauthorized(String),
    /// Anything else. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The standard 401.
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    /// The 404 for a missing post.
    pub fn blog_not_found() -> Self {
        ApiError::NotFound("Blog not found".to_string())
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Validation(msg) => ApiError::Validation(msg),
            ContentError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ContentError::Audit(_) | ContentError::Serialization(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            SessionError::MalformedId(_) => ApiError::Validation(err.to_string()),
            SessionError::ExpiryOutOfRange => ApiError::Internal(err.to_string()),
            SessionError::NotFound | SessionError::Expired | SessionError::NotAdmin => {
                ApiError::unauthorized()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings);

    Router::new()
        .route("/", get(service_banner))
        .route("/health", get(health_check))
        .merge(blog_api::blog_routes(&state))
        .merge(contact_api::contact_routes(&state))
        .merge(session_api::session_routes(&state))
        .merge(admin_api::admin_routes(&state))
        .layer(cors)
        .layer(request_id_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy allowing credentialed requests from the configured origins.
fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_origins
        .iter()
        .map(|origin| origin.trim())
        .filter_map(|origin| {
            // Credentialed CORS cannot use a wildcard origin.
            if origin == "*" {
                tracing::warn!("Ignoring wildcard CORS origin");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(SESSION_TOKEN_HEADER),
        ])
}

/// Service banner with the endpoint map.
async fn service_banner() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "active",
        "service": SERVICE_NAME,
        "endpoints": {
            "blogs": "/api/blogs",
            "contact": "/api/contact",
            "login": "/api/login",
            "logout": "/api/logout",
            "validate_session": "/api/validate-session",
            "stats": "/api/stats",
            "health": "/health"
        }
    }))
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    tracing::trace!(sessions = state.sessions.len(), "Health check");
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
