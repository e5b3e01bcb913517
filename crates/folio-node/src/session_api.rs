//! Login, logout and session validation endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use chrono::{DateTime, Utc};
use folio_content::{validation::require_field, Action, ContentError};
use folio_session::{SessionError, SessionId};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::blog_api::json_body;
use crate::config::Settings;
use crate::guard::{guarded, session_id, GuardChain, SESSION_COOKIE};

/// Creates the session routes.
pub fn session_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route(
            "/api/validate-session",
            guarded(get(validate_session), state, GuardChain::admin()),
        )
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub session_token: String,
    pub session_expiry: DateTime<Utc>,
}

#[derive(Serialize)]
struct SessionStatus {
    status: &'static str,
}

/// The signed session cookie for `id`.
fn session_cookie(id: SessionId, settings: &Settings) -> Cookie<'static> {
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .http_only(true)
        .path("/");

    if settings.is_production() {
        cookie.same_site(SameSite::None).secure(true).build()
    } else {
        cookie.same_site(SameSite::Lax).build()
    }
}

async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(SignedCookieJar, Json<LoginResponse>), ApiError> {
    let request = json_body(body)?;
    let password = require_field("password", request.password.as_deref())
        .map_err(|e| ApiError::from(ContentError::from(e)))?;

    let session = match state.sessions.login(session_id(&jar), password) {
        Ok(session) => session,
        Err(SessionError::InvalidCredentials) => {
            tracing::warn!("Failed admin login attempt");
            state
                .content
                .audit()
                .activity(Action::LoginFailed, "invalid password");
            return Err(SessionError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };

    let token = session
        .token_str()
        .ok_or_else(|| ApiError::Internal("session issued without token".to_string()))?
        .to_string();

    tracing::info!(session = %session.id, expires_at = %session.expires_at, "Admin logged in");
    state
        .content
        .audit()
        .activity(Action::Login, format!("session {}", session.id));

    let jar = jar.add(session_cookie(session.id, &state.settings));

    Ok((
        jar,
        Json(LoginResponse {
            status: "logged_in",
            session_token: token,
            session_expiry: session.expires_at,
        }),
    ))
}

/// Always succeeds, with or without a session.
async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<SessionStatus>) {
    if let Some(id) = session_id(&jar) {
        if state.sessions.logout(&id) {
            tracing::info!(session = %id, "Admin logged out");
            state
                .content
                .audit()
                .activity(Action::Logout, format!("session {}", id));
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(SessionStatus { status: "logged_out" }))
}

async fn validate_session() -> Json<SessionStatus> {
    Json(SessionStatus { status: "valid" })
}
