//! Authorization guard chains.
//!
//! A protected route is wrapped in a [`GuardChain`]: an ordered list of
//! [`Guard`]s run by the [`enforce`] middleware before the handler. The
//! first denial short-circuits with `401 Unauthorized`, so the handler and
//! the stores behind it never see the request.
//!
//! ```text
//! request ──► AdminSession ──► SessionToken ──► handler
//!                  │                 │
//!                  └──────► 401 ◄────┘
//! ```

use axum::{
    extract::{FromRef, Request, State},
    http::HeaderMap,
    middleware::{from_fn_with_state, Next},
    response::Response,
    routing::MethodRouter,
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use folio_session::{SessionId, SessionStore};

use crate::api::{ApiError, AppState};

/// Name of the signed cookie carrying the session ID.
pub const SESSION_COOKIE: &str = "folio_session";

/// Header the client echoes its session token in.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// A single authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The client holds a live admin session.
    AdminSession,
    /// The token header equals the token stored in the session.
    SessionToken,
}

impl Guard {
    /// Guard name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Guard::AdminSession => "admin_session",
            Guard::SessionToken => "session_token",
        }
    }

    /// Whether the request passes this guard.
    pub fn allows(
        &self,
        sessions: &SessionStore,
        session: Option<&SessionId>,
        headers: &HeaderMap,
    ) -> bool {
        let Some(id) = session else {
            return false;
        };

        match self {
            Guard::AdminSession => sessions.validate(id).is_ok(),
            Guard::SessionToken => headers
                .get(SESSION_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|token| sessions.verify_token(id, token)),
        }
    }
}

/// An ordered list of guards protecting a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardChain {
    name: &'static str,
    guards: &'static [Guard],
}

impl GuardChain {
    /// Requires an admin session.
    pub const fn admin() -> Self {
        Self {
            name: "admin",
            guards: &[Guard::AdminSession],
        }
    }

    /// Requires an admin session and the matching session token header.
    pub const fn admin_with_token() -> Self {
        Self {
            name: "admin+token",
            guards: &[Guard::AdminSession, Guard::SessionToken],
        }
    }

    /// Chain name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Guards in the order they run.
    pub fn guards(&self) -> &'static [Guard] {
        self.guards
    }

    /// Run every guard in order, stopping at the first denial.
    pub fn check(
        &self,
        sessions: &SessionStore,
        session: Option<&SessionId>,
        headers: &HeaderMap,
    ) -> Result<(), ApiError> {
        for guard in self.guards {
            if !guard.allows(sessions, session, headers) {
                tracing::debug!(chain = self.name, guard = guard.name(), "Request denied");
                return Err(ApiError::unauthorized());
            }
        }
        Ok(())
    }
}

/// Middleware state: the app state plus the chain to enforce.
#[derive(Clone)]
pub struct Gate {
    state: AppState,
    chain: GuardChain,
}

impl Gate {
    pub fn new(state: AppState, chain: GuardChain) -> Self {
        Self { state, chain }
    }
}

impl FromRef<Gate> for Key {
    fn from_ref(gate: &Gate) -> Self {
        gate.state.cookie_key.clone()
    }
}

/// Session ID from the signed cookie. Tampered or malformed cookies yield `None`.
pub fn session_id(jar: &SignedCookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

/// Middleware running a [`Gate`]'s chain before the wrapped handler.
pub async fn enforce(
    State(gate): State<Gate>,
    jar: SignedCookieJar,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = session_id(&jar);
    gate.chain
        .check(&gate.state.sessions, session.as_ref(), request.headers())?;

    Ok(next.run(request).await)
}

/// Wrap a method router in a guard chain.
pub fn guarded(
    route: MethodRouter<AppState>,
    state: &AppState,
    chain: GuardChain,
) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(Gate::new(state.clone(), chain), enforce))
}
