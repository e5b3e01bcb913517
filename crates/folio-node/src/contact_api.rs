//! Contact form endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use folio_content::{Message, MessageOrder, NewMessage};
use serde::Serialize;

use crate::api::{ApiError, AppState};
use crate::blog_api::json_body;
use crate::guard::{guarded, GuardChain};

/// Creates the contact routes.
pub fn contact_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit_message))
        .route(
            "/api/contact/messages",
            guarded(get(list_messages), state, GuardChain::admin()),
        )
        .route(
            "/api/contact/all-messages",
            guarded(get(list_all_messages), state, GuardChain::admin()),
        )
}

/// Listing of messages.
#[derive(Serialize)]
pub struct MessageList {
    pub messages: Vec<Message>,
}

async fn submit_message(
    State(state): State<AppState>,
    body: Result<Json<NewMessage>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    state.content.create_message(json_body(body)?)?;
    Ok(Json(serde_json::json!({ "status": "success" })))
}

/// Messages in order of arrival.
async fn list_messages(State(state): State<AppState>) -> Json<MessageList> {
    Json(MessageList {
        messages: state.content.list_messages(MessageOrder::Inserted, None),
    })
}

/// Messages newest first.
async fn list_all_messages(State(state): State<AppState>) -> Json<MessageList> {
    Json(MessageList {
        messages: state.content.list_messages(MessageOrder::NewestFirst, None),
    })
}
