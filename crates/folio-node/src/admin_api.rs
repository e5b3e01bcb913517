//! Admin dashboard endpoints.

use axum::{extract::State, routing::get, Json, Router};
use folio_content::ContentStats;

use crate::api::AppState;
use crate::blog_api::BlogList;
use crate::guard::{guarded, GuardChain};

/// Creates the admin routes.
pub fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/blogs",
            guarded(get(list_admin_blogs), state, GuardChain::admin()),
        )
        .route(
            "/api/stats",
            guarded(get(stats), state, GuardChain::admin()),
        )
}

/// Posts in insertion order, unaffected by dates.
async fn list_admin_blogs(State(state): State<AppState>) -> Json<BlogList> {
    Json(BlogList {
        blogs: state.content.list_posts_unsorted(),
    })
}

async fn stats(State(state): State<AppState>) -> Json<ContentStats> {
    Json(state.content.stats())
}
