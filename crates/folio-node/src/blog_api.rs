//! Blog post endpoints.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use folio_content::{NewPost, Post, PostId, PostUpdate};
use serde::Serialize;

use crate::api::{ApiError, AppState};
use crate::guard::{guarded, GuardChain};

/// Creates the blog routes.
pub fn blog_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/blogs",
            get(list_blogs).merge(guarded(
                post(create_blog),
                state,
                GuardChain::admin_with_token(),
            )),
        )
        .route(
            "/api/blogs/{id}",
            get(get_blog)
                .merge(guarded(put(update_blog), state, GuardChain::admin_with_token()))
                .merge(guarded(delete(delete_blog), state, GuardChain::admin())),
        )
        .route("/api/blogs/{id}/like", post(like_blog))
}

/// Listing of posts.
#[derive(Serialize)]
pub struct BlogList {
    pub blogs: Vec<Post>,
}

/// Outcome of a mutation.
#[derive(Serialize)]
pub struct BlogStatus {
    pub status: &'static str,
    pub id: PostId,
}

#[derive(Serialize)]
struct LikeCount {
    likes: u64,
}

/// Non-numeric IDs address no post.
fn post_id(path: Result<Path<PostId>, PathRejection>) -> Result<PostId, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::blog_not_found())
}

/// Turn a body rejection into a 400.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::Validation("Invalid JSON body".to_string())
    })
}

async fn list_blogs(State(state): State<AppState>) -> impl IntoResponse {
    Json(BlogList {
        blogs: state.content.list_posts(),
    })
}

async fn get_blog(
    State(state): State<AppState>,
    path: Result<Path<PostId>, PathRejection>,
) -> Result<Json<Post>, ApiError> {
    let id = post_id(path)?;
    Ok(Json(state.content.get_post(id)?))
}

async fn create_blog(
    State(state): State<AppState>,
    body: Result<Json<NewPost>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.content.create_post(json_body(body)?)?;

    Ok((
        StatusCode::CREATED,
        Json(BlogStatus {
            status: "added",
            id: post.id,
        }),
    ))
}

async fn update_blog(
    State(state): State<AppState>,
    path: Result<Path<PostId>, PathRejection>,
    body: Result<Json<PostUpdate>, JsonRejection>,
) -> Result<Json<BlogStatus>, ApiError> {
    let id = post_id(path)?;
    let post = state.content.update_post(id, json_body(body)?)?;

    Ok(Json(BlogStatus {
        status: "updated",
        id: post.id,
    }))
}

async fn delete_blog(
    State(state): State<AppState>,
    path: Result<Path<PostId>, PathRejection>,
) -> Result<Json<BlogStatus>, ApiError> {
    let id = post_id(path)?;
    let post = state.content.delete_post(id)?;

    Ok(Json(BlogStatus {
        status: "deleted",
        id: post.id,
    }))
}

async fn like_blog(
    State(state): State<AppState>,
    path: Result<Path<PostId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = post_id(path)?;
    let likes = state.content.like_post(id)?;
    tracing::debug!(id, likes, "Post liked");

    Ok(Json(LikeCount { likes }))
}
