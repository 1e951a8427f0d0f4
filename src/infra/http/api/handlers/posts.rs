//! Posts handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::application::repos::PostQueryFilter;
use crate::domain::posts::{NewPost, PostPatch};

use super::post_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::{PostListQuery, PublishRequest};
use crate::infra::http::api::state::ApiState;

pub async fn list_posts(
    State(state): State<ApiState>,
    Query(query): Query<PostListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = PostQueryFilter {
        published: query.published,
        category_id: query.category_id,
    };
    let page = state
        .posts
        .list(filter, PageRequest::new(query.page, query.limit))
        .await
        .map_err(post_to_api)?;
    Ok(Json(page))
}

pub async fn get_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.get(id).await.map_err(post_to_api)?;
    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<ApiState>,
    Json(payload): Json<NewPost>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.create(payload).await.map_err(post_to_api)?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PostPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.update(id, patch).await.map_err(post_to_api)?;
    Ok(Json(post))
}

/// The body is optional; without `at` the post is published now.
pub async fn publish_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<PublishRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let at = payload.and_then(|Json(request)| request.at);
    let post = state.posts.publish(id, at).await.map_err(post_to_api)?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.posts.delete(id).await.map_err(post_to_api)?;
    Ok(StatusCode::NO_CONTENT)
}
