//! Categories handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::categories::CreateCategoryCommand;

use super::category_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn list_categories(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.categories.list().await.map_err(category_to_api)?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<ApiState>,
    Json(payload): Json<CreateCategoryCommand>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .categories
        .create(payload)
        .await
        .map_err(category_to_api)?;
    Ok((StatusCode::CREATED, Json(category)))
}
