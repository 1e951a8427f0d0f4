//! Home and About page handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;

use crate::domain::{about::AboutPatch, home::HomePatch};

use super::document_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::CardQuery;
use crate::infra::http::api::state::ApiState;

pub async fn get_home(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let home = state.home.load().await.map_err(document_to_api)?;
    Ok(Json(home))
}

pub async fn update_home(
    State(state): State<ApiState>,
    Json(patch): Json<HomePatch>,
) -> Result<impl IntoResponse, ApiError> {
    let home = state.home.update(patch).await.map_err(document_to_api)?;
    Ok(Json(home))
}

pub async fn available_services(
    State(state): State<ApiState>,
    Query(query): Query<CardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let choices = state
        .home
        .service_choices(query.card)
        .await
        .map_err(document_to_api)?;
    Ok(Json(choices))
}

pub async fn get_about(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let about = state.about.load(None).await.map_err(document_to_api)?;
    Ok(Json(about))
}

pub async fn update_about(
    State(state): State<ApiState>,
    Json(patch): Json<AboutPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let about = state
        .about
        .update(None, patch)
        .await
        .map_err(document_to_api)?;
    Ok(Json(about))
}
