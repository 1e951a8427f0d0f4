//! Service page handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::domain::services::{NewService, ServicePatch};

use super::document_to_api;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::ActiveQuery;
use crate::infra::http::api::state::ApiState;

pub async fn list_services(
    State(state): State<ApiState>,
    Query(query): Query<ActiveQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let services = state
        .services
        .list(query.active)
        .await
        .map_err(document_to_api)?;
    Ok(Json(services))
}

pub async fn get_service(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state.services.get(id).await.map_err(document_to_api)?;
    Ok(Json(service))
}

pub async fn create_service(
    State(state): State<ApiState>,
    Json(payload): Json<NewService>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state
        .services
        .create(payload)
        .await
        .map_err(document_to_api)?;
    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update_service(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ServicePatch>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state
        .services
        .update(id, patch)
        .await
        .map_err(document_to_api)?;
    Ok(Json(service))
}

pub async fn delete_service(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.delete(id).await.map_err(document_to_api)?;
    Ok(StatusCode::NO_CONTENT)
}
