pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware as axum_middleware, routing::get};

use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;

/// The full application router: the content API plus `/healthz`.
pub fn build_router(state: ApiState) -> Router {
    let health = Router::new()
        .route("/healthz", get(healthz))
        .with_state(state.clone());

    build_api_router(state)
        .merge(health)
        .layer(axum_middleware::from_fn(middleware::log_responses))
}

async fn healthz(State(state): State<ApiState>) -> Response {
    db_health_response(state.health.ping().await)
}

fn db_health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
