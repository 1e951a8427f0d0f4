pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{Router, routing::get, routing::post};

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/v1/documents/home",
            get(handlers::get_home)
                .put(handlers::update_home)
                .patch(handlers::update_home),
        )
        .route(
            "/api/v1/documents/home/available-services",
            get(handlers::available_services),
        )
        .route(
            "/api/v1/documents/about",
            get(handlers::get_about)
                .put(handlers::update_about)
                .patch(handlers::update_about),
        )
        .route(
            "/api/v1/services",
            get(handlers::list_services).post(handlers::create_service),
        )
        .route(
            "/api/v1/services/{id}",
            get(handlers::get_service)
                .put(handlers::update_service)
                .patch(handlers::update_service)
                .delete(handlers::delete_service),
        )
        .route(
            "/api/v1/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/v1/posts/{id}",
            get(handlers::get_post)
                .put(handlers::update_post)
                .patch(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/api/v1/posts/{id}/publish", post(handlers::publish_post))
        .route(
            "/api/v1/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .with_state(state)
}
