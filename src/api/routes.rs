use axum::{routing::post, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::*;

pub const DIRECTIONS_PATH: &str = "/routing/v1/directions";

pub fn create_router() -> Router {
    Router::new()
        .route(DIRECTIONS_PATH, post(walking_directions))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
