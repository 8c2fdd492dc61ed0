use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::api;
use crate::app::SharedState;

pub const HOME_MESSAGE: &str =
    "Server is running. Available endpoints: /process-image1, /process-image2, /process-image3";

pub const KEEP_ALIVE_MESSAGE: &str = "I'm alive!";

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/process-image1", post(api::process::process_image_1))
        .route("/process-image2", post(api::process::process_image_2))
        .route("/process-image3", post(api::process::process_image_3))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router for the liveness port: a single plaintext `GET /`.
pub fn create_keep_alive_router() -> Router {
    Router::new()
        .route("/", get(keep_alive))
        .layer(TraceLayer::new_for_http())
}

async fn home() -> &'static str {
    HOME_MESSAGE
}

async fn keep_alive() -> &'static str {
    KEEP_ALIVE_MESSAGE
}
