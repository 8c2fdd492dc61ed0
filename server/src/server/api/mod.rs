//! REST API handlers.

pub mod models;
pub mod process;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Standard error response: `{"error": message}`.
pub fn err_json(status: u16, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "error": message })),
    )
}
