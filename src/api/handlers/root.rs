//! Handler for the API root.

use axum::Json;
use serde_json::{Value, json};

/// Returns a welcome message. Doubles as a liveness probe.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to the snaplink API" }))
}
