use axum::Json;
use serde_json::{json, Value};

/// Liveness check. Does not contact the backend.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
