use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness check. Only reachable once the index has been built.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Nova resume assistant backend running!"
    }))
}
