use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub const ROOT_MESSAGE: &str = "IPL Dashboard API is running!";

// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

// GET /api/health
pub async fn api_health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = if state.matches.ping().await {
        "connected"
    } else {
        "disconnected"
    };

    Json(json!({
        "status": "healthy",
        "database": db_status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
