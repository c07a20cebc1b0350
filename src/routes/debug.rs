use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Report what the service currently knows about
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "checks": {
            "tracks": state.store.len().await,
            "routing_base_url": state.routing_base_url,
        }
    }))
}
