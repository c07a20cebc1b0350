pub mod debug;
pub mod suggest;
pub mod tracks;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/tracks",
            get(tracks::list_tracks).post(tracks::upload_track),
        )
        .route("/routes/suggest", get(suggest::suggest_routes))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
