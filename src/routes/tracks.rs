use crate::error::{AppError, Result};
use crate::models::Track;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "gpxfile";

/// GET /tracks
pub async fn list_tracks(State(state): State<Arc<AppState>>) -> Json<Vec<Track>> {
    Json(state.store.all().await)
}

/// POST /tracks
/// Import a GPX file sent as multipart form data.
pub async fn upload_track(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Unable to parse form: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::InvalidRequest("Upload has no filename".to_string()))?
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Unable to read file: {}", e)))?;

        let track = state.importer.import(&filename, &bytes).await?;
        let summary = track.summary();
        state.store.add(track).await;

        return Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": format!("File uploaded and processed successfully: {}", summary.filename),
                "track": summary,
            })),
        ));
    }

    Err(AppError::InvalidRequest(format!(
        "Missing '{}' file field",
        UPLOAD_FIELD
    )))
}
