use crate::error::{AppError, Result};
use crate::models::{SuggestQuery, SuggestedRoute};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// GET /routes/suggest
/// Suggest one new loop near the explored area. Returns an empty list when
/// no usable geometry could be produced.
pub async fn suggest_routes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<SuggestedRoute>>> {
    let request = query.into_request().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        min_km = request.min_distance_km,
        max_km = request.max_distance_km,
        follow_streets = request.follow_streets,
        "Route suggestion request: min={:.1}km, max={:.1}km, follow_streets={}",
        request.min_distance_km,
        request.max_distance_km,
        request.follow_streets
    );

    let coverage = state.store.coverage().await;
    let mut rng = StdRng::from_os_rng();
    let route = state.suggester.suggest(&request, coverage, &mut rng).await;

    Ok(Json(route.into_iter().collect()))
}
