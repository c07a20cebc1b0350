use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use trailscout::config::SuggesterConfig;
use trailscout::models::{path_length_km, GeoPoint, Track};
use trailscout::services::osrm::{RoutingResponse, RoutingService};
use trailscout::services::polyline;
use trailscout::services::route_suggester::geometry::scale_toward_centroid;
use trailscout::services::route_suggester::RouteSuggester;
use trailscout::services::street_conformer::StreetConformer;
use trailscout::{AppError, Result};

/// Explored area used throughout the tests: roughly 2.2 km x 2 km in Berlin.
#[allow(dead_code)]
pub const MIN_LAT: f64 = 52.50;
#[allow(dead_code)]
pub const MAX_LAT: f64 = 52.52;
#[allow(dead_code)]
pub const MIN_LNG: f64 = 13.38;
#[allow(dead_code)]
pub const MAX_LNG: f64 = 13.41;

/// Two walks that together span the test area.
#[allow(dead_code)]
pub fn berlin_tracks() -> Vec<Track> {
    let walk = |points: &[(f64, f64)]| {
        Track::new(
            "walk.gpx".to_string(),
            points.iter().map(|&p| GeoPoint::from(p)).collect(),
            1800.0,
        )
    };

    vec![
        walk(&[(MIN_LAT, MIN_LNG), (52.505, 13.39), (52.51, 13.395)]),
        walk(&[(52.51, 13.40), (52.515, 13.405), (MAX_LAT, MAX_LNG)]),
    ]
}

/// A `RoutingService` whose answers come from a closure of
/// `(call index, waypoints) -> path`.
#[allow(dead_code)]
pub struct ScriptedRouter<F> {
    respond: F,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl<F> ScriptedRouter<F>
where
    F: Fn(usize, &[GeoPoint]) -> Result<Vec<GeoPoint>> + Send + Sync,
{
    pub fn new(respond: F) -> Arc<Self> {
        Arc::new(ScriptedRouter {
            respond,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F> RoutingService for ScriptedRouter<F>
where
    F: Fn(usize, &[GeoPoint]) -> Result<Vec<GeoPoint>> + Send + Sync,
{
    async fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutingResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let path = (self.respond)(call, waypoints)?;
        Ok(RoutingResponse {
            geometry: polyline::encode(&path),
            distance_meters: path_length_km(&path) * 1000.0,
        })
    }
}

/// Streets exactly where the waypoints are.
#[allow(dead_code)]
pub fn echo_router(
) -> Arc<ScriptedRouter<impl Fn(usize, &[GeoPoint]) -> Result<Vec<GeoPoint>> + Send + Sync>> {
    ScriptedRouter::new(|_, waypoints: &[GeoPoint]| Ok(waypoints.to_vec()))
}

/// Every request fails as an unreachable service would.
#[allow(dead_code)]
pub fn failing_router(
) -> Arc<ScriptedRouter<impl Fn(usize, &[GeoPoint]) -> Result<Vec<GeoPoint>> + Send + Sync>> {
    ScriptedRouter::new(|_, _: &[GeoPoint]| {
        Err(AppError::RoutingService("connection refused".to_string()))
    })
}

/// Detours that make every route `factor` times as long as its waypoints.
#[allow(dead_code)]
pub fn inflating_router(
    factor: f64,
) -> Arc<ScriptedRouter<impl Fn(usize, &[GeoPoint]) -> Result<Vec<GeoPoint>> + Send + Sync>> {
    ScriptedRouter::new(move |_, waypoints: &[GeoPoint]| {
        Ok(scale_toward_centroid(waypoints, factor))
    })
}

/// Always the same path, whatever was asked for.
#[allow(dead_code)]
pub fn fixed_router(
    path: Vec<GeoPoint>,
) -> Arc<ScriptedRouter<impl Fn(usize, &[GeoPoint]) -> Result<Vec<GeoPoint>> + Send + Sync>> {
    ScriptedRouter::new(move |_, _: &[GeoPoint]| Ok(path.clone()))
}

/// Closed square of `half_side_deg` around `center`.
#[allow(dead_code)]
pub fn square_path(center: GeoPoint, half_side_deg: f64) -> Vec<GeoPoint> {
    let (lat, lng, h) = (center.lat, center.lng, half_side_deg);
    vec![
        GeoPoint::new_unchecked(lat - h, lng - h),
        GeoPoint::new_unchecked(lat - h, lng + h),
        GeoPoint::new_unchecked(lat + h, lng + h),
        GeoPoint::new_unchecked(lat + h, lng - h),
        GeoPoint::new_unchecked(lat - h, lng - h),
    ]
}

#[allow(dead_code)]
pub fn test_suggester(router: Arc<dyn RoutingService>) -> RouteSuggester {
    let config = SuggesterConfig::default();
    RouteSuggester::new(StreetConformer::new(router, config.max_waypoints), config)
}

/// Check if real routing-service tests were requested
#[allow(dead_code)]
pub fn should_run_real_api_tests() -> bool {
    std::env::var("RUN_REAL_API_TESTS").is_ok()
}
