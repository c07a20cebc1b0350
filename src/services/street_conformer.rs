use crate::constants::MIN_PLAUSIBLE_ROUTE_KM;
use crate::error::{AppError, Result};
use crate::models::{path_length_km, BoundingBox, GeoPoint};
use crate::services::osrm::RoutingService;
use crate::services::polyline;
use std::sync::Arc;

/// A path snapped to the street network, with a length the caller can trust.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformedPath {
    pub points: Vec<GeoPoint>,
    pub distance_km: f64,
}

/// Snaps geometric candidates onto streets through a [`RoutingService`].
#[derive(Clone)]
pub struct StreetConformer {
    router: Arc<dyn RoutingService>,
    max_waypoints: usize,
}

impl StreetConformer {
    pub fn new(router: Arc<dyn RoutingService>, max_waypoints: usize) -> Self {
        StreetConformer {
            router,
            max_waypoints: max_waypoints.max(2),
        }
    }

    pub async fn conform(&self, points: &[GeoPoint]) -> Result<ConformedPath> {
        if points.len() < 2 {
            return Err(AppError::InvalidRequest(
                "At least 2 points required to follow streets".to_string(),
            ));
        }

        let waypoints = downsample(points, self.max_waypoints);
        if waypoints.len() < points.len() {
            tracing::debug!(
                from = points.len(),
                to = waypoints.len(),
                "Downsampled candidate from {} to {} waypoints",
                points.len(),
                waypoints.len()
            );
        }

        let response = self.router.route(&waypoints).await?;

        let path: Vec<GeoPoint> = polyline::decode(&response.geometry)
            .into_iter()
            .map(GeoPoint::from)
            .collect();
        if path.len() < 2 {
            return Err(AppError::RoutingService(format!(
                "Route geometry decoded to {} points",
                path.len()
            )));
        }

        let distance_km = plausible_length_km(&path, response.distance_meters);
        tracing::debug!(
            points = path.len(),
            distance_km = %format!("{:.2}", distance_km),
            "Conformed path: {} points, {:.2}km",
            path.len(),
            distance_km
        );

        Ok(ConformedPath {
            points: path,
            distance_km,
        })
    }
}

/// Keep at most `max` points by uniform stride, always keeping both ends.
pub fn downsample(points: &[GeoPoint], max: usize) -> Vec<GeoPoint> {
    let n = points.len();
    if n <= max || max < 2 {
        return points.to_vec();
    }

    let stride = (n - 1) as f64 / (max - 1) as f64;
    (0..max)
        .map(|k| points[((k as f64 * stride).round() as usize).min(n - 1)])
        .collect()
}

/// Recomputed length, unless it is implausibly short: then the router's own
/// figure, and failing that the perimeter of the path's bounding box.
fn plausible_length_km(path: &[GeoPoint], reported_meters: f64) -> f64 {
    let recomputed = path_length_km(path);
    if recomputed >= MIN_PLAUSIBLE_ROUTE_KM {
        return recomputed;
    }

    let reported = reported_meters / 1000.0;
    if reported >= MIN_PLAUSIBLE_ROUTE_KM {
        tracing::warn!(
            recomputed_km = recomputed,
            reported_km = reported,
            "Using router-reported distance for implausibly short path"
        );
        return reported;
    }

    let estimate = BoundingBox::from_points(path)
        .map(|b| b.perimeter_km())
        .unwrap_or(recomputed);
    tracing::warn!(
        recomputed_km = recomputed,
        estimate_km = estimate,
        "Using bounding-box perimeter for implausibly short path"
    );
    estimate
}
