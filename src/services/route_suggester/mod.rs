pub mod candidate_shapes;
pub mod geometry;
pub mod ladder;

use crate::config::SuggesterConfig;
use crate::constants::DEFAULT_ANCHOR_HALF_SPAN_DEG;
use crate::models::{path_length_km, BoundingBox, Coverage, GeoPoint, RouteRequest, SuggestedRoute};
use crate::services::street_conformer::{ConformedPath, StreetConformer};
use rand::Rng;

use candidate_shapes::perimeter;
use geometry::{centroid, scale_toward_centroid, zigzag_extend};
use ladder::{Climb, Ladder};

/// Produces one loop route per request: a jittered perimeter of the explored
/// area, fitted to the distance window, optionally snapped to streets.
pub struct RouteSuggester {
    conformer: StreetConformer,
    config: SuggesterConfig,
}

impl RouteSuggester {
    pub fn new(conformer: StreetConformer, config: SuggesterConfig) -> Self {
        RouteSuggester { conformer, config }
    }

    /// Suggest a route for `request` around `coverage`.
    ///
    /// Never fails: routing problems degrade to plain geometry with
    /// `follows_streets = false`. `None` only when no usable geometry exists.
    pub async fn suggest<R: Rng + ?Sized>(
        &self,
        request: &RouteRequest,
        coverage: Option<Coverage>,
        rng: &mut R,
    ) -> Option<SuggestedRoute> {
        let coverage = match coverage {
            Some(coverage) => coverage.with_min_extent(DEFAULT_ANCHOR_HALF_SPAN_DEG),
            None => {
                tracing::info!(
                    lat = self.config.default_anchor.lat,
                    lng = self.config.default_anchor.lng,
                    "No tracks yet, anchoring suggestion at default location"
                );
                Coverage::around(&self.config.default_anchor, DEFAULT_ANCHOR_HALF_SPAN_DEG)
            }
        };

        let seed = perimeter(&coverage.bounds, self.config.jitter_fraction, rng);
        let candidate = fit_geometry(seed, request);
        let plain = SuggestedRoute::from_geometry(candidate.clone(), false);

        tracing::info!(
            min_km = request.min_distance_km,
            max_km = request.max_distance_km,
            follow_streets = request.follow_streets,
            candidate_km = %format!("{:.2}", plain.distance_km),
            "Candidate route: {:.2}km",
            plain.distance_km
        );

        let route = if request.follow_streets {
            self.follow_streets(request, &coverage, &candidate, plain)
                .await
        } else {
            plain
        };

        if let Some(max) = request.max() {
            if route.distance_km > max {
                tracing::warn!(
                    distance_km = route.distance_km,
                    max_km = max,
                    "Final route still exceeds max distance"
                );
            }
        }

        tracing::info!(
            distance_km = %format!("{:.2}", route.distance_km),
            follows_streets = route.follows_streets,
            points = route.points.len(),
            "Suggested route: {:.2}km",
            route.distance_km
        );

        route.is_usable().then_some(route)
    }

    async fn follow_streets(
        &self,
        request: &RouteRequest,
        coverage: &Coverage,
        candidate: &[GeoPoint],
        plain: SuggestedRoute,
    ) -> SuggestedRoute {
        let conformed = match self.conformer.conform(candidate).await {
            Ok(conformed) => conformed,
            Err(e) => {
                tracing::warn!(error = %e, "Street routing failed, using plain geometry");
                return plain;
            }
        };

        let route = match (request.max(), request.min()) {
            (Some(max), _) if conformed.distance_km > max => {
                self.fit_under_max(coverage, candidate, conformed, max).await
            }
            (_, Some(min)) if conformed.distance_km < min => {
                // Meeting the minimum may require leaving the explored area,
                // so the proximity check does not apply here.
                return self.fit_over_min(coverage, candidate, conformed, min).await;
            }
            _ => route_from_conformed(conformed),
        };

        if self.is_near_existing(&route.points, &coverage.bounds) {
            route
        } else {
            tracing::info!("Street route strays too far from explored area, using plain geometry");
            plain
        }
    }

    async fn fit_under_max(
        &self,
        coverage: &Coverage,
        candidate: &[GeoPoint],
        conformed: ConformedPath,
        max: f64,
    ) -> SuggestedRoute {
        let center = centroid(candidate).unwrap_or_else(|| coverage.bounds.center());
        let ladder = Ladder::shrink(
            center,
            max,
            conformed.distance_km,
            self.config.max_distance_slack,
        );

        match ladder.climb(&self.conformer, candidate, conformed).await {
            Climb::Accepted(path) => route_from_conformed(path),
            Climb::Exhausted(best) => {
                tracing::warn!(
                    best_km = best.distance_km,
                    max_km = max,
                    "No street route under max distance, scaling best attempt"
                );
                let scaled = scale_toward_centroid(&best.points, max / best.distance_km);
                SuggestedRoute::from_geometry(scaled, false)
            }
        }
    }

    async fn fit_over_min(
        &self,
        coverage: &Coverage,
        candidate: &[GeoPoint],
        conformed: ConformedPath,
        min: f64,
    ) -> SuggestedRoute {
        let center = coverage
            .centroid
            .or_else(|| centroid(candidate))
            .unwrap_or_else(|| coverage.bounds.center());
        let ladder = Ladder::grow(center, min);

        match ladder.climb(&self.conformer, candidate, conformed).await {
            Climb::Accepted(path) => route_from_conformed(path),
            Climb::Exhausted(best) => {
                tracing::warn!(
                    best_km = best.distance_km,
                    min_km = min,
                    "No street route over min distance, extending best attempt with zigzags"
                );
                let extended = zigzag_extend(&best.points, min / best.distance_km);
                SuggestedRoute::from_geometry(extended, false)
            }
        }
    }

    /// Whether enough of `points` lies inside the explored area, padded by
    /// the configured fraction on every side.
    pub fn is_near_existing(&self, points: &[GeoPoint], bounds: &BoundingBox) -> bool {
        is_near_existing(
            points,
            bounds,
            self.config.proximity_padding,
            self.config.proximity_min_fraction,
        )
    }
}

/// Share of `points` inside `bounds` grown by `padding` of each span, compared
/// against `min_fraction`. An empty path is never near.
pub fn is_near_existing(
    points: &[GeoPoint],
    bounds: &BoundingBox,
    padding: f64,
    min_fraction: f64,
) -> bool {
    if points.is_empty() {
        return false;
    }

    let padded = bounds.padded(padding);
    let inside = points.iter().filter(|p| padded.contains(p)).count();
    let fraction = inside as f64 / points.len() as f64;

    tracing::debug!(
        inside,
        total = points.len(),
        "{:.0}% of route points inside explored area",
        fraction * 100.0
    );
    fraction >= min_fraction
}

/// Scale or zigzag the seed into the distance window, ignoring streets.
fn fit_geometry(seed: Vec<GeoPoint>, request: &RouteRequest) -> Vec<GeoPoint> {
    let length = path_length_km(&seed);
    if length <= 0.0 {
        return seed;
    }

    match (request.max(), request.min()) {
        (Some(max), _) if length > max => scale_toward_centroid(&seed, max / length),
        (_, Some(min)) if length < min => {
            let extended = zigzag_extend(&seed, min / length);
            let extended_length = path_length_km(&extended);
            match request.max() {
                Some(max) if extended_length > max => {
                    scale_toward_centroid(&extended, max / extended_length)
                }
                _ => extended,
            }
        }
        _ => seed,
    }
}

fn route_from_conformed(path: ConformedPath) -> SuggestedRoute {
    SuggestedRoute {
        points: path.points,
        distance_km: path.distance_km,
        follows_streets: true,
    }
}
