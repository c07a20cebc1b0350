//! Fixed sequences of re-seeded conform attempts, tried when the first
//! street-conformed candidate misses the requested distance.

use super::candidate_shapes::{diametric, regular_polygon, square};
use super::geometry::scale_toward_centroid;
use crate::constants::*;
use crate::models::GeoPoint;
use crate::services::street_conformer::{ConformedPath, StreetConformer};

/// How to build the waypoints of one rung.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    /// The pre-conform candidate, scaled toward its centroid
    Scaled { factor: f64 },
    Square { center: GeoPoint, half_side_deg: f64 },
    Polygon {
        center: GeoPoint,
        radius_deg: f64,
        vertices: usize,
    },
    Diametric { center: GeoPoint, offset_deg: f64 },
}

impl Seed {
    pub fn points(&self, candidate: &[GeoPoint]) -> Vec<GeoPoint> {
        match self {
            Seed::Scaled { factor } => scale_toward_centroid(candidate, *factor),
            Seed::Square {
                center,
                half_side_deg,
            } => square(center, *half_side_deg),
            Seed::Polygon {
                center,
                radius_deg,
                vertices,
            } => regular_polygon(center, *radius_deg, *vertices),
            Seed::Diametric { center, offset_deg } => diametric(center, *offset_deg),
        }
    }
}

/// What a conformed length must satisfy for the ladder to stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Goal {
    AtMost(f64),
    AtLeast(f64),
}

impl Goal {
    pub fn accepts(&self, distance_km: f64) -> bool {
        match *self {
            Goal::AtMost(limit) => distance_km <= limit,
            Goal::AtLeast(min) => distance_km >= min,
        }
    }

    /// Whether `candidate` is closer to the goal than `incumbent`.
    pub fn prefers(&self, candidate_km: f64, incumbent_km: f64) -> bool {
        match self {
            Goal::AtMost(_) => candidate_km < incumbent_km,
            Goal::AtLeast(_) => candidate_km > incumbent_km,
        }
    }
}

/// Result of climbing a ladder.
#[derive(Debug, Clone, PartialEq)]
pub enum Climb {
    Accepted(ConformedPath),
    /// No rung met the goal; carries the best conformed path seen, the
    /// starting path included.
    Exhausted(ConformedPath),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ladder {
    pub goal: Goal,
    pub rungs: Vec<Seed>,
}

impl Ladder {
    /// Shrinking rungs for a conformed path of `conformed_km` that exceeds `max_km`.
    /// A rung is accepted up to `max_km * slack`.
    pub fn shrink(candidate_center: GeoPoint, max_km: f64, conformed_km: f64, slack: f64) -> Self {
        let ratio = max_km / conformed_km;
        let mut rungs: Vec<Seed> = MAX_LADDER_SHRINK_FACTORS
            .iter()
            .map(|f| Seed::Scaled { factor: f * ratio })
            .collect();
        rungs.push(Seed::Square {
            center: candidate_center,
            half_side_deg: max_km / MAX_LADDER_SQUARE_DIVISOR / KM_PER_DEGREE,
        });

        Ladder {
            goal: Goal::AtMost(max_km * slack),
            rungs,
        }
    }

    /// Growing rungs around `center` for a conformed path shorter than `min_km`.
    pub fn grow(center: GeoPoint, min_km: f64) -> Self {
        let radius_deg = (min_km / MIN_LADDER_POLYGON_DIVISOR).sqrt() / KM_PER_DEGREE;
        let mut rungs = vec![
            Seed::Polygon {
                center,
                radius_deg,
                vertices: MIN_LADDER_POLYGON_VERTICES,
            },
            Seed::Polygon {
                center,
                radius_deg: radius_deg * MIN_LADDER_POLYGON_GROWTH,
                vertices: MIN_LADDER_POLYGON_VERTICES,
            },
        ];
        rungs.extend(
            MIN_LADDER_DIAMETRIC_DIVISORS
                .iter()
                .map(|d| Seed::Diametric {
                    center,
                    offset_deg: (min_km / d).sqrt() / KM_PER_DEGREE,
                }),
        );

        Ladder {
            goal: Goal::AtLeast(min_km),
            rungs,
        }
    }

    /// Conform each rung in order until one meets the goal. A rung the router
    /// rejects is skipped.
    pub async fn climb(
        &self,
        conformer: &StreetConformer,
        candidate: &[GeoPoint],
        start: ConformedPath,
    ) -> Climb {
        let mut best = start;

        for (step, seed) in self.rungs.iter().enumerate() {
            let waypoints = seed.points(candidate);
            let conformed = match conformer.conform(&waypoints).await {
                Ok(conformed) => conformed,
                Err(e) => {
                    tracing::debug!(step, error = %e, "Ladder rung failed to conform");
                    continue;
                }
            };

            tracing::debug!(
                step,
                distance_km = %format!("{:.2}", conformed.distance_km),
                goal = ?self.goal,
                "Ladder rung conformed to {:.2}km",
                conformed.distance_km
            );

            if self.goal.accepts(conformed.distance_km) {
                tracing::info!(step, goal = ?self.goal, "Ladder rung accepted");
                return Climb::Accepted(conformed);
            }
            if self.goal.prefers(conformed.distance_km, best.distance_km) {
                best = conformed;
            }
        }

        tracing::info!(
            rungs = self.rungs.len(),
            best_km = %format!("{:.2}", best.distance_km),
            "Ladder exhausted"
        );
        Climb::Exhausted(best)
    }
}
