use crate::models::{path_length_km, GeoPoint};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One imported GPS recording. Read-only once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: Uuid,
    pub filename: String,
    pub points: Vec<GeoPoint>,
    pub distance_km: f64,
    pub duration_seconds: f64,
}

impl Track {
    /// Distance defaults to the length of `points` as one continuous path.
    pub fn new(filename: String, points: Vec<GeoPoint>, duration_seconds: f64) -> Self {
        Track {
            id: Uuid::new_v4(),
            filename,
            distance_km: path_length_km(&points),
            points,
            duration_seconds,
        }
    }

    /// Replace the computed distance.
    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    pub fn summary(&self) -> TrackSummary {
        TrackSummary {
            id: self.id,
            filename: self.filename.clone(),
            point_count: self.points.len(),
            distance_km: self.distance_km,
        }
    }
}

/// Compact description returned after an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub id: Uuid,
    pub filename: String,
    pub point_count: usize,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_distance() {
        let points = vec![
            GeoPoint::new(52.5208, 13.4094).unwrap(),
            GeoPoint::new(52.5163, 13.3777).unwrap(),
        ];
        let track = Track::new("walk.gpx".to_string(), points, 1800.0);
        assert!(track.distance_km > 2.0 && track.distance_km < 2.4);
        assert_eq!(track.duration_seconds, 1800.0);
    }

    #[test]
    fn test_distance_override_and_summary() {
        let track = Track::new("walk.gpx".to_string(), vec![], 0.0).with_distance_km(3.5);
        let summary = track.summary();
        assert_eq!(summary.distance_km, 3.5);
        assert_eq!(summary.point_count, 0);
        assert_eq!(summary.id, track.id);
    }

    #[test]
    fn test_serializes_camel_case() {
        let track = Track::new("walk.gpx".to_string(), vec![], 42.0);
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["filename"], "walk.gpx");
        assert_eq!(json["durationSeconds"], 42.0);
        assert!(json["distanceKm"].is_number());
        assert!(json["points"].as_array().unwrap().is_empty());
    }
}
