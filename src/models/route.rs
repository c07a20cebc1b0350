use crate::constants::MAX_REQUEST_DISTANCE_KM;
use crate::models::{path_length_km, GeoPoint};
use serde::{Deserialize, Serialize};

/// The engine's single output: a closed loop to try next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedRoute {
    pub points: Vec<GeoPoint>,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    pub follows_streets: bool,
}

impl SuggestedRoute {
    /// Distance is always recomputed from `points`.
    pub fn from_geometry(points: Vec<GeoPoint>, follows_streets: bool) -> Self {
        SuggestedRoute {
            distance_km: path_length_km(&points),
            points,
            follows_streets,
        }
    }

    /// A route with at least two points; anything shorter is no suggestion at all.
    pub fn is_usable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Distance constraints for a suggestion. A zero distance means "unset".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub min_distance_km: f64,
    pub max_distance_km: f64,
    pub follow_streets: bool,
}

impl Default for RouteRequest {
    fn default() -> Self {
        RouteRequest {
            min_distance_km: 0.0,
            max_distance_km: 0.0,
            follow_streets: true,
        }
    }
}

impl RouteRequest {
    pub fn min(&self) -> Option<f64> {
        (self.min_distance_km > 0.0).then_some(self.min_distance_km)
    }

    pub fn max(&self) -> Option<f64> {
        (self.max_distance_km > 0.0).then_some(self.max_distance_km)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("minDistance", self.min_distance_km),
            ("maxDistance", self.max_distance_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number", name));
            }
            if value > MAX_REQUEST_DISTANCE_KM {
                return Err(format!(
                    "{} must be at most {} km",
                    name, MAX_REQUEST_DISTANCE_KM
                ));
            }
        }
        Ok(())
    }

    /// Swap min and max when both are set and given in the wrong order.
    pub fn normalized(mut self) -> Self {
        if let (Some(min), Some(max)) = (self.min(), self.max()) {
            if min > max {
                self.min_distance_km = max;
                self.max_distance_km = min;
            }
        }
        self
    }
}

// Request types for API endpoints

/// Query string of `GET /routes/suggest`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestQuery {
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub follow_streets: Option<bool>,
}

impl SuggestQuery {
    pub fn into_request(self) -> Result<RouteRequest, String> {
        let request = RouteRequest {
            min_distance_km: self.min_distance.unwrap_or(0.0),
            max_distance_km: self.max_distance.unwrap_or(0.0),
            follow_streets: self.follow_streets.unwrap_or(true),
        };
        request.validate()?;
        Ok(request.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_geometry_recomputes_distance() {
        let route = SuggestedRoute::from_geometry(
            vec![
                GeoPoint::new_unchecked(52.5208, 13.4094),
                GeoPoint::new_unchecked(52.5163, 13.3777),
            ],
            false,
        );
        assert!(route.distance_km > 2.0 && route.distance_km < 2.4);
        assert!(route.is_usable());
        assert!(!SuggestedRoute::from_geometry(vec![], true).is_usable());
    }

    #[test]
    fn test_suggested_route_wire_format() {
        let route =
            SuggestedRoute::from_geometry(vec![GeoPoint::new_unchecked(1.0, 2.0)], true);
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["distance"], 0.0);
        assert_eq!(json["followsStreets"], true);
        assert_eq!(json["points"][0]["lat"], 1.0);
        assert_eq!(json["points"][0]["lng"], 2.0);
    }

    #[test]
    fn test_request_defaults() {
        let request = RouteRequest::default();
        assert!(request.follow_streets);
        assert_eq!(request.min(), None);
        assert_eq!(request.max(), None);
    }

    #[test]
    fn test_normalized_swaps_inverted_bounds() {
        let request = RouteRequest {
            min_distance_km: 10.0,
            max_distance_km: 2.0,
            follow_streets: false,
        }
        .normalized();
        assert_eq!(request.min(), Some(2.0));
        assert_eq!(request.max(), Some(10.0));

        // Only one bound set: nothing to swap
        let request = RouteRequest {
            min_distance_km: 10.0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(request.min(), Some(10.0));
        assert_eq!(request.max(), None);
    }

    #[test]
    fn test_query_validation() {
        let query = SuggestQuery {
            min_distance: Some(-1.0),
            ..Default::default()
        };
        assert!(query.into_request().is_err());

        let query = SuggestQuery {
            max_distance: Some(f64::NAN),
            ..Default::default()
        };
        assert!(query.into_request().is_err());

        let request = SuggestQuery::default().into_request().unwrap();
        assert_eq!(request, RouteRequest::default());
    }

    #[test]
    fn test_query_rejects_distances_beyond_limit() {
        let query = SuggestQuery {
            min_distance: Some(1e13),
            ..Default::default()
        };
        assert!(query.into_request().is_err());

        let query = SuggestQuery {
            max_distance: Some(MAX_REQUEST_DISTANCE_KM + 1.0),
            ..Default::default()
        };
        assert!(query.into_request().is_err());

        let query = SuggestQuery {
            min_distance: Some(1000.0),
            max_distance: Some(MAX_REQUEST_DISTANCE_KM),
            ..Default::default()
        };
        assert!(query.into_request().is_ok());
    }

    #[test]
    fn test_query_deserialization() {
        let query: SuggestQuery = serde_json::from_value(serde_json::json!({
            "minDistance": 5.0,
            "maxDistance": 3.0,
            "followStreets": false
        }))
        .unwrap();
        let request = query.into_request().unwrap();
        assert_eq!(request.min_distance_km, 3.0);
        assert_eq!(request.max_distance_km, 5.0);
        assert!(!request.follow_streets);
    }
}
