use crate::error::{AppError, Result};
use crate::models::GeoPoint;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// A street-network router that turns waypoints into a followable path.
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Best route visiting `waypoints` in order.
    async fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutingResponse>;
}

/// The single best route, geometry still encoded.
#[derive(Debug, Clone)]
pub struct RoutingResponse {
    /// Encoded polyline, precision 5
    pub geometry: String,
    pub distance_meters: f64,
}

/// Client for the OSRM `route` service.
#[derive(Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    pub fn new(base_url: String, profile: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(OsrmClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            profile,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn route_url(&self, waypoints: &[GeoPoint]) -> String {
        // OSRM expects "lng,lat;lng,lat;..."
        let coordinates = waypoints
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!("{}/route/v1/{}/{}", self.base_url, self.profile, coordinates)
    }
}

#[async_trait]
impl RoutingService for OsrmClient {
    async fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutingResponse> {
        if waypoints.len() < 2 {
            return Err(AppError::InvalidRequest(
                "At least 2 waypoints required".to_string(),
            ));
        }

        tracing::debug!(
            waypoints = waypoints.len(),
            profile = %self.profile,
            "OSRM request: {} waypoints",
            waypoints.len()
        );

        let response = self
            .client
            .get(self.route_url(waypoints))
            .query(&[
                ("overview", "full"),
                ("geometries", "polyline"),
                ("alternatives", "false"),
                ("steps", "false"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::RoutingService("Request timed out".to_string())
                } else {
                    AppError::RoutingService(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                waypoints = waypoints.len(),
                "OSRM HTTP error {}: {}",
                status,
                error_text
            );
            return Err(AppError::RoutingService(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: OsrmRouteResponse = response
            .json()
            .await
            .map_err(|e| AppError::RoutingService(format!("Failed to parse response: {}", e)))?;

        if body.code != "Ok" {
            tracing::warn!(code = %body.code, "OSRM returned no valid route");
            return Err(AppError::RoutingService(format!(
                "OSRM returned code {}",
                body.code
            )));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| AppError::RoutingService("No routes found".to_string()))?;

        tracing::debug!(
            distance_km = %format!("{:.2}", route.distance / 1000.0),
            duration_min = %format!("{:.0}", route.duration / 60.0),
            "OSRM response: {:.2}km",
            route.distance / 1000.0
        );

        Ok(RoutingResponse {
            geometry: route.geometry,
            distance_meters: route.distance,
        })
    }
}

// OSRM API response types

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
    distance: f64, // meters
    #[serde(default)]
    duration: f64, // seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OsrmClient {
        OsrmClient::new(
            "http://localhost:5000/".to_string(),
            "walking".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_is_normalized() {
        assert_eq!(client().base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_route_url_uses_lng_lat_order() {
        let url = client().route_url(&[
            GeoPoint::new_unchecked(52.5, 13.4),
            GeoPoint::new_unchecked(52.6, 13.5),
        ]);
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/walking/13.4,52.5;13.5,52.6"
        );
    }

    #[test]
    fn test_response_parsing() {
        let body: OsrmRouteResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[{"geometry":"_p~iF~ps|U","distance":1234.5,"duration":900.0}],"waypoints":[]}"#,
        )
        .unwrap();
        assert_eq!(body.code, "Ok");
        assert_eq!(body.routes[0].distance, 1234.5);

        let body: OsrmRouteResponse =
            serde_json::from_str(r#"{"code":"NoRoute","message":"Impossible route"}"#).unwrap();
        assert!(body.routes.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_single_waypoint() {
        let result = client()
            .route(&[GeoPoint::new_unchecked(52.5, 13.4)])
            .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }
}
