use crate::constants::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(GeoPoint { lat, lng })
    }

    /// Build a point without range checks. Candidate shaping works in degree
    /// space and may momentarily produce offsets outside the valid range.
    pub fn new_unchecked(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Great-circle distance in kilometers (haversine, spherical Earth).
    /// Bitwise-identical points return exactly 0.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        if self.lat == other.lat && self.lng == other.lng {
            return 0.0;
        }

        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

/// Sum of consecutive great-circle distances in km; 0 for fewer than 2 points.
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

impl From<(f64, f64)> for GeoPoint {
    /// `(lat, lng)` as produced by the polyline decoder
    fn from((lat, lng): (f64, f64)) -> Self {
        GeoPoint { lat, lng }
    }
}
