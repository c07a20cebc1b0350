use crate::constants::*;
use crate::models::GeoPoint;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub frontend_dir: PathBuf,
    pub osrm_base_url: String,
    pub routing_profile: String,
    pub routing_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub suggester: SuggesterConfig,
}

#[derive(Debug, Clone)]
pub struct SuggesterConfig {
    /// Perimeter corner jitter as a fraction of the box span (0.05 = ±5%)
    pub jitter_fraction: f64,

    /// Waypoints sent per routing call; longer candidates are downsampled
    pub max_waypoints: usize,

    /// Padding added on every side of the explored box before the proximity check,
    /// as a fraction of the box span
    pub proximity_padding: f64,

    /// Share of a conformed route's points that must fall inside the padded box
    pub proximity_min_fraction: f64,

    /// A ladder rung satisfies a max-distance request when its conformed length
    /// is at most `max * max_distance_slack`
    pub max_distance_slack: f64,

    /// Where routes are anchored before any track has been imported
    pub default_anchor: GeoPoint,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            jitter_fraction: 0.05,
            max_waypoints: 100,
            proximity_padding: 0.5,
            proximity_min_fraction: 0.5,
            max_distance_slack: 1.1,
            // Berlin
            default_anchor: GeoPoint::new_unchecked(52.52, 13.405),
        }
    }
}

impl SuggesterConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let jitter_fraction: f64 = env::var("SUGGEST_JITTER_FRACTION")
            .unwrap_or_else(|_| defaults.jitter_fraction.to_string())
            .parse()
            .map_err(|_| "Invalid SUGGEST_JITTER_FRACTION")?;
        if !(0.0..0.5).contains(&jitter_fraction) {
            return Err("SUGGEST_JITTER_FRACTION must be in [0, 0.5)".to_string());
        }

        let max_waypoints: usize = env::var("SUGGEST_MAX_WAYPOINTS")
            .unwrap_or_else(|_| defaults.max_waypoints.to_string())
            .parse()
            .map_err(|_| "Invalid SUGGEST_MAX_WAYPOINTS")?;
        if !(2..=ROUTING_SERVICE_WAYPOINT_CEILING).contains(&max_waypoints) {
            return Err(format!(
                "SUGGEST_MAX_WAYPOINTS must be between 2 and {}",
                ROUTING_SERVICE_WAYPOINT_CEILING
            ));
        }

        let default_anchor_lat: f64 = env::var("SUGGEST_DEFAULT_ANCHOR_LAT")
            .unwrap_or_else(|_| defaults.default_anchor.lat.to_string())
            .parse()
            .map_err(|_| "Invalid SUGGEST_DEFAULT_ANCHOR_LAT")?;
        let default_anchor_lng: f64 = env::var("SUGGEST_DEFAULT_ANCHOR_LNG")
            .unwrap_or_else(|_| defaults.default_anchor.lng.to_string())
            .parse()
            .map_err(|_| "Invalid SUGGEST_DEFAULT_ANCHOR_LNG")?;

        Ok(Self {
            jitter_fraction,
            max_waypoints,
            proximity_padding: env::var("SUGGEST_PROXIMITY_PADDING")
                .unwrap_or_else(|_| defaults.proximity_padding.to_string())
                .parse()
                .map_err(|_| "Invalid SUGGEST_PROXIMITY_PADDING")?,

            proximity_min_fraction: env::var("SUGGEST_PROXIMITY_MIN_FRACTION")
                .unwrap_or_else(|_| defaults.proximity_min_fraction.to_string())
                .parse()
                .map_err(|_| "Invalid SUGGEST_PROXIMITY_MIN_FRACTION")?,

            max_distance_slack: env::var("SUGGEST_MAX_DISTANCE_SLACK")
                .unwrap_or_else(|_| defaults.max_distance_slack.to_string())
                .parse()
                .map_err(|_| "Invalid SUGGEST_MAX_DISTANCE_SLACK")?,

            default_anchor: GeoPoint::new(default_anchor_lat, default_anchor_lng)?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let routing_timeout_secs: u64 = env::var("ROUTING_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_ROUTING_TIMEOUT_SECONDS.to_string())
            .parse()
            .map_err(|_| "Invalid ROUTING_TIMEOUT_SECS")?;

        if routing_timeout_secs == 0 || routing_timeout_secs > 120 {
            return Err("ROUTING_TIMEOUT_SECS must be between 1 and 120 seconds".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string())
                .into(),
            frontend_dir: env::var("FRONTEND_DIR")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_DIR.to_string())
                .into(),
            osrm_base_url: env::var("OSRM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OSRM_BASE_URL.to_string()),
            routing_profile: env::var("ROUTING_PROFILE")
                .unwrap_or_else(|_| DEFAULT_ROUTING_PROFILE.to_string()),
            routing_timeout_secs,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .map_err(|_| "Invalid MAX_UPLOAD_BYTES")?,
            suggester: SuggesterConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn routing_timeout(&self) -> Duration {
        Duration::from_secs(self.routing_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "HOST",
        "PORT",
        "DATA_DIR",
        "ROUTING_TIMEOUT_SECS",
        "SUGGEST_JITTER_FRACTION",
        "SUGGEST_MAX_WAYPOINTS",
        "SUGGEST_DEFAULT_ANCHOR_LAT",
        "SUGGEST_DEFAULT_ANCHOR_LNG",
        "OSRM_BASE_URL",
    ];

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn set_var(key: &str, value: &str) {
        env::set_var(key, value);
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_vars();
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.osrm_base_url, DEFAULT_OSRM_BASE_URL);
        assert_eq!(config.routing_timeout(), Duration::from_secs(10));
        assert_eq!(config.suggester.max_waypoints, 100);
        assert_eq!(config.suggester.default_anchor.lat, 52.52);
        assert_eq!(config.server_address(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_vars();
        set_var("PORT", "9000");
        set_var("DATA_DIR", "/tmp/tracks");
        set_var("SUGGEST_MAX_WAYPOINTS", "50");
        set_var("SUGGEST_DEFAULT_ANCHOR_LAT", "48.8566");
        set_var("SUGGEST_DEFAULT_ANCHOR_LNG", "2.3522");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tracks"));
        assert_eq!(config.suggester.max_waypoints, 50);
        assert_eq!(config.suggester.default_anchor.lng, 2.3522);
        clear_vars();
    }

    #[test]
    #[serial]
    fn test_rejects_out_of_range_values() {
        clear_vars();
        set_var("ROUTING_TIMEOUT_SECS", "0");
        assert!(Config::from_env().is_err());

        clear_vars();
        set_var("SUGGEST_MAX_WAYPOINTS", "1000");
        assert!(Config::from_env().is_err());

        clear_vars();
        set_var("SUGGEST_JITTER_FRACTION", "abc");
        assert!(Config::from_env().is_err());

        clear_vars();
        set_var("SUGGEST_DEFAULT_ANCHOR_LAT", "95.0");
        assert!(Config::from_env().is_err());
        clear_vars();
    }
}
