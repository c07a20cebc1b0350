//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For tuning knobs that benefit from runtime experimentation, see
//! [`SuggesterConfig`](crate::config::SuggesterConfig) instead.

// --- Server defaults (used when env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "8080";
/// Directory where uploaded GPX files are persisted and reloaded from.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Directory served as static files for every non-API path.
pub const DEFAULT_FRONTEND_DIR: &str = "frontend";
/// Upload size ceiling (10 MiB). Overridden by `MAX_UPLOAD_BYTES`.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// --- Routing service defaults ---

/// Public OSRM demo server. Overridden by `OSRM_BASE_URL`.
pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";
/// OSRM profile used for every request. Overridden by `ROUTING_PROFILE`.
pub const DEFAULT_ROUTING_PROFILE: &str = "walking";
/// Upper bound on a single routing call. Overridden by `ROUTING_TIMEOUT_SECS`.
pub const DEFAULT_ROUTING_TIMEOUT_SECONDS: u64 = 10;
/// Waypoint count above which the public OSRM server rejects a request.
pub const ROUTING_SERVICE_WAYPOINT_CEILING: usize = 500;

// --- Request bounds ---

/// Largest accepted `minDistance`/`maxDistance` (km). Anything beyond is not a walk.
pub const MAX_REQUEST_DISTANCE_KM: f64 = 5000.0;

// --- Geodesy ---

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Rough length of one degree of latitude, used to turn km targets into degree offsets.
pub const KM_PER_DEGREE: f64 = 111.0;
/// Fixed-point scale of the encoded polyline format (5 decimal places).
pub const POLYLINE_PRECISION: f64 = 1e5;

// --- Candidate shaping ---

/// Perpendicular offset (degrees, ~1.1 km) of each inserted zigzag point.
pub const ZIGZAG_OFFSET_DEG: f64 = 0.01;
/// Upper bound on the points a single zigzag pass may insert across all segments.
pub const ZIGZAG_MAX_INSERTED_POINTS: usize = 10_000;
/// Conformed lengths below this are treated as measurement noise, not real routes.
pub const MIN_PLAUSIBLE_ROUTE_KM: f64 = 0.1;
/// Half-span (degrees) of the synthetic coverage box around the default anchor.
pub const DEFAULT_ANCHOR_HALF_SPAN_DEG: f64 = 0.01;

// --- Max-distance ladder ---
// Rungs tried in order when the conformed candidate is longer than requested.

/// Shrink factors applied to `max / conformed_length` for the first two rungs.
pub const MAX_LADDER_SHRINK_FACTORS: [f64; 2] = [0.8, 0.5];
/// The fixed square rung has a half-side of `max_km / MAX_LADDER_SQUARE_DIVISOR` km.
pub const MAX_LADDER_SQUARE_DIVISOR: f64 = 10.0;

// --- Min-distance ladder ---
// Rungs tried in order when the conformed candidate is shorter than requested.

/// Vertex count of the polygon rungs (a pentagon keeps well under waypoint limits).
pub const MIN_LADDER_POLYGON_VERTICES: usize = 5;
/// First polygon rung radius is `sqrt(min_km / MIN_LADDER_POLYGON_DIVISOR) / KM_PER_DEGREE`.
pub const MIN_LADDER_POLYGON_DIVISOR: f64 = 10.0;
/// Second polygon rung radius multiplier.
pub const MIN_LADDER_POLYGON_GROWTH: f64 = 2.0;
/// Diametric rung divisors: offsets are `sqrt(min_km / d) / KM_PER_DEGREE`.
pub const MIN_LADDER_DIAMETRIC_DIVISORS: [f64; 2] = [2.0, 1.0];
