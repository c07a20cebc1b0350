pub mod coordinates;
pub mod geo;
pub mod route;
pub mod track;

pub use coordinates::{path_length_km, GeoPoint};
pub use geo::{BoundingBox, Coverage};
pub use route::{RouteRequest, SuggestQuery, SuggestedRoute};
pub use track::{Track, TrackSummary};
