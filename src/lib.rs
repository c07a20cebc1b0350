// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use error::{AppError, Result};

use services::route_suggester::RouteSuggester;
use services::track_import::TrackImporter;
use std::sync::Arc;
use store::TrackStore;

// App state for sharing across the application
pub struct AppState {
    pub store: Arc<TrackStore>,
    pub importer: TrackImporter,
    pub suggester: RouteSuggester,
    pub routing_base_url: String,
}
