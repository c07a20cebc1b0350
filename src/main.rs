use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trailscout::config::Config;
use trailscout::services::osrm::OsrmClient;
use trailscout::services::route_suggester::RouteSuggester;
use trailscout::services::street_conformer::StreetConformer;
use trailscout::services::track_import::TrackImporter;
use trailscout::store::TrackStore;
use trailscout::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trailscout=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting trailscout server");
    tracing::info!(
        data_dir = %config.data_dir.display(),
        osrm = %config.osrm_base_url,
        profile = %config.routing_profile,
        "Configuration loaded successfully"
    );

    // Reload previously uploaded tracks
    let importer = TrackImporter::new(config.data_dir.clone());
    let tracks = importer.load_existing().await?;
    let store = Arc::new(TrackStore::with_tracks(tracks));

    // Initialize services
    let osrm = OsrmClient::new(
        config.osrm_base_url.clone(),
        config.routing_profile.clone(),
        config.routing_timeout(),
    )?;
    let routing_base_url = osrm.base_url().to_string();
    let conformer = StreetConformer::new(Arc::new(osrm), config.suggester.max_waypoints);
    let suggester = RouteSuggester::new(conformer, config.suggester.clone());

    // Create application state
    let state = Arc::new(AppState {
        store,
        importer,
        suggester,
        routing_base_url,
    });

    // API under /api/v1, everything else from the frontend directory
    let app = Router::new()
        .nest("/api/v1", trailscout::routes::create_router(state))
        .fallback_service(ServeDir::new(&config.frontend_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
