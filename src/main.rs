// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::application::analytics_service::AnalyticsService;
use crate::application::station_repository::StationRepository;
use crate::application::station_service::StationService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::application::survey_service::SurveyService;
use crate::infrastructure::config::{load_backend_config, load_estimation_config};
use crate::infrastructure::rest_repository::RestStationRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_analytics, get_station, get_survey, health_check, list_alerts, list_stations,
    stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration; invalid kernel parameters abort startup
    let backend_config = load_backend_config()?;
    let estimation_config = load_estimation_config()?;
    let (idw_params, nearby_params) = estimation_config.kernel_params()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn StationRepository> = Arc::new(RestStationRepository::new(
        backend_config.backend.base_url,
        backend_config.backend.api_key,
        backend_config.backend.table,
    ));

    // Create services (application layer)
    let station_service = StationService::new(repository.clone());
    let survey_service = SurveyService::new(repository.clone(), idw_params, nearby_params);
    let analytics_service = AnalyticsService::new(repository.clone());
    let streaming_service =
        StreamingDashboardService::new(repository.clone(), survey_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        station_service,
        survey_service,
        analytics_service,
        streaming_service,
    });

    // Build router (presentation layer)
    // Note: The NDJSON stream manages its own chunking, so compression is
    // applied to the plain JSON routes only.
    let json_routes = Router::new()
        .route("/stations", get(list_stations))
        .route("/stations/:id", get(get_station))
        .route("/alerts", get(list_alerts))
        .route("/analytics", get(get_analytics))
        .route("/survey", get(get_survey))
        .layer(CompressionLayer::new());

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards/stream", get(stream_dashboard))
        .merge(json_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = "0.0.0.0:8080".parse()?;
    tracing::info!("Starting dwlr-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
