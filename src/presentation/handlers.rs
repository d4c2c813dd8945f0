// HTTP request handlers
use crate::domain::estimation::GeoPoint;
use crate::infrastructure::api_model::{
    AlertDto, AnalyticsDto, StationDto, alert_to_dto, analytics_to_dto, station_to_dto,
    survey_to_dto,
};
use crate::infrastructure::json_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct LocationQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl LocationQuery {
    /// Both coordinates are required to form a query point; anything less
    /// surveys without a location. Range checks stay in the kernel.
    fn to_query_point(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all stations with their latest readings
pub async fn list_stations(State(state): State<Arc<AppState>>) -> Json<Vec<StationDto>> {
    match state.station_service.list_stations().await {
        Ok(stations) => Json(stations.iter().map(station_to_dto).collect()),
        Err(e) => {
            tracing::error!("Error fetching stations: {e}");
            // Return empty list on error
            Json(Vec::new())
        }
    }
}

/// Fetch one station by serial number
pub async fn get_station(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationDto>, StatusCode> {
    match state.station_service.station_by_id(&id).await {
        Ok(Some(station)) => Ok(Json(station_to_dto(&station))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Error fetching station {id}: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// List alerts derived from current station state
pub async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<Vec<AlertDto>> {
    match state.station_service.list_alerts().await {
        Ok(alerts) => Json(alerts.iter().map(alert_to_dto).collect()),
        Err(e) => {
            tracing::error!("Error deriving alerts: {e}");
            Json(Vec::new())
        }
    }
}

/// Fleet-wide analytics
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnalyticsDto>, StatusCode> {
    match state.analytics_service.fleet_analytics().await {
        Ok(analytics) => Ok(Json(analytics_to_dto(&analytics))),
        Err(e) => {
            tracing::error!("Error computing analytics: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Survey a location: IDW estimate, contributing neighbors, nearby stations
pub async fn get_survey(
    Query(location): Query<LocationQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.survey_service.survey(location.to_query_point()).await {
        Ok(survey) => Ok(Json(survey_to_dto(&survey))),
        Err(e) => {
            tracing::error!("Error surveying location: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Stream the dashboard progressively as chunked NDJSON
pub async fn stream_dashboard(
    Query(location): Query<LocationQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.streaming_service.stream_dashboard(location.to_query_point());
    stream_from_receiver(rx)
}
