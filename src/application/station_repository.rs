// Repository trait for station telemetry access
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One backend row: a single observation for a station serial number.
/// The backend keeps full history, so several rows may share a serial.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationRow {
    pub serial_number: String,
    pub station_name: String,
    pub district: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub water_level_m: f64,
    pub temperature_c: Option<f64>,
    pub battery_percent: i32,
    pub signal_strength: i32,
    pub recorded_at: DateTime<Utc>,
}

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Fetch station reading rows, newest first.
    async fn fetch_station_rows(&self) -> anyhow::Result<Vec<StationRow>>;
}
