// Alerts derived from station state
use chrono::{DateTime, Utc};

use crate::domain::station::{CRITICAL_DEPTH_M, Station, StationStatus};

/// Battery charge at or below which a maintenance alert is raised.
pub const LOW_BATTERY_PERCENT: i32 = 50;

/// Readings required before a trend alert can fire.
const TREND_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "critical",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: String,
    pub station_id: String,
    pub station_name: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Derive the active alerts for a set of stations.
///
/// Output order follows station order, so identical input yields identical
/// alert lists.
pub fn derive_alerts(stations: &[Station]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for station in stations {
        if station.status == StationStatus::Critical {
            alerts.push(Alert {
                id: format!("{}-level", station.id),
                station_id: station.id.clone(),
                station_name: station.name.clone(),
                severity: AlertSeverity::Critical,
                title: "Critical water level".to_string(),
                message: format!(
                    "Water level {:.2} m is below the critical threshold of {:.0} m.",
                    station.current_level_m, CRITICAL_DEPTH_M
                ),
                timestamp: station.last_updated,
            });
        }

        if station.battery_percent <= LOW_BATTERY_PERCENT {
            alerts.push(Alert {
                id: format!("{}-battery", station.id),
                station_id: station.id.clone(),
                station_name: station.name.clone(),
                severity: AlertSeverity::Warning,
                title: "Low battery".to_string(),
                message: format!(
                    "Station battery is at {}%. Maintenance required soon.",
                    station.battery_percent
                ),
                timestamp: station.last_updated,
            });
        }

        if is_declining(station) {
            alerts.push(Alert {
                id: format!("{}-trend", station.id),
                station_id: station.id.clone(),
                station_name: station.name.clone(),
                severity: AlertSeverity::Warning,
                title: "Declining trend".to_string(),
                message: "Water level has deepened across every recent reading.".to_string(),
                timestamp: station.last_updated,
            });
        } else if recharge_events(station) > 0 {
            alerts.push(Alert {
                id: format!("{}-recharge", station.id),
                station_id: station.id.clone(),
                station_name: station.name.clone(),
                severity: AlertSeverity::Info,
                title: "Recharge detected".to_string(),
                message: "Groundwater recharge observed in recent readings.".to_string(),
                timestamp: station.last_updated,
            });
        }
    }
    alerts
}

/// True when the level has deepened monotonically across the recent window.
/// Readings are newest first, so a decline means each reading is deeper than
/// the one before it.
pub fn is_declining(station: &Station) -> bool {
    let readings = &station.recent_readings;
    if readings.len() < TREND_WINDOW {
        return false;
    }
    readings.windows(2).all(|w| w[0].level_m > w[1].level_m)
}

/// Number of consecutive-reading pairs where the level rose (depth shrank).
pub fn recharge_events(station: &Station) -> usize {
    station
        .recent_readings
        .windows(2)
        .filter(|w| w[0].level_m < w[1].level_m)
        .count()
}
