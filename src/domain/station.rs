// Station domain models
use chrono::{DateTime, Utc};

use crate::domain::estimation::{GeoPoint, Reading};

/// Depth at or beyond which a station is considered critical, in meters
/// below reference.
pub const CRITICAL_DEPTH_M: f64 = 25.0;
/// Depth at or beyond which a station is considered in warning.
pub const WARNING_DEPTH_M: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StationStatus {
    Normal,
    Warning,
    Critical,
}

impl StationStatus {
    /// Classify a water depth. Larger depth means a lower water table.
    pub fn from_depth(level_m: f64) -> Self {
        if level_m >= CRITICAL_DEPTH_M {
            StationStatus::Critical
        } else if level_m >= WARNING_DEPTH_M {
            StationStatus::Warning
        } else {
            StationStatus::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Normal => "normal",
            StationStatus::Warning => "warning",
            StationStatus::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelReading {
    pub recorded_at: DateTime<Utc>,
    pub level_m: f64,
    pub temperature_c: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// DWLR serial number, e.g. "DWLR_001".
    pub id: String,
    pub name: String,
    pub district: String,
    pub state: String,
    pub position: GeoPoint,
    pub current_level_m: f64,
    pub status: StationStatus,
    pub battery_percent: i32,
    pub signal_strength: i32,
    pub last_updated: DateTime<Utc>,
    /// Recent observations, newest first. The head mirrors the current level.
    pub recent_readings: Vec<LevelReading>,
}

impl Station {
    /// The estimation-kernel view of this station: its latest observation.
    pub fn to_reading(&self) -> Reading {
        Reading::new(self.id.clone(), self.position, self.current_level_m)
    }
}
