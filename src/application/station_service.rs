// Station service - Use cases for listing stations and derived alerts
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::station_repository::{StationRepository, StationRow};
use crate::domain::alert::{Alert, derive_alerts};
use crate::domain::estimation::GeoPoint;
use crate::domain::station::{LevelReading, Station, StationStatus};

/// History kept per station after collation.
const MAX_RECENT_READINGS: usize = 24;

#[derive(Clone)]
pub struct StationService {
    repository: Arc<dyn StationRepository>,
}

impl StationService {
    pub fn new(repository: Arc<dyn StationRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_stations(&self) -> anyhow::Result<Vec<Station>> {
        let rows = self.repository.fetch_station_rows().await?;
        Ok(collate_latest(rows))
    }

    pub async fn station_by_id(&self, id: &str) -> anyhow::Result<Option<Station>> {
        let stations = self.list_stations().await?;
        Ok(stations.into_iter().find(|s| s.id == id))
    }

    pub async fn list_alerts(&self) -> anyhow::Result<Vec<Alert>> {
        let stations = self.list_stations().await?;
        Ok(derive_alerts(&stations))
    }
}

/// Deduplicate raw rows to one station per serial number.
///
/// Rows are sorted newest first (stable, so the backend's order breaks
/// timestamp ties); the first row per serial becomes the station's current
/// state and the rest fold into its recent history. Data hygiene happens
/// here, upstream of the estimation kernel, which trusts the collated list.
pub fn collate_latest(mut rows: Vec<StationRow>) -> Vec<Station> {
    rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    let mut order: Vec<String> = Vec::new();
    let mut stations: HashMap<String, Station> = HashMap::new();

    for row in rows {
        match stations.get_mut(&row.serial_number) {
            Some(station) => {
                if station.recent_readings.len() < MAX_RECENT_READINGS {
                    station.recent_readings.push(level_reading(&row));
                }
            }
            None => {
                order.push(row.serial_number.clone());
                stations.insert(row.serial_number.clone(), station_from_latest(row));
            }
        }
    }

    order
        .into_iter()
        .filter_map(|serial| stations.remove(&serial))
        .collect()
}

fn station_from_latest(row: StationRow) -> Station {
    let head = level_reading(&row);
    Station {
        id: row.serial_number,
        name: row.station_name,
        district: row.district,
        state: row.state,
        position: GeoPoint::new(row.latitude, row.longitude),
        current_level_m: row.water_level_m,
        status: StationStatus::from_depth(row.water_level_m),
        battery_percent: row.battery_percent,
        signal_strength: row.signal_strength,
        last_updated: row.recorded_at,
        recent_readings: vec![head],
    }
}

fn level_reading(row: &StationRow) -> LevelReading {
    LevelReading {
        recorded_at: row.recorded_at,
        level_m: row.water_level_m,
        temperature_c: row.temperature_c,
    }
}
