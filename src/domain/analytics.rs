// Fleet analytics - array reductions over the collated station set
use std::collections::BTreeMap;

use crate::domain::alert::recharge_events;
use crate::domain::station::{Station, StationStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct RegionalSummary {
    pub state: String,
    pub average_level_m: f64,
    pub status: StationStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FleetAnalytics {
    /// None when there are no stations, never NaN.
    pub average_level_m: Option<f64>,
    pub recharge_events: usize,
    pub critical_stations: usize,
    pub regional: Vec<RegionalSummary>,
}

impl FleetAnalytics {
    pub fn compute(stations: &[Station]) -> Self {
        let average_level_m = if stations.is_empty() {
            None
        } else {
            let sum: f64 = stations.iter().map(|s| s.current_level_m).sum();
            Some(sum / stations.len() as f64)
        };

        let recharge_events = stations.iter().map(recharge_events).sum();
        let critical_stations = stations
            .iter()
            .filter(|s| s.status == StationStatus::Critical)
            .count();

        // BTreeMap keeps regions in state-name order for deterministic output.
        let mut by_state: BTreeMap<&str, Vec<&Station>> = BTreeMap::new();
        for station in stations {
            by_state.entry(station.state.as_str()).or_default().push(station);
        }

        let regional = by_state
            .into_iter()
            .map(|(state, members)| {
                let sum: f64 = members.iter().map(|s| s.current_level_m).sum();
                let status = members
                    .iter()
                    .map(|s| s.status)
                    .max()
                    .unwrap_or(StationStatus::Normal);
                RegionalSummary {
                    state: state.to_string(),
                    average_level_m: sum / members.len() as f64,
                    status,
                }
            })
            .collect();

        Self {
            average_level_m,
            recharge_events,
            critical_stations,
            regional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::estimation::GeoPoint;
    use crate::domain::station::LevelReading;
    use chrono::{TimeZone, Utc};

    fn station(id: &str, state: &str, level_m: f64, levels: &[f64]) -> Station {
        let base = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        Station {
            id: id.to_string(),
            name: id.to_string(),
            district: "d".to_string(),
            state: state.to_string(),
            position: GeoPoint::new(25.0, 85.0),
            current_level_m: level_m,
            status: StationStatus::from_depth(level_m),
            battery_percent: 80,
            signal_strength: 70,
            last_updated: base,
            recent_readings: levels
                .iter()
                .enumerate()
                .map(|(i, &level_m)| LevelReading {
                    recorded_at: base - chrono::Duration::hours(i as i64),
                    level_m,
                    temperature_c: None,
                })
                .collect(),
        }
    }

    #[test]
    fn empty_fleet_has_no_average() {
        let analytics = FleetAnalytics::compute(&[]);
        assert_eq!(analytics.average_level_m, None);
        assert_eq!(analytics.critical_stations, 0);
        assert!(analytics.regional.is_empty());
    }

    #[test]
    fn averages_and_critical_count() {
        let stations = vec![
            station("a", "Bihar", 10.0, &[]),
            station("b", "Bihar", 20.0, &[]),
            station("c", "Jharkhand", 30.0, &[]),
        ];
        let analytics = FleetAnalytics::compute(&stations);
        assert_eq!(analytics.average_level_m, Some(20.0));
        assert_eq!(analytics.critical_stations, 1);
    }

    #[test]
    fn recharge_events_counted_across_fleet() {
        let stations = vec![
            // One rise: 12.45 -> 12.48 going back in time means the newest
            // reading is shallower, one recharge pair.
            station("a", "Bihar", 12.45, &[12.45, 12.48, 12.40]),
            station("b", "Bihar", 8.0, &[8.0, 8.1]),
        ];
        let analytics = FleetAnalytics::compute(&stations);
        assert_eq!(analytics.recharge_events, 2);
    }

    #[test]
    fn regional_summaries_grouped_and_ordered_by_state() {
        let stations = vec![
            station("j", "Jharkhand", 18.9, &[]),
            station("b1", "Bihar", 10.0, &[]),
            station("b2", "Bihar", 26.0, &[]),
        ];
        let analytics = FleetAnalytics::compute(&stations);
        assert_eq!(analytics.regional.len(), 2);
        assert_eq!(analytics.regional[0].state, "Bihar");
        assert_eq!(analytics.regional[0].average_level_m, 18.0);
        assert_eq!(analytics.regional[0].status, StationStatus::Critical);
        assert_eq!(analytics.regional[1].state, "Jharkhand");
        assert_eq!(analytics.regional[1].status, StationStatus::Warning);
    }
}
