// Mapper to convert domain models to JSON wire types
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::alert::Alert;
use crate::domain::analytics::{FleetAnalytics, RegionalSummary};
use crate::domain::estimation::{Neighbor, NearbyStation};
use crate::domain::station::{LevelReading, Station};
use crate::domain::survey::LocationSurvey;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: String,
    pub name: String,
    pub district: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current_level: f64,
    pub status: &'static str,
    pub battery_level: i32,
    pub signal_strength: i32,
    pub last_updated: DateTime<Utc>,
    pub recent_readings: Vec<LevelReadingDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelReadingDto {
    pub timestamp: DateTime<Utc>,
    pub level: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborDto {
    pub id: String,
    pub distance_km: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyDto {
    pub id: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDto {
    pub estimate: Option<f64>,
    pub neighbors: Vec<NeighborDto>,
    pub nearby: Vec<NearbyDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateDto {
    pub estimate: Option<f64>,
    pub neighbors: Vec<NeighborDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    pub id: String,
    pub station_id: String,
    pub station_name: String,
    #[serde(rename = "type")]
    pub severity: &'static str,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub avg_water_level: Option<f64>,
    pub recharge_events: usize,
    pub critical_stations: usize,
    pub regional_data: Vec<RegionalDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalDto {
    pub state: String,
    pub avg_level: f64,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDto {
    pub messages: usize,
    pub duration_ms: i64,
}

/// One chunk of the progressive dashboard stream.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum StreamMessage {
    Stations(Vec<StationDto>),
    Nearby(Vec<NearbyDto>),
    Estimate(EstimateDto),
    Analytics(AnalyticsDto),
    Complete(CompletionDto),
}

pub fn station_to_dto(station: &Station) -> StationDto {
    StationDto {
        id: station.id.clone(),
        name: station.name.clone(),
        district: station.district.clone(),
        state: station.state.clone(),
        latitude: station.position.latitude,
        longitude: station.position.longitude,
        current_level: station.current_level_m,
        status: station.status.as_str(),
        battery_level: station.battery_percent,
        signal_strength: station.signal_strength,
        last_updated: station.last_updated,
        recent_readings: station.recent_readings.iter().map(reading_to_dto).collect(),
    }
}

fn reading_to_dto(reading: &LevelReading) -> LevelReadingDto {
    LevelReadingDto {
        timestamp: reading.recorded_at,
        level: reading.level_m,
        temperature: reading.temperature_c,
    }
}

pub fn neighbor_to_dto(neighbor: &Neighbor) -> NeighborDto {
    NeighborDto {
        id: neighbor.id.clone(),
        distance_km: neighbor.distance_km,
        value: neighbor.value,
    }
}

pub fn nearby_to_dto(nearby: &NearbyStation) -> NearbyDto {
    NearbyDto {
        id: nearby.id.clone(),
        distance_km: nearby.distance_km,
    }
}

pub fn survey_to_dto(survey: &LocationSurvey) -> SurveyDto {
    SurveyDto {
        estimate: survey.estimate,
        neighbors: survey.neighbors.iter().map(neighbor_to_dto).collect(),
        nearby: survey.nearby.iter().map(nearby_to_dto).collect(),
    }
}

pub fn alert_to_dto(alert: &Alert) -> AlertDto {
    AlertDto {
        id: alert.id.clone(),
        station_id: alert.station_id.clone(),
        station_name: alert.station_name.clone(),
        severity: alert.severity.as_str(),
        title: alert.title.clone(),
        message: alert.message.clone(),
        timestamp: alert.timestamp,
    }
}

pub fn analytics_to_dto(analytics: &FleetAnalytics) -> AnalyticsDto {
    AnalyticsDto {
        avg_water_level: analytics.average_level_m,
        recharge_events: analytics.recharge_events,
        critical_stations: analytics.critical_stations,
        regional_data: analytics.regional.iter().map(regional_to_dto).collect(),
    }
}

fn regional_to_dto(regional: &RegionalSummary) -> RegionalDto {
    RegionalDto {
        state: regional.state.clone(),
        avg_level: regional.average_level_m,
        status: regional.status.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_serializes_with_camel_case_distances() {
        let survey = LocationSurvey::new(
            Some(15.0),
            vec![Neighbor {
                id: "A".to_string(),
                distance_km: 55.5,
                value: 10.0,
            }],
            vec![NearbyStation {
                id: "A".to_string(),
                distance_km: 55.5,
            }],
        );
        let value = serde_json::to_value(survey_to_dto(&survey)).unwrap();
        assert_eq!(value["estimate"], 15.0);
        assert_eq!(value["neighbors"][0]["distanceKm"], 55.5);
        assert_eq!(value["nearby"][0]["distanceKm"], 55.5);
    }

    #[test]
    fn unavailable_survey_serializes_estimate_as_null() {
        let value = serde_json::to_value(survey_to_dto(&LocationSurvey::unavailable())).unwrap();
        assert!(value["estimate"].is_null());
    }

    #[test]
    fn stream_message_is_tagged_by_type() {
        let msg = StreamMessage::Complete(CompletionDto {
            messages: 4,
            duration_ms: 12,
        });
        let value = serde_json::to_value(msg).unwrap();
        assert_eq!(value["type"], "complete");
        assert_eq!(value["payload"]["durationMs"], 12);
        assert_eq!(value["payload"]["messages"], 4);
    }
}
