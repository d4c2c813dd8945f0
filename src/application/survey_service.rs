// Survey service - Use case for estimating the water level at a location
use std::sync::Arc;

use crate::application::station_repository::StationRepository;
use crate::application::station_service::collate_latest;
use crate::domain::estimation::{self, GeoPoint, IdwParams, NearbyParams, Reading};
use crate::domain::station::Station;
use crate::domain::survey::LocationSurvey;

#[derive(Clone)]
pub struct SurveyService {
    repository: Arc<dyn StationRepository>,
    idw_params: IdwParams,
    nearby_params: NearbyParams,
}

impl SurveyService {
    pub fn new(
        repository: Arc<dyn StationRepository>,
        idw_params: IdwParams,
        nearby_params: NearbyParams,
    ) -> Self {
        Self {
            repository,
            idw_params,
            nearby_params,
        }
    }

    /// Survey the query point against the latest reading per station.
    /// A missing query point is not an error: the caller simply gets an
    /// unavailable survey.
    pub async fn survey(&self, query: Option<GeoPoint>) -> anyhow::Result<LocationSurvey> {
        let rows = self.repository.fetch_station_rows().await?;
        let stations = collate_latest(rows);
        Ok(self.survey_stations(&stations, query))
    }

    /// Kernel invocation over an already-collated station list.
    pub fn survey_stations(
        &self,
        stations: &[Station],
        query: Option<GeoPoint>,
    ) -> LocationSurvey {
        let Some(query) = query else {
            return LocationSurvey::unavailable();
        };

        let readings: Vec<Reading> = stations.iter().map(Station::to_reading).collect();

        // Parameters were validated at startup; a violation here is a bug,
        // logged and surfaced as an unavailable survey.
        let estimate = match estimation::estimate(&readings, query, &self.idw_params) {
            Ok(estimate) => estimate,
            Err(e) => {
                tracing::error!("estimation parameters rejected: {e}");
                return LocationSurvey::unavailable();
            }
        };
        let nearby = match estimation::nearby(&readings, query, &self.nearby_params) {
            Ok(nearby) => nearby,
            Err(e) => {
                tracing::error!("nearby parameters rejected: {e}");
                return LocationSurvey::unavailable();
            }
        };

        LocationSurvey::new(estimate.value, estimate.neighbors, nearby)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::station_repository::StationRow;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    struct FixtureRepository {
        rows: Vec<StationRow>,
    }

    #[async_trait]
    impl StationRepository for FixtureRepository {
        async fn fetch_station_rows(&self) -> anyhow::Result<Vec<StationRow>> {
            Ok(self.rows.clone())
        }
    }

    fn row(serial: &str, lat: f64, lon: f64, level_m: f64) -> StationRow {
        StationRow {
            serial_number: serial.to_string(),
            station_name: serial.to_string(),
            district: "Patna".to_string(),
            state: "Bihar".to_string(),
            latitude: lat,
            longitude: lon,
            water_level_m: level_m,
            temperature_c: None,
            battery_percent: 85,
            signal_strength: 78,
            recorded_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    fn service(rows: Vec<StationRow>) -> SurveyService {
        SurveyService::new(
            Arc::new(FixtureRepository { rows }),
            IdwParams::default(),
            NearbyParams::default(),
        )
    }

    #[tokio::test]
    async fn surveys_against_latest_readings() {
        let rows = vec![
            row("A", 0.0, 0.0, 10.0),
            row("B", 0.0, 1.0, 20.0),
        ];
        let survey = service(rows)
            .survey(Some(GeoPoint::new(0.0, 0.5)))
            .await
            .unwrap();

        let estimate = survey.estimate.unwrap();
        assert!((estimate - 15.0).abs() < 1e-9);
        assert_eq!(survey.neighbors.len(), 2);
        assert_eq!(survey.nearby.len(), 2);
    }

    #[tokio::test]
    async fn missing_query_point_yields_unavailable_survey() {
        let survey = service(vec![row("A", 0.0, 0.0, 10.0)])
            .survey(None)
            .await
            .unwrap();
        assert_eq!(survey.estimate, None);
        assert!(survey.neighbors.is_empty());
        assert!(survey.nearby.is_empty());
    }

    #[tokio::test]
    async fn station_at_query_point_is_returned_exactly() {
        let survey = service(vec![row("A", 10.0, 10.0, 7.5)])
            .survey(Some(GeoPoint::new(10.0, 10.0)))
            .await
            .unwrap();
        assert_eq!(survey.estimate, Some(7.5));
    }
}
