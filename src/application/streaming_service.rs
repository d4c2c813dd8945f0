// Streaming dashboard service - Progressive loading over chunked NDJSON
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::application::station_repository::StationRepository;
use crate::application::station_service::collate_latest;
use crate::application::survey_service::SurveyService;
use crate::domain::analytics::FleetAnalytics;
use crate::domain::estimation::GeoPoint;
use crate::infrastructure::api_model::{
    CompletionDto, EstimateDto, StreamMessage, analytics_to_dto, nearby_to_dto, neighbor_to_dto,
    station_to_dto,
};

#[derive(Clone)]
pub struct StreamingDashboardService {
    repository: Arc<dyn StationRepository>,
    survey_service: SurveyService,
}

impl StreamingDashboardService {
    pub fn new(repository: Arc<dyn StationRepository>, survey_service: SurveyService) -> Self {
        Self {
            repository,
            survey_service,
        }
    }

    /// Stream dashboard pieces as they become available: the station list
    /// first, then the location-dependent pieces, then analytics, then a
    /// completion event carrying the elapsed time.
    pub fn stream_dashboard(&self, query: Option<GeoPoint>) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(16);
        let start = Instant::now();
        let repository = self.repository.clone();
        let survey_service = self.survey_service.clone();

        tokio::spawn(async move {
            let rows = match repository.fetch_station_rows().await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::error!("station fetch failed, streaming empty dashboard: {e}");
                    Vec::new()
                }
            };
            let stations = collate_latest(rows);
            let mut sent = 0;

            let station_dtos = stations.iter().map(station_to_dto).collect();
            if tx.send(StreamMessage::Stations(station_dtos)).await.is_ok() {
                sent += 1;
            }

            if query.is_some() {
                let survey = survey_service.survey_stations(&stations, query);

                let nearby = survey.nearby.iter().map(nearby_to_dto).collect();
                if tx.send(StreamMessage::Nearby(nearby)).await.is_ok() {
                    sent += 1;
                }

                let estimate = EstimateDto {
                    estimate: survey.estimate,
                    neighbors: survey.neighbors.iter().map(neighbor_to_dto).collect(),
                };
                if tx.send(StreamMessage::Estimate(estimate)).await.is_ok() {
                    sent += 1;
                }
            }

            let analytics = analytics_to_dto(&FleetAnalytics::compute(&stations));
            if tx.send(StreamMessage::Analytics(analytics)).await.is_ok() {
                sent += 1;
            }

            let complete = CompletionDto {
                messages: sent,
                duration_ms: start.elapsed().as_millis() as i64,
            };
            let _ = tx.send(StreamMessage::Complete(complete)).await;
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::station_repository::StationRow;
    use crate::domain::estimation::{IdwParams, NearbyParams};
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

    fn service(rows: Vec<StationRow>) -> StreamingDashboardService {
        let repository: Arc<dyn StationRepository> = Arc::new(FixtureRepository { rows });
        let survey_service = SurveyService::new(
            repository.clone(),
            IdwParams::default(),
            NearbyParams::default(),
        );
        StreamingDashboardService::new(repository, survey_service)
    }

    async fn drain(mut rx: mpsc::Receiver<StreamMessage>) -> Vec<StreamMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn stream_with_location_sends_all_pieces_in_order() {
        let rows = vec![row("A", 0.0, 0.0, 10.0), row("B", 0.0, 1.0, 20.0)];
        let rx = service(rows).stream_dashboard(Some(GeoPoint::new(0.0, 0.5)));
        let messages = drain(rx).await;

        assert_eq!(messages.len(), 5);
        assert!(matches!(messages[0], StreamMessage::Stations(_)));
        assert!(matches!(messages[1], StreamMessage::Nearby(_)));
        assert!(matches!(messages[2], StreamMessage::Estimate(_)));
        assert!(matches!(messages[3], StreamMessage::Analytics(_)));
        match &messages[4] {
            StreamMessage::Complete(c) => assert_eq!(c.messages, 4),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stream_without_location_skips_survey_pieces() {
        let rx = service(vec![row("A", 0.0, 0.0, 10.0)]).stream_dashboard(None);
        let messages = drain(rx).await;

        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], StreamMessage::Stations(_)));
        assert!(matches!(messages[1], StreamMessage::Analytics(_)));
        assert!(matches!(messages[2], StreamMessage::Complete(_)));
    }
}
