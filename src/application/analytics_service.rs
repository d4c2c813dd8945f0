// Analytics service - Use case for fleet-wide reductions
use std::sync::Arc;

use crate::application::station_repository::StationRepository;
use crate::application::station_service::collate_latest;
use crate::domain::analytics::FleetAnalytics;

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Arc<dyn StationRepository>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn StationRepository>) -> Self {
        Self { repository }
    }

    pub async fn fleet_analytics(&self) -> anyhow::Result<FleetAnalytics> {
        let rows = self.repository.fetch_station_rows().await?;
        let stations = collate_latest(rows);
        Ok(FleetAnalytics::compute(&stations))
    }
}
