// REST repository implementation against the hosted relational backend
use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::station_repository::{StationRepository, StationRow};

/// Talks to the backend's PostgREST-style endpoint. One row per observation;
/// the query asks for newest-first so collation downstream can keep the
/// first row per serial number.
#[derive(Debug, Clone)]
pub struct RestStationRepository {
    base_url: String,
    api_key: String,
    table: String,
}

impl RestStationRepository {
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
        }
    }

    fn rows_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*&order={}",
            self.base_url,
            self.table,
            urlencoding::encode("recorded_at.desc")
        )
    }

    async fn execute_get(&self, url: &str) -> Result<Vec<StationRow>> {
        let client = reqwest::Client::new();
        let response = client
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to station backend")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Station backend query failed with status {}: {}", status, body);
        }

        response
            .json::<Vec<StationRow>>()
            .await
            .context("Failed to parse station backend response")
    }
}

#[async_trait]
impl StationRepository for RestStationRepository {
    async fn fetch_station_rows(&self) -> Result<Vec<StationRow>> {
        let url = self.rows_url();
        tracing::debug!("Fetching station rows from {}", url);
        let rows = self.execute_get(&url).await?;
        tracing::debug!("Fetched {} station rows", rows.len());
        Ok(rows)
    }
}
