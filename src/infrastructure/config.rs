use serde::Deserialize;

use crate::domain::estimation::{
    DEFAULT_MAX_NEARBY, DEFAULT_MIN_DISTANCE_KM, DEFAULT_NEIGHBORS, DEFAULT_POWER,
    DEFAULT_RADIUS_KM, IdwParams, NearbyParams, ParamError,
};

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub backend: BackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EstimationConfig {
    #[serde(default)]
    pub estimation: IdwSettings,
    #[serde(default)]
    pub nearby: NearbySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdwSettings {
    #[serde(default = "default_neighbors")]
    pub neighbors: usize,
    #[serde(default = "default_power")]
    pub power: f64,
    #[serde(default = "default_min_distance_km")]
    pub min_distance_km: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NearbySettings {
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_neighbors() -> usize {
    DEFAULT_NEIGHBORS
}

fn default_power() -> f64 {
    DEFAULT_POWER
}

fn default_min_distance_km() -> f64 {
    DEFAULT_MIN_DISTANCE_KM
}

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

fn default_max_results() -> usize {
    DEFAULT_MAX_NEARBY
}

impl Default for IdwSettings {
    fn default() -> Self {
        Self {
            neighbors: default_neighbors(),
            power: default_power(),
            min_distance_km: default_min_distance_km(),
        }
    }
}

impl Default for NearbySettings {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            max_results: default_max_results(),
        }
    }
}

impl EstimationConfig {
    /// Validated kernel parameters. Invalid values are a configuration bug
    /// and fail fast at startup rather than being clamped.
    pub fn kernel_params(&self) -> Result<(IdwParams, NearbyParams), ParamError> {
        let idw = IdwParams {
            neighbors: self.estimation.neighbors,
            power: self.estimation.power,
            min_distance_km: self.estimation.min_distance_km,
        };
        idw.validate()?;

        let nearby = NearbyParams {
            radius_km: self.nearby.radius_km,
            max_results: self.nearby.max_results,
        };
        nearby.validate()?;

        Ok((idw, nearby))
    }
}

pub fn load_backend_config() -> anyhow::Result<BackendConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/backend"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_estimation_config() -> anyhow::Result<EstimationConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/estimation"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
