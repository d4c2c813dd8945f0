// Spatial estimation kernel - haversine distance, k-nearest selection, IDW
//
// Pure functions of (readings, query point, parameters). No I/O, no shared
// state; repeated calls with identical input produce bit-identical output.
use std::cmp::Ordering;
use thiserror::Error;

const EARTH_RADIUS_KM: f64 = 6371.0;

pub const DEFAULT_NEIGHBORS: usize = 5;
pub const DEFAULT_POWER: f64 = 1.0;
pub const DEFAULT_MIN_DISTANCE_KM: f64 = 0.001;
pub const DEFAULT_RADIUS_KM: f64 = 50.0;
pub const DEFAULT_MAX_NEARBY: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within WGS-84 latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One station's latest observation: water level in meters below reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub id: String,
    pub position: GeoPoint,
    pub value: f64,
}

impl Reading {
    pub fn new(id: impl Into<String>, position: GeoPoint, value: f64) -> Self {
        Self {
            id: id.into(),
            position,
            value,
        }
    }

    // Ineligible readings are excluded from estimation, never treated as zero.
    fn is_eligible(&self) -> bool {
        self.position.is_valid() && self.value.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdwParams {
    /// Neighbor count K, must be at least 1.
    pub neighbors: usize,
    /// Distance power P, must be positive.
    pub power: f64,
    /// Distance floor in kilometers guarding the weight division.
    pub min_distance_km: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            neighbors: DEFAULT_NEIGHBORS,
            power: DEFAULT_POWER,
            min_distance_km: DEFAULT_MIN_DISTANCE_KM,
        }
    }
}

impl IdwParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.neighbors == 0 {
            return Err(ParamError::NeighborCount(self.neighbors));
        }
        if !(self.power > 0.0) {
            return Err(ParamError::Power(self.power));
        }
        if !(self.min_distance_km > 0.0) {
            return Err(ParamError::MinDistance(self.min_distance_km));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyParams {
    pub radius_km: f64,
    pub max_results: usize,
}

impl Default for NearbyParams {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            max_results: DEFAULT_MAX_NEARBY,
        }
    }
}

impl NearbyParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.radius_km > 0.0) {
            return Err(ParamError::Radius(self.radius_km));
        }
        if self.max_results == 0 {
            return Err(ParamError::MaxResults(self.max_results));
        }
        Ok(())
    }
}

/// Caller contract violations. These fail fast rather than silently clamp.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("neighbor count must be at least 1, got {0}")]
    NeighborCount(usize),
    #[error("power must be positive, got {0}")]
    Power(f64),
    #[error("minimum distance floor must be positive, got {0} km")]
    MinDistance(f64),
    #[error("radius must be positive, got {0} km")]
    Radius(f64),
    #[error("maximum result count must be at least 1, got {0}")]
    MaxResults(usize),
}

/// A reading selected for estimation, with its distance to the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: String,
    pub distance_km: f64,
    pub value: f64,
}

/// A station within display range of the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStation {
    pub id: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// None when no eligible reading existed. Never NaN, never a zero sentinel.
    pub value: Option<f64>,
    pub neighbors: Vec<Neighbor>,
}

/// Great-circle distance in kilometers between two points given in decimal
/// degrees, via the haversine formula.
///
/// Symmetric, and exactly zero for identical points. Out-of-range input is
/// undefined; callers filter with [`GeoPoint::is_valid`] first.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Select the `min(k, eligible)` readings closest to `query`, ascending by
/// distance. The sort is stable, so equidistant readings keep input order.
pub fn k_nearest(readings: &[Reading], query: GeoPoint, k: usize) -> Vec<Neighbor> {
    if !query.is_valid() {
        return Vec::new();
    }

    let mut neighbors: Vec<Neighbor> = readings
        .iter()
        .filter(|r| r.is_eligible())
        .map(|r| Neighbor {
            id: r.id.clone(),
            distance_km: haversine_km(query, r.position),
            value: r.value,
        })
        .collect();

    neighbors.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    neighbors.truncate(k);
    neighbors
}

/// Interpolate the water level at `query` by inverse-distance weighting over
/// the K nearest readings.
pub fn estimate(
    readings: &[Reading],
    query: GeoPoint,
    params: &IdwParams,
) -> Result<Estimate, ParamError> {
    params.validate()?;
    let neighbors = k_nearest(readings, query, params.neighbors);
    let value = idw(&neighbors, params.power, params.min_distance_km);
    Ok(Estimate { value, neighbors })
}

fn idw(neighbors: &[Neighbor], power: f64, min_distance_km: f64) -> Option<f64> {
    if neighbors.is_empty() {
        return None;
    }

    // Query point coincides with a station: return its value directly.
    // Neighbors are in stable sorted order, so the first zero wins.
    if let Some(exact) = neighbors.iter().find(|n| n.distance_km == 0.0) {
        return Some(exact.value);
    }

    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for n in neighbors {
        let w = 1.0 / n.distance_km.max(min_distance_km).powf(power);
        weighted_sum += n.value * w;
        weight_sum += w;
    }

    // The floor keeps weights finite, but a zero sum must still not divide.
    if weight_sum == 0.0 {
        None
    } else {
        Some(weighted_sum / weight_sum)
    }
}

/// Stations within `radius_km` of `query`, ascending by distance, truncated
/// to `max_results`. Falls back to the unfiltered set when nothing is in
/// range, so a non-empty input always yields candidates.
///
/// Shares distance semantics with the estimator but is tuned independently.
pub fn nearby(
    readings: &[Reading],
    query: GeoPoint,
    params: &NearbyParams,
) -> Result<Vec<NearbyStation>, ParamError> {
    params.validate()?;
    if !query.is_valid() {
        return Ok(Vec::new());
    }

    let candidates: Vec<NearbyStation> = readings
        .iter()
        .filter(|r| r.position.is_valid())
        .map(|r| NearbyStation {
            id: r.id.clone(),
            distance_km: haversine_km(query, r.position),
        })
        .collect();

    let mut chosen: Vec<NearbyStation> = candidates
        .iter()
        .filter(|c| c.distance_km <= params.radius_km)
        .cloned()
        .collect();
    if chosen.is_empty() {
        chosen = candidates;
    }

    chosen.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    chosen.truncate(params.max_results);
    Ok(chosen)
}
