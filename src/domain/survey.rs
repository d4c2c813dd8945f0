// Location survey domain model
use crate::domain::estimation::{Neighbor, NearbyStation};

/// Everything the kernel produces for one query point: the IDW estimate,
/// the neighbors that contributed to it, and the independently tuned
/// nearby-station listing.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSurvey {
    pub estimate: Option<f64>,
    pub neighbors: Vec<Neighbor>,
    pub nearby: Vec<NearbyStation>,
}

impl LocationSurvey {
    pub fn new(
        estimate: Option<f64>,
        neighbors: Vec<Neighbor>,
        nearby: Vec<NearbyStation>,
    ) -> Self {
        Self {
            estimate,
            neighbors,
            nearby,
        }
    }

    /// Survey for a missing or unusable query point.
    pub fn unavailable() -> Self {
        Self {
            estimate: None,
            neighbors: Vec::new(),
            nearby: Vec::new(),
        }
    }
}
