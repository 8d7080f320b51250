use serde::{Deserialize, Serialize};

use super::Mmsi;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Vessel trajectory as summarized by the upstream retrieval step. Immutable
/// once received, used only to seed synthetic playback.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectorySummary {
    pub mmsi: Mmsi,
    pub start: Option<Coordinate>,
    pub end: Option<Coordinate>,
    pub ship_type: Option<String>,
    pub point_count: Option<u32>,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Linear interpolation towards `target`, `t` in `0.0..=1.0`.
    pub fn lerp(self, target: Coordinate, t: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + (target.lat - self.lat) * t,
            lon: self.lon + (target.lon - self.lon) * t,
        }
    }
}

impl TrajectorySummary {
    pub fn has_endpoints(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

#[cfg(feature = "test")]
mod test {
    use super::*;

    impl TrajectorySummary {
        pub fn test_default(mmsi: Mmsi) -> Self {
            TrajectorySummary {
                mmsi,
                start: Some(Coordinate::new(78.1, 15.5)),
                end: Some(Coordinate::new(78.3, 15.7)),
                ship_type: Some("fishing".to_string()),
                point_count: None,
            }
        }
    }
}
