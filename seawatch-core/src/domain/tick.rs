use std::{fmt::Display, num::ParseIntError, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Mmsi(i32);

/// Opaque correlation id grouping all ticks belonging to one playback session
/// or one originating query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TraceId(String);

/// One timestamped batch of vessel position observations broadcast to all
/// subscribers of the telemetry topic.
///
/// Ticks are fire-and-forget, delivered at-most-effectively-once per
/// subscriber. There is no replay or backfill, a subscriber that joins late
/// misses prior ticks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    #[serde(default = "TraceId::random")]
    pub trace_id: TraceId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub ts: DateTime<Utc>,
    #[serde(default)]
    pub vessels: Vec<VesselObservation>,
    #[serde(default)]
    pub done: bool,
}

/// Position of a single vessel at one tick instant. Exists only inside a
/// [`Tick`], never persisted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VesselObservation {
    pub mmsi: Mmsi,
    pub lat: f64,
    pub lon: f64,
    /// Speed over ground in knots.
    pub speed: Option<f64>,
    /// Course over ground in degrees.
    pub course: Option<f64>,
    /// Sequence index within the playback session, strictly increasing per
    /// vessel, starting at 0.
    pub idx: Option<u32>,
}

impl Tick {
    pub fn new(trace_id: TraceId, vessels: Vec<VesselObservation>) -> Self {
        Self {
            trace_id,
            ts: Utc::now(),
            vessels,
            done: false,
        }
    }

    /// The terminal tick of a naturally completed playback session.
    pub fn completed(trace_id: TraceId) -> Self {
        Self {
            trace_id,
            ts: Utc::now(),
            vessels: Vec::new(),
            done: true,
        }
    }
}

impl TraceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Locally synthesized fallback id for ticks arriving without one.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TraceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Mmsi {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FromStr for Mmsi {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<Mmsi> for i32 {
    fn from(value: Mmsi) -> Self {
        value.0
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(feature = "test")]
mod test {
    use super::*;

    impl Mmsi {
        pub fn test_new(mmsi: i32) -> Self {
            Self(mmsi)
        }
    }

    impl VesselObservation {
        pub fn test_default(mmsi: Mmsi, lat: f64, lon: f64) -> Self {
            VesselObservation {
                mmsi,
                lat,
                lon,
                speed: Some(8.4),
                course: Some(123.3),
                idx: Some(0),
            }
        }
    }
}
