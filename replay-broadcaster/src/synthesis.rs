use std::time::Duration;

use geoutils::Location;
use rand::Rng;
use seawatch_core::{Coordinate, Mmsi, TrajectorySummary};

static METER_TO_NAUTICAL_MILES: f64 = 0.0005399568;

/// Expands a trajectory summary into a playable point sequence.
///
/// The default implementation fabricates positions by linear interpolation
/// with synthetic speed and course. Real trajectory data with true
/// timestamp/speed/course arrays can be substituted without touching the
/// tick-emission mechanics.
pub trait PathSynthesis: Send + Sync {
    fn synthesize(&self, trajectory: &TrajectorySummary) -> Option<SyntheticPath>;
}

#[derive(Debug, Clone)]
pub struct SyntheticPath {
    pub mmsi: Mmsi,
    pub points: Vec<PathPoint>,
}

#[derive(Debug, Clone)]
pub struct PathPoint {
    pub position: Coordinate,
    /// Knots.
    pub speed: f64,
    /// Degrees.
    pub course: f64,
}

pub struct LinearPathSynthesis {
    points_per_path: u32,
    tick_period: Duration,
    jitter: Option<f64>,
}

impl LinearPathSynthesis {
    /// `jitter` is the maximum absolute perturbation in degrees applied to
    /// every generated point except the first.
    pub fn new(points_per_path: u32, tick_period: Duration, jitter: Option<f64>) -> Self {
        Self {
            points_per_path: points_per_path.max(2),
            tick_period,
            jitter,
        }
    }

    fn implied_speed_knots(&self, from: Coordinate, to: Coordinate) -> f64 {
        let from = Location::new(from.lat, from.lon);
        let to = Location::new(to.lat, to.lon);

        let distance = from.haversine_distance_to(&to);
        let period_hours = self.tick_period.as_secs_f64() / 60.0 / 60.0;

        distance.meters() * METER_TO_NAUTICAL_MILES / period_hours
    }
}

impl PathSynthesis for LinearPathSynthesis {
    fn synthesize(&self, trajectory: &TrajectorySummary) -> Option<SyntheticPath> {
        let (start, end) = match (trajectory.start, trajectory.end) {
            (Some(start), Some(end)) => (start, end),
            // Trajectories lacking an endpoint produce no observations.
            _ => return None,
        };

        let num_points = self.points_per_path as usize;
        let course = bearing(start, end);
        let mut rng = rand::rng();

        let mut positions = Vec::with_capacity(num_points);
        for i in 0..num_points {
            let t = i as f64 / (num_points - 1) as f64;
            let mut position = start.lerp(end, t);

            if let Some(jitter) = self.jitter {
                if i > 0 && jitter > 0.0 {
                    position.lat += rng.random_range(-jitter..=jitter);
                    position.lon += rng.random_range(-jitter..=jitter);
                }
            }

            positions.push(position);
        }

        let points = positions
            .iter()
            .enumerate()
            .map(|(i, position)| {
                // The speed a vessel would hold to cover the upcoming segment
                // in one tick period (the previous segment for the last
                // point), scattered a little so the replay does not look
                // machine-steady.
                let (from, to) = if i + 1 < num_points {
                    (positions[i], positions[i + 1])
                } else {
                    (positions[i - 1], positions[i])
                };

                PathPoint {
                    position: *position,
                    speed: self.implied_speed_knots(from, to) * rng.random_range(0.9..1.1),
                    course,
                }
            })
            .collect();

        Some(SyntheticPath {
            mmsi: trajectory.mmsi,
            points,
        })
    }
}

/// Initial great-circle bearing from `from` to `to`, degrees in `0.0..360.0`.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    let from_lat = from.lat.to_radians();
    let to_lat = to.lat.to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let y = delta_lon.sin() * to_lat.cos();
    let x = from_lat.cos() * to_lat.sin() - from_lat.sin() * to_lat.cos() * delta_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}
