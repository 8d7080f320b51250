use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::{Coordinate, CoreResult, Mmsi, Tick, TrajectorySummary};

/// Ticks delivered to one subscriber, in transport-delivery order. Dropping
/// the stream unsubscribes and performs any transport-level cleanup.
///
/// An `Err` item is a transport-level failure. The subscription is not
/// retried by this subsystem, retry policy belongs to the caller.
pub type TickStream = BoxStream<'static, CoreResult<Tick>>;

/// Named publish/subscribe topic carrying tick messages to all connected
/// listeners. No persistence, no guaranteed delivery, no backpressure.
#[async_trait]
pub trait TickChannel: Send + Sync {
    /// Sends `tick` to all current subscribers of `topic`. Returns once the
    /// transport has accepted the send, not once every subscriber has
    /// processed it.
    async fn publish(&self, topic: &str, tick: Tick) -> CoreResult<()>;

    async fn subscribe(&self, topic: &str) -> CoreResult<TickStream>;
}

/// Upstream retrieval collaborator supplying the trajectory summaries that
/// seed a playback session.
#[async_trait]
pub trait TrajectorySource: Send + Sync {
    async fn trajectories(&self) -> CoreResult<Vec<TrajectorySummary>>;
}

/// Rendering collaborator owning the map surface. This subsystem issues
/// marker calls but does not own rendering.
pub trait MarkerSurface: Send {
    fn create_marker(&mut self, mmsi: Mmsi, position: Coordinate);
    fn move_marker(&mut self, mmsi: Mmsi, position: Coordinate);
    fn remove_marker(&mut self, mmsi: Mmsi);
}
