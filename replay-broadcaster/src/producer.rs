use std::{sync::Arc, time::Duration};

use seawatch_core::{
    Mmsi, SessionEnd, Tick, TickChannel, TraceId, TrajectorySummary, VesselObservation,
};
use snafu::ResultExt;
use tokio::{sync::watch, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::{
    error::{
        Result,
        error::{JoinSnafu, PublishSnafu},
    },
    synthesis::{PathPoint, PathSynthesis, SyntheticPath},
};

pub static MIN_TICK_RATE: u32 = 1;
pub static MAX_TICK_RATE: u32 = 10;

pub fn tick_period(tick_rate: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(tick_rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE)))
}

/// Turns a static set of trajectory summaries into a time-ordered telemetry
/// animation on the broadcast channel.
pub struct ReplayProducer {
    channel: Arc<dyn TickChannel>,
    topic: String,
    tick_rate: u32,
    synthesis: Arc<dyn PathSynthesis>,
}

/// Handle to one running playback session.
pub struct ReplayHandle {
    cancel: CancellationToken,
    progress: watch::Receiver<f64>,
    task: JoinHandle<Result<SessionEnd>>,
}

impl ReplayProducer {
    pub fn new(
        channel: Arc<dyn TickChannel>,
        topic: String,
        tick_rate: u32,
        synthesis: Arc<dyn PathSynthesis>,
    ) -> Self {
        let clamped = tick_rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE);
        if clamped != tick_rate {
            warn!("tick rate {tick_rate} outside {MIN_TICK_RATE}..={MAX_TICK_RATE}, using {clamped}");
        }

        Self {
            channel,
            topic,
            tick_rate: clamped,
            synthesis,
        }
    }

    /// Starts a new playback session. Sequence indices restart at 0 because
    /// paths are synthesized per session.
    pub fn start(&self, trace_id: TraceId, trajectories: &[TrajectorySummary]) -> ReplayHandle {
        let paths: Vec<PlaybackPath> = trajectories
            .iter()
            .filter_map(|t| self.synthesis.synthesize(t))
            .map(PlaybackPath::from)
            .collect();

        let max_points = paths.iter().map(|p| p.points.len()).max().unwrap_or(0);

        let (progress_sender, progress) = watch::channel(0.0);
        let cancel = CancellationToken::new();

        let session = ReplaySession {
            channel: self.channel.clone(),
            topic: self.topic.clone(),
            period: tick_period(self.tick_rate),
            trace_id,
            paths,
            max_points,
            ticks_emitted: 0,
            progress: progress_sender,
            cancel: cancel.clone(),
        };

        ReplayHandle {
            cancel,
            progress,
            task: tokio::spawn(session.run()),
        }
    }
}

impl ReplayHandle {
    /// Fraction of the session emitted so far, `ticks emitted / max points
    /// across all paths`.
    pub fn progress(&self) -> watch::Receiver<f64> {
        self.progress.clone()
    }

    /// Halts the tick timer without emitting a completion tick. No tick is
    /// published after this returns.
    pub async fn stop(self) -> Result<SessionEnd> {
        self.cancel.cancel();
        self.task.await.context(JoinSnafu)?
    }

    /// Waits for the session to complete naturally.
    pub async fn wait(self) -> Result<SessionEnd> {
        self.task.await.context(JoinSnafu)?
    }
}

struct ReplaySession {
    channel: Arc<dyn TickChannel>,
    topic: String,
    period: Duration,
    trace_id: TraceId,
    paths: Vec<PlaybackPath>,
    max_points: usize,
    ticks_emitted: usize,
    progress: watch::Sender<f64>,
    cancel: CancellationToken,
}

impl ReplaySession {
    #[instrument(skip_all, fields(trace_id = %self.trace_id))]
    async fn run(mut self) -> Result<SessionEnd> {
        let mut interval = time::interval(self.period);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("replay stopped after {} ticks", self.ticks_emitted);
                    return Ok(SessionEnd::Stopped);
                }
                _ = interval.tick() => {
                    if self.emit_next().await? {
                        info!("replay completed after {} ticks", self.ticks_emitted);
                        return Ok(SessionEnd::Completed);
                    }
                }
            }
        }
    }

    /// Emits the next tick, returns true once the terminal tick went out.
    async fn emit_next(&mut self) -> Result<bool> {
        let vessels: Vec<VesselObservation> = self
            .paths
            .iter_mut()
            .filter_map(PlaybackPath::next_observation)
            .collect();

        if vessels.is_empty() {
            self.channel
                .publish(&self.topic, Tick::completed(self.trace_id.clone()))
                .await
                .context(PublishSnafu)?;
            let _ = self.progress.send(1.0);
            return Ok(true);
        }

        self.channel
            .publish(&self.topic, Tick::new(self.trace_id.clone(), vessels))
            .await
            .context(PublishSnafu)?;

        self.ticks_emitted += 1;
        let _ = self
            .progress
            .send(self.ticks_emitted as f64 / self.max_points as f64);

        Ok(false)
    }
}

struct PlaybackPath {
    mmsi: Mmsi,
    points: Vec<PathPoint>,
    cursor: usize,
}

impl PlaybackPath {
    fn next_observation(&mut self) -> Option<VesselObservation> {
        let point = self.points.get(self.cursor)?;

        let observation = VesselObservation {
            mmsi: self.mmsi,
            lat: point.position.lat,
            lon: point.position.lon,
            speed: Some(point.speed),
            course: Some(point.course),
            idx: Some(self.cursor as u32),
        };

        self.cursor += 1;
        Some(observation)
    }
}

impl From<SyntheticPath> for PlaybackPath {
    fn from(path: SyntheticPath) -> Self {
        Self {
            mmsi: path.mmsi,
            points: path.points,
            cursor: 0,
        }
    }
}
