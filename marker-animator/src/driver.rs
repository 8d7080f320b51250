use std::time::Duration;

use futures::StreamExt;
use seawatch_core::{MarkerSurface, ReplayStatus, SessionEnd, TickStream};
use snafu::ResultExt;
use tokio::{sync::watch, time};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::{
    animator::MarkerAnimator,
    error::{
        Result,
        error::{StreamClosedSnafu, TransportSnafu},
    },
};

pub static DEFAULT_FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Drives a [`MarkerAnimator`] from a tick subscription, interleaving
/// animation frames with tick delivery.
pub struct AnimatorDriver {
    frame_period: Duration,
    cancel: CancellationToken,
    status: watch::Sender<ReplayStatus>,
}

impl AnimatorDriver {
    pub fn new() -> Self {
        Self::with_frame_period(DEFAULT_FRAME_PERIOD)
    }

    pub fn with_frame_period(frame_period: Duration) -> Self {
        let (status, _) = watch::channel(ReplayStatus::Idle);

        Self {
            frame_period,
            cancel: CancellationToken::new(),
            status,
        }
    }

    /// Session status for the UI stream indicator.
    pub fn status(&self) -> watch::Receiver<ReplayStatus> {
        self.status.subscribe()
    }

    /// Cancelling the returned token turns playback mode off: markers are
    /// removed and [`run`](Self::run) returns. No tick or frame is applied
    /// after cancellation completes.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    #[instrument(skip_all)]
    pub async fn run<S: MarkerSurface>(
        &self,
        mut stream: TickStream,
        animator: &mut MarkerAnimator<S>,
    ) -> Result<SessionEnd> {
        let mut frames = time::interval(self.frame_period);
        let _ = self.status.send(ReplayStatus::Live);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    animator.dispose();
                    let _ = self.status.send(ReplayStatus::Stopped);
                    return Ok(SessionEnd::Stopped);
                }
                message = stream.next() => {
                    match message {
                        Some(Ok(tick)) => {
                            animator.on_tick(&tick);
                            if animator.is_done() {
                                self.finish_animations(animator).await;
                                let _ = self.status.send(ReplayStatus::Complete);
                                return Ok(SessionEnd::Completed);
                            }
                        }
                        Some(Err(error)) => {
                            // Markers stay where they are, establishing a
                            // fresh subscription is the caller's call.
                            let _ = self.status.send(ReplayStatus::Disconnected);
                            return Err(error).context(TransportSnafu);
                        }
                        None => {
                            let _ = self.status.send(ReplayStatus::Disconnected);
                            return StreamClosedSnafu.fail();
                        }
                    }
                }
                _ = frames.tick() => animator.on_frame(),
            }
        }
    }

    /// The terminal tick carries no positions, but animations started by the
    /// last observation tick may still be in flight.
    async fn finish_animations<S: MarkerSurface>(&self, animator: &mut MarkerAnimator<S>) {
        let mut frames = time::interval(self.frame_period);

        while animator.has_active_animations() {
            frames.tick().await;
            animator.on_frame();
        }
    }
}

impl Default for AnimatorDriver {
    fn default() -> Self {
        Self::new()
    }
}
