use std::sync::Arc;

use seawatch_core::{LocalTickChannel, TickChannel, TraceId, TrajectorySource};
use snafu::ResultExt;
use tracing::info;

use crate::{
    error::{Result, error::TrajectoryLoadSnafu},
    producer::{ReplayProducer, tick_period},
    settings::Settings,
    source::FileTrajectorySource,
    synthesis::LinearPathSynthesis,
};

pub struct App {
    producer: ReplayProducer,
    source: Arc<dyn TrajectorySource>,
}

impl App {
    pub fn build(settings: &Settings) -> App {
        let channel: Arc<dyn TickChannel> =
            Arc::new(LocalTickChannel::new(settings.channel_capacity));

        let synthesis = LinearPathSynthesis::new(
            settings.points_per_path,
            tick_period(settings.tick_rate),
            settings.jitter,
        );

        let producer = ReplayProducer::new(
            channel,
            settings.topic.clone(),
            settings.tick_rate,
            Arc::new(synthesis),
        );

        App {
            producer,
            source: Arc::new(FileTrajectorySource::new(settings.trajectories_path.clone())),
        }
    }

    /// Replays the configured trajectories once and returns when the session
    /// has emitted its terminal tick.
    pub async fn run(self) -> Result<()> {
        let trajectories = self
            .source
            .trajectories()
            .await
            .context(TrajectoryLoadSnafu)?;

        info!("starting replay of {} trajectories", trajectories.len());

        let handle = self.producer.start(TraceId::random(), &trajectories);

        let mut progress = handle.progress();
        tokio::spawn(async move {
            while progress.changed().await.is_ok() {
                info!("replay progress: {:.0}%", *progress.borrow() * 100.0);
            }
        });

        let outcome = handle.wait().await?;
        info!("replay session ended: {outcome}");

        Ok(())
    }
}
