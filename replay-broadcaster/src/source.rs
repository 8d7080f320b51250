use std::path::PathBuf;

use async_trait::async_trait;
use seawatch_core::{CoreResult, TrajectorySource, TrajectorySourceSnafu, TrajectorySummary};
use snafu::ResultExt;

use crate::error::{
    Result,
    error::{TrajectoriesFileSnafu, TrajectoriesParseSnafu},
};

/// File-backed stand-in for the retrieval collaborator that hands over
/// trajectory summaries for the demo replay.
pub struct FileTrajectorySource {
    path: PathBuf,
}

impl FileTrajectorySource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> Result<Vec<TrajectorySummary>> {
        let contents = tokio::fs::read(&self.path)
            .await
            .with_context(|_| TrajectoriesFileSnafu {
                path: self.path.clone(),
            })?;

        serde_json::from_slice(&contents).with_context(|_| TrajectoriesParseSnafu {
            path: self.path.clone(),
        })
    }
}

#[async_trait]
impl TrajectorySource for FileTrajectorySource {
    async fn trajectories(&self) -> CoreResult<Vec<TrajectorySummary>> {
        self.load().await.map_err(|e| {
            TrajectorySourceSnafu {
                error_stringified: e.to_string(),
            }
            .build()
        })
    }
}
