use std::path::PathBuf;

use snafu::{Location, Snafu};
use tokio::task::JoinError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to join the replay task"))]
    Join {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: JoinError,
    },
    #[snafu(display("Failed to publish a tick to the broadcast channel"))]
    Publish {
        #[snafu(implicit)]
        location: Location,
        source: seawatch_core::Error,
    },
    #[snafu(display("Failed to load trajectories"))]
    TrajectoryLoad {
        #[snafu(implicit)]
        location: Location,
        source: seawatch_core::Error,
    },
    #[snafu(display("Failed to read trajectories file '{}'", path.display()))]
    TrajectoriesFile {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to parse trajectories file '{}'", path.display()))]
    TrajectoriesParse {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: serde_json::Error,
    },
}
