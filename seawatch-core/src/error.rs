use snafu::{Location, Snafu};

pub type CoreResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to publish to topic '{topic}'"))]
    Publish {
        #[snafu(implicit)]
        location: Location,
        topic: String,
    },
    #[snafu(display("Failed to subscribe to topic '{topic}'"))]
    Subscribe {
        #[snafu(implicit)]
        location: Location,
        topic: String,
    },
    #[snafu(display("Tick stream lost its transport connection"))]
    Disconnected {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed to load trajectories from the upstream source, error '{error_stringified}'"))]
    TrajectorySource {
        #[snafu(implicit)]
        location: Location,
        error_stringified: String,
    },
}
