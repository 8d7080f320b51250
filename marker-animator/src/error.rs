use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Tick stream lost its transport connection"))]
    Transport {
        #[snafu(implicit)]
        location: Location,
        source: seawatch_core::Error,
    },
    #[snafu(display("Tick stream closed before the playback session ended"))]
    StreamClosed {
        #[snafu(implicit)]
        location: Location,
    },
}
