#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Smooths discrete, low-frequency telemetry ticks into continuous map-marker
//! movement for the dashboard's live vessel replay.

pub mod animator;
pub mod driver;
pub mod error;

pub use animator::MarkerAnimator;
pub use driver::AnimatorDriver;
pub use error::{Error, Result};
