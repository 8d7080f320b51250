#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Domain types and ports for the seawatch live-telemetry replay subsystem.

mod broadcast;
mod domain;
mod environment;
mod error;
mod ports;

pub use broadcast::*;
pub use domain::*;
pub use environment::*;
pub use error::*;
pub use ports::*;
