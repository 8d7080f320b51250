mod replay;
mod tick;
mod trajectory;

pub use replay::*;
pub use tick::*;
pub use trajectory::*;

/// Well-known topic the live vessel-telemetry stream is broadcast on.
pub const TELEMETRY_TOPIC: &str = "vessel-telemetry";
