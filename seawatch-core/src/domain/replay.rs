use strum::{AsRefStr, EnumString};

/// UI-facing state of one playback session, rendered as the stream indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ReplayStatus {
    Idle,
    Live,
    Complete,
    Stopped,
    Disconnected,
}

/// How a playback session terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionEnd {
    /// All trajectories were exhausted and the terminal tick was emitted.
    Completed,
    /// Halted by an explicit stop before completion.
    Stopped,
}
