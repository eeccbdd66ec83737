use thiserror::Error;

/// Errors constructing or configuring a [`TracePlayer`](super::TracePlayer)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// A player needs at least one step to stand on
    #[error("cannot play an empty trace")]
    EmptyTrace,

    /// Tick intervals must be positive
    #[error("invalid playback speed: {0} ms (must be > 0)")]
    InvalidSpeed(u64),
}
