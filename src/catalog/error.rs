//! Errors raised while accepting or loading an example

use crate::player::PlayerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExampleError {
    #[error("the example needs a title")]
    EmptyTitle,

    #[error("the example needs a short description")]
    EmptyDescription,

    #[error("variable #{0} has no name")]
    EmptyVariableName(usize),

    #[error("'{0}' is not a valid C identifier")]
    InvalidVariableName(String),

    #[error("variable '{0}' is declared more than once")]
    DuplicateVariable(String),

    /// The generated trace failed its replay check
    #[error("self-check failed at step {step}: {reason}")]
    SelfCheck { step: usize, reason: String },

    #[error("could not start playback: {0}")]
    Player(#[from] PlayerError),

    #[error("no example with id '{0}'")]
    UnknownExample(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid example definition: {0}")]
    Json(#[from] serde_json::Error),
}
