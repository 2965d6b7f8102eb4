use thiserror::Error;

use crate::session::Stage;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Event `{event}` is not accepted in stage {stage}")]
    InvalidTransition { event: &'static str, stage: Stage },

    #[error("Stale event: expected ticket {expected}, got {actual}")]
    StaleEvent { expected: String, actual: String },

    #[error("Unknown round type: {0}")]
    InvalidRoundType(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from a callback of an older session generation or round
    pub fn is_stale(&self) -> bool {
        matches!(self, Error::StaleEvent { .. })
    }
}
