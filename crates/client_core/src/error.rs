use shared::domain::PostId;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("failed to reach post source: {0}")]
    Transport(String),
    #[error("post source responded with status {0}")]
    Status(u16),
    #[error("malformed post payload: {0}")]
    Decode(String),
    #[error("post list load already started")]
    AlreadyStarted,
}

impl LoadError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("post list is not loaded")]
    NotLoaded,
    #[error("post {0} not found")]
    NotFound(PostId),
    #[error("post {0} conflicts with the server copy")]
    Conflict(PostId),
    #[error("post mutation responded with status {0}")]
    Status(u16),
    #[error("failed to reach post service: {0}")]
    Transport(String),
    #[error("malformed post mutation response: {0}")]
    Decode(String),
}

impl MutationError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
