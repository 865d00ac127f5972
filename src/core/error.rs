// ============================================================================
// spark-broadcast - Errors
// ============================================================================

use thiserror::Error;

pub type BroadcastResult<T> = Result<T, BroadcastError>;

/// Errors surfaced by the enhancer and by notification rounds.
///
/// `Clone` because one failure is observed by every holder of the same
/// [`Notification`](crate::Notification).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("invalid broadcast configuration: {0}")]
    InvalidConfig(String),

    #[error("notification enhancer is already installed on a container")]
    AlreadyInstalled,

    #[error("listener failed: {0}")]
    Listener(#[from] ListenerError),
}

impl BroadcastError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        BroadcastError::InvalidConfig(msg.into())
    }
}

/// Failure reported by an asynchronous listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by an animation-frame hook. Logged, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("animation frame request failed: {0}")]
pub struct FrameError(pub String);

// =============================================================================
// TESTS
// =============================================================================
