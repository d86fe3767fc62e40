//! # Playback Error Types
//!
//! Every failure leaving the controller is one of these. Engine errors are
//! carried as the `source` so hosts can still log the platform cause.

use bridge_traits::error::BridgeError;
use std::fmt;
use thiserror::Error;

/// Stage of session setup at which an engine failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStage {
    Create,
    Load,
    Prepare,
    Start,
}

impl fmt::Display for EngineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EngineStage::Create => "create",
            EngineStage::Load => "load",
            EngineStage::Prepare => "prepare",
            EngineStage::Start => "start",
        })
    }
}

/// Coarse error classification exposed to the method channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Playback,
    NotImplemented,
}

impl ErrorKind {
    /// Error code reported back over the method channel.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::Playback => "PLAYBACK_ERROR",
            ErrorKind::NotImplemented => "NOT_IMPLEMENTED",
        }
    }
}

/// Errors that can occur while handling playback commands.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// A command argument was missing or malformed. No state was changed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Setting up a new session failed. The controller is left in `Failed`.
    #[error("Failed to {stage} '{path}': {source}")]
    SessionFailed {
        path: String,
        stage: EngineStage,
        #[source]
        source: BridgeError,
    },

    /// The engine rejected a command on an established session.
    #[error("Engine {operation} failed: {source}")]
    Engine {
        operation: &'static str,
        #[source]
        source: BridgeError,
    },

    /// The method channel delivered a command name we do not handle.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),
}

impl PlaybackError {
    pub(crate) fn engine(operation: &'static str, source: BridgeError) -> Self {
        PlaybackError::Engine { operation, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PlaybackError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            PlaybackError::SessionFailed { .. } | PlaybackError::Engine { .. } => {
                ErrorKind::Playback
            }
            PlaybackError::NotImplemented(_) => ErrorKind::NotImplemented,
        }
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
