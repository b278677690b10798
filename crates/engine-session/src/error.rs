//! Error types for engine sessions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while driving an engine session.
///
/// Every variant is fatal to the session it came from: there is no retry
/// anywhere, and a session that reported an error should be dropped.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The engine could not be started, its pipes could not be opened,
    /// or the construction options could not be applied.
    #[error("Failed to initialize engine at {}: {source}", .path.display())]
    Initialization {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A command/response exchange failed.
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// Releasing the engine process or its pipes failed. Raised only after
    /// every release step has been attempted.
    #[error("Failed to shut down engine: {0}")]
    Shutdown(#[source] std::io::Error),
}

impl SessionError {
    pub(crate) fn initialization(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SessionError::Initialization {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Failures of a single command/response exchange.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Reading from or writing to the engine failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The engine closed its output before the expected line arrived.
    #[error("Engine closed its output while waiting for '{expected}'")]
    StreamClosed { expected: String },
    /// A command was sent while the previous exchange was still unacknowledged.
    #[error("Cannot send '{command}': previous exchange is still awaiting its acknowledgment")]
    ExchangeOutstanding { command: String },
    /// An earlier exchange failed and the session can no longer be trusted.
    #[error("Session is broken by an earlier failure")]
    Broken,
    /// The session was shut down.
    #[error("Session is closed")]
    Closed,
}
