//! Dispatcher error types

use thiserror::Error;

use contracts::ConvertError;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Sink creation error
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// Routing target's worker stopped before end of input
    #[error("sink '{name}' stopped accepting records before end of input")]
    SinkClosed { name: String },

    /// Sink worker task panicked
    #[error("sink '{name}' worker panicked")]
    WorkerPanic { name: String },

    /// Classification or transform error (from contracts)
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatcherError {
    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a sink-closed routing error
    pub fn sink_closed(name: impl Into<String>) -> Self {
        Self::SinkClosed { name: name.into() }
    }

    /// Create a worker panic error
    pub fn worker_panic(name: impl Into<String>) -> Self {
        Self::WorkerPanic { name: name.into() }
    }
}
