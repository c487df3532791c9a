//! Layered error definitions
//!
//! Categorized by source: input shape / numeric transform / sink I/O.
//! All kinds are unrecoverable at the point of detection - the run is
//! all-or-nothing, and the top-level run function performs the single abort.

use thiserror::Error;

/// Unified conversion error type
#[derive(Debug, Error)]
pub enum ConvertError {
    // ===== Input Errors =====
    /// A line matched none of the record patterns
    #[error("unrecognized line {line_no}: '{text}'")]
    InputShape { line_no: u64, text: String },

    /// An index token failed to parse or underflowed the 1-based to 0-based
    /// shift
    #[error("cannot shift index token '{token}': {message}")]
    NumericParse { token: String, message: String },

    // ===== Sink Errors =====
    /// Sink write/flush error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Create an unrecognized-line error
    pub fn input_shape(line_no: u64, text: impl Into<String>) -> Self {
        Self::InputShape {
            line_no,
            text: text.into(),
        }
    }

    /// Create a numeric parse/underflow error
    pub fn numeric_parse(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NumericParse {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Create a sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
