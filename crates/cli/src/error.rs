//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file not found
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// Input extension is not .ver
    #[error("You must provide a .ver file, got: {path}")]
    InvalidExtension { path: String },

    /// Input file name has no usable base name
    #[error("Cannot derive an output base name from: {path}")]
    NoBaseName { path: String },

    /// Pipeline execution error
    #[error(transparent)]
    Dispatcher(#[from] dispatcher::DispatcherError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    pub fn invalid_extension(path: impl Into<String>) -> Self {
        Self::InvalidExtension { path: path.into() }
    }

    pub fn no_base_name(path: impl Into<String>) -> Self {
        Self::NoBaseName { path: path.into() }
    }
}
