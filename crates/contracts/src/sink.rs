//! RecordSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for Sinks.

use crate::{ClassifiedRecord, ConvertError};

/// Record output trait
///
/// All sink implementations must implement this trait. A sink owns its
/// destination exclusively for the run's duration.
#[trait_variant::make(RecordSink: Send)]
pub trait LocalRecordSink {
    /// Sink name (used for logging/metrics and error context)
    fn name(&self) -> &str;

    /// Transform and append one record
    ///
    /// # Errors
    /// Returns write or transform errors (should include context); any error
    /// is fatal for the whole run
    async fn write(&mut self, record: &ClassifiedRecord) -> Result<(), ConvertError>;

    /// Flush buffered output
    async fn flush(&mut self) -> Result<(), ConvertError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ConvertError>;
}
