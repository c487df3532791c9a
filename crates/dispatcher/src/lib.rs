//! # Dispatcher
//!
//! Streaming classify-and-route module.
//!
//! Responsibilities:
//! - Read the `.ver` input line by line
//! - Classify each line and route the record to its category's sink
//! - Close every sink channel on end of input and collect one completion
//!   acknowledgment per sink

pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod sinks;

pub use contracts::{ClassifiedRecord, RecordCategory, RecordSink};
pub use dispatcher::{
    ConversionReport, Dispatcher, DispatcherBuilder, DispatcherConfig, Routes, create_dispatcher,
};
pub use error::DispatcherError;
pub use handle::{SinkHandle, SinkReport};
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::PltSink;
