//! Sink implementations
//!
//! One tab-separated table sink type; the Dispatcher instantiates it once
//! per output category.

mod plt;

pub use self::plt::PltSink;
