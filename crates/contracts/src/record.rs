//! Classified record types - the unit of data flowing from Dispatcher to Sinks

use serde::{Deserialize, Serialize};

/// One classified input line.
///
/// Numeric payloads are carried as the original textual tokens, not parsed
/// values: coordinate formatting must survive byte-identical, and index
/// parsing belongs to the Indices sink so that overflow surfaces as a
/// [`ConvertError::NumericParse`](crate::ConvertError) instead of a
/// classifier failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifiedRecord {
    /// Exactly two non-negative integers - the structural header line.
    Header { n1: String, n2: String },

    /// Three decimal tokens, each with a decimal point and an optional
    /// letter exponent (`1.234D+05` style).
    Coordinate { x: String, y: String, z: String },

    /// Three non-negative integers, candidates for the 1-based to 0-based
    /// index shift.
    IndexTriple { a: String, b: String, c: String },

    /// A single-integer marker line. No payload, dropped by the Dispatcher.
    Singleton,

    /// None of the patterns matched. Fatal for the whole run, but an
    /// explicit variant rather than an error return - the caller decides.
    Unrecognized,
}

impl ClassifiedRecord {
    /// Which sink category this record belongs to, if any.
    ///
    /// `Singleton` and `Unrecognized` map to no category.
    pub fn category(&self) -> Option<RecordCategory> {
        match self {
            Self::Header { .. } => Some(RecordCategory::Header),
            Self::Coordinate { .. } => Some(RecordCategory::Coordinates),
            Self::IndexTriple { .. } => Some(RecordCategory::Indices),
            Self::Singleton | Self::Unrecognized => None,
        }
    }
}

/// Sink category identifier.
///
/// A fixed, closed set known at startup - one output destination and one
/// transform per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    Coordinates,
    Indices,
    Header,
}

impl std::fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coordinates => write!(f, "coordinates"),
            Self::Indices => write!(f, "indices"),
            Self::Header => write!(f, "header"),
        }
    }
}
