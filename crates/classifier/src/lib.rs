//! # Classifier
//!
//! Pure line classification module.
//!
//! Responsibilities:
//! - Map one raw text line to one [`ClassifiedRecord`]
//! - No I/O, no concurrency, no cross-line state
//!
//! The pattern order is part of the contract: the two-integer header check
//! is anchored at both ends and must run before the start-anchored
//! three-integer check, and the required decimal point keeps coordinate
//! lines disjoint from index triples.

use contracts::{ClassifiedRecord, SingletonAnchor};
use regex::Regex;

/// A decimal token: optional sign, required decimal point, optional letter
/// exponent. Tolerates engineering-notation exponents like `1.234D+05`.
const FLOAT_TOKEN: &str = r"-?\d+\.\d+(?:[A-Za-z][-+]?\d*)?";

/// Ordered pattern matcher over input lines.
///
/// Compiles its patterns once at construction; `classify` is total and
/// deterministic.
pub struct LineClassifier {
    coordinates: Regex,
    header: Regex,
    index_triple: Regex,
    singleton: Regex,
}

impl LineClassifier {
    /// Build a classifier with the given singleton anchoring.
    pub fn new(anchor: SingletonAnchor) -> Self {
        let coordinates = format!(r"^\s*({FLOAT_TOKEN})\s+({FLOAT_TOKEN})\s+({FLOAT_TOKEN})");
        let singleton = match anchor {
            SingletonAnchor::Prefix => r"^\s*\d",
            SingletonAnchor::FullLine => r"^\s*\d+\s*$",
        };

        let compile = |pattern: &str| {
            Regex::new(pattern).expect("pattern is a compile-time constant")
        };

        Self {
            coordinates: compile(&coordinates),
            header: compile(r"^\s*(\d+)\s+(\d+)\s*$"),
            index_triple: compile(r"^\s*(\d+)\s+(\d+)\s+(\d+)"),
            singleton: compile(singleton),
        }
    }

    /// Classify one line. Never fails; `Unrecognized` is an explicit result.
    ///
    /// First match wins, in priority order: coordinates, header, index
    /// triple, singleton.
    pub fn classify(&self, line: &str) -> ClassifiedRecord {
        if let Some(caps) = self.coordinates.captures(line) {
            return ClassifiedRecord::Coordinate {
                x: caps[1].to_string(),
                y: caps[2].to_string(),
                z: caps[3].to_string(),
            };
        }

        if let Some(caps) = self.header.captures(line) {
            return ClassifiedRecord::Header {
                n1: caps[1].to_string(),
                n2: caps[2].to_string(),
            };
        }

        if let Some(caps) = self.index_triple.captures(line) {
            return ClassifiedRecord::IndexTriple {
                a: caps[1].to_string(),
                b: caps[2].to_string(),
                c: caps[3].to_string(),
            };
        }

        if self.singleton.is_match(line) {
            return ClassifiedRecord::Singleton;
        }

        ClassifiedRecord::Unrecognized
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(SingletonAnchor::Prefix)
    }
}
