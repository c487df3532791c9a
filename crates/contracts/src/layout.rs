//! Output layout configuration
//!
//! The two historical converter variants (split coords/idxs files vs a
//! combined header+coords file) are unified behind one declared layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Declared output layout, selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// `coords-<base>.plt` + `idxs-<base>.plt`; header lines are dropped
    /// like singleton markers.
    #[default]
    Split,

    /// `<base>.plt` holding the header row followed by all coordinate rows,
    /// plus `idxs-<base>.plt` for the indices.
    Combined,
}

impl OutputLayout {
    /// Destination for the coordinates sink (which also receives the header
    /// row in combined layout).
    pub fn coordinates_path(&self, dir: &Path, base: &str) -> PathBuf {
        match self {
            Self::Split => dir.join(format!("coords-{base}.plt")),
            Self::Combined => dir.join(format!("{base}.plt")),
        }
    }

    /// Destination for the indices sink, identical in both layouts.
    pub fn indices_path(&self, dir: &Path, base: &str) -> PathBuf {
        dir.join(format!("idxs-{base}.plt"))
    }

    /// Whether header records are streamed to the coordinates sink rather
    /// than dropped.
    pub fn routes_header(&self) -> bool {
        matches!(self, Self::Combined)
    }

    /// Singleton anchoring is variant-specific: the split converter only
    /// required a leading digit, the combined one matched the whole line.
    pub fn singleton_anchor(&self) -> SingletonAnchor {
        match self {
            Self::Split => SingletonAnchor::Prefix,
            Self::Combined => SingletonAnchor::FullLine,
        }
    }
}

impl std::fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::Combined => write!(f, "combined"),
        }
    }
}

/// How the singleton pattern is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingletonAnchor {
    /// A leading digit is enough (`^\s*\d`).
    Prefix,
    /// The whole line must be one integer (`^\s*\d+\s*$`).
    FullLine,
}
