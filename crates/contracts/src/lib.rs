//! # Contracts
//!
//! Frozen interface contracts, defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are
//! prohibited.
//!
//! ## Record Model
//! - One input line yields at most one [`ClassifiedRecord`]
//! - Each record is routed to exactly one sink (or dropped) and never outlives
//!   one pipeline pass

mod error;
mod layout;
mod record;
mod sink;

pub use error::*;
pub use layout::*;
pub use record::*;
pub use sink::*;
