//! Core model for WMI dictionary compilation.
//!
//! This crate defines the validated WMI alphabet, country code ranges, the
//! continent classifier and the decision trie the code emitter consumes.
//! It performs no I/O: records come in as plain values and leave as a
//! [`DecisionNode`] tree.

pub mod alphabet;
pub mod error;
pub mod range;
pub mod record;
pub mod region;
pub mod trie;

pub use alphabet::{ALPHABET, Wmi, WmiChar};
pub use error::{Error, Result};
pub use range::CodeRange;
pub use record::{CountryRecord, ManufacturerRecord};
pub use region::Region;
pub use trie::{ConflictPolicy, DecisionNode, Insertion, TrieBuilder};

/// Label every dictionary falls back to when a path is unmapped.
pub const UNKNOWN_LABEL: &str = "Unknown";
