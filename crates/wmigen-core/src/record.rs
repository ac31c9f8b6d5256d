use serde::{Deserialize, Serialize};

/// One country fact: a compact code range and the country it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub code: String,
    pub label: String,
}

/// One manufacturer fact keyed by a full three-symbol WMI.
///
/// `country` never reaches an artifact; a record without one is treated as
/// junk and dropped before trie construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerRecord {
    pub wmi: String,
    pub country: String,
    pub manufacturer: String,
}
