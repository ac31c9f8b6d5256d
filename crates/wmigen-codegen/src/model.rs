use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use wmigen_core::ConflictPolicy;

/// Options for a compile run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Directory where dictionary artifacts are written.
    pub out_dir: PathBuf,
    /// Conflict handling for the country dataset.
    pub country_policy: ConflictPolicy,
    /// Conflict handling for the manufacturer dataset.
    pub manufacturer_policy: ConflictPolicy,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("dicts"),
            country_policy: ConflictPolicy::Overwrite,
            manufacturer_policy: ConflictPolicy::FirstWins,
        }
    }
}

/// The two dictionaries a run compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Country,
    Manufacturer,
}

impl DatasetKind {
    /// File stem of the emitted artifact.
    pub fn artifact_stem(self) -> &'static str {
        match self {
            DatasetKind::Country => "country",
            DatasetKind::Manufacturer => "manufacturer",
        }
    }

    /// Name of the emitted dispatch function.
    pub fn fn_name(self) -> &'static str {
        match self {
            DatasetKind::Country => "map_wmi_to_country",
            DatasetKind::Manufacturer => "map_wmi_to_manufacturer",
        }
    }

    /// Fixed trie depth of the dataset.
    pub fn depth(self) -> usize {
        match self {
            DatasetKind::Country => 2,
            DatasetKind::Manufacturer => 3,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.artifact_stem())
    }
}

/// Why a manufacturer record was dropped before trie construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The WMI is not exactly three symbols.
    WmiLength,
    /// The WMI contains a symbol outside the alphabet.
    WmiSymbol,
    /// The first symbol has no continent allocation.
    UnallocatedRegion,
    /// The country or manufacturer label is empty.
    EmptyLabel,
}

impl DropReason {
    /// Issue code used in logs and the report.
    pub fn code(self) -> &'static str {
        match self {
            DropReason::WmiLength => "wmi_length",
            DropReason::WmiSymbol => "wmi_symbol",
            DropReason::UnallocatedRegion => "unallocated_region",
            DropReason::EmptyLabel => "empty_label",
        }
    }
}

/// Structured compile issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileIssue {
    pub level: String,
    pub code: String,
    pub message: String,
    pub dataset: DatasetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Summary of one compiled dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictReport {
    pub dataset: DatasetKind,
    pub file_name: String,
    pub records_in: u64,
    pub records_dropped: u64,
    pub duplicates: u64,
    pub replaced: u64,
    pub entries: u64,
    /// Mapped trie entries per continent of their first symbol.
    pub entries_by_region: BTreeMap<String, u64>,
}

/// Report for a compile run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileReport {
    pub run_id: String,
    pub started_at: String,
    pub dicts: Vec<DictReport>,
    pub drops_by_reason: BTreeMap<String, u64>,
    pub warnings_by_code: BTreeMap<String, u64>,
    pub warnings: Vec<CompileIssue>,
    pub duration_ms: u64,
    pub bytes_written: u64,
}

impl CompileReport {
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            started_at: chrono::Utc::now().to_rfc3339(),
            dicts: Vec::new(),
            drops_by_reason: BTreeMap::new(),
            warnings_by_code: BTreeMap::new(),
            warnings: Vec::new(),
            duration_ms: 0,
            bytes_written: 0,
        }
    }

    pub fn record_warning(&mut self, issue: CompileIssue) {
        *self.warnings_by_code.entry(issue.code.clone()).or_insert(0) += 1;
        self.warnings.push(issue);
    }

    pub fn record_drop(&mut self, reason: DropReason, issue: CompileIssue) {
        *self
            .drops_by_reason
            .entry(reason.code().to_string())
            .or_insert(0) += 1;
        self.record_warning(issue);
    }
}
