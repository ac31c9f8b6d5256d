use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use wmigen_core::{
    CodeRange, CountryRecord, Error as CoreError, Insertion, ManufacturerRecord, Region,
    TrieBuilder, UNKNOWN_LABEL, Wmi, WmiChar,
};

use crate::dispatch::lower;
use crate::errors::CodegenError;
use crate::model::{
    CompileIssue, CompileOptions, CompileReport, DatasetKind, DictReport, DropReason,
};
use crate::output::OutputDir;
use crate::render::{Backend, RustBackend};

/// One rendered dictionary ready to write.
#[derive(Debug, Clone)]
pub struct EmittedDict {
    pub dataset: DatasetKind,
    pub file_name: String,
    pub fn_name: String,
    pub source: String,
}

/// Result of a compile run.
#[derive(Debug, Clone)]
pub struct CompileResult {
    pub out_dir: PathBuf,
    pub dicts: Vec<EmittedDict>,
    pub report: CompileReport,
}

/// Per-dataset counters accumulated while records stream into a builder.
#[derive(Debug, Default)]
struct DatasetTally {
    dropped: u64,
    duplicates: u64,
    replaced: u64,
    entries_by_region: BTreeMap<String, u64>,
}

impl DatasetTally {
    /// Count one fresh entry under its continent. First symbols without an
    /// allocation (the `0` block in country data) are not counted.
    fn count_region(&mut self, first: WmiChar) {
        if let Some(region) = Region::from_first_symbol(first) {
            *self
                .entries_by_region
                .entry(region.label().to_string())
                .or_insert(0) += 1;
        }
    }
}

/// Entry point for compiling record sets into dictionary artifacts.
pub struct DictCompiler {
    options: CompileOptions,
    backend: Box<dyn Backend>,
}

impl DictCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            backend: Box::new(RustBackend),
        }
    }

    pub fn with_backend(options: CompileOptions, backend: Box<dyn Backend>) -> Self {
        Self { options, backend }
    }

    /// Compile both datasets, then stage and publish the artifacts and the
    /// run report. Nothing reaches `out_dir` unless every dataset compiled.
    pub fn run(
        &self,
        countries: &[CountryRecord],
        manufacturers: &[ManufacturerRecord],
    ) -> Result<CompileResult, CodegenError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = CompileReport::new(run_id.clone());

        info!(
            run_id = %run_id,
            countries = countries.len(),
            manufacturers = manufacturers.len(),
            "compile started"
        );

        let country = self.compile_country(countries, &mut report)?;
        let manufacturer = self.compile_manufacturer(manufacturers, &mut report)?;

        let mut out = OutputDir::create(&self.options.out_dir)?;
        let mut bytes_written = 0_u64;
        for dict in [&country, &manufacturer] {
            out.stage(&dict.file_name, dict.source.as_bytes())?;
            bytes_written += dict.source.len() as u64;
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report.bytes_written = bytes_written;
        let report_bytes = serde_json::to_vec_pretty(&report)?;
        out.stage("compile_report.json", &report_bytes)?;
        out.publish()?;

        for dict in [&country, &manufacturer] {
            info!(
                dataset = %dict.dataset,
                path = %self.options.out_dir.join(&dict.file_name).display(),
                bytes = dict.source.len(),
                "artifact written"
            );
        }

        info!(
            run_id = %run_id,
            duration_ms = report.duration_ms,
            bytes_written = report.bytes_written,
            warnings = report.warnings.len(),
            "compile completed"
        );

        Ok(CompileResult {
            out_dir: self.options.out_dir.clone(),
            dicts: vec![country, manufacturer],
            report,
        })
    }

    fn compile_country(
        &self,
        records: &[CountryRecord],
        report: &mut CompileReport,
    ) -> Result<EmittedDict, CodegenError> {
        let kind = DatasetKind::Country;
        let mut builder = TrieBuilder::new(kind.depth(), self.options.country_policy);
        let mut tally = DatasetTally::default();

        for record in records {
            if record.label.is_empty() {
                return Err(CodegenError::Input(CoreError::EmptyLabel(
                    record.code.clone(),
                )));
            }
            let range = CodeRange::parse(&record.code)?;
            for second in range.expand() {
                let path = [range.prefix, second];
                let outcome = builder.insert(&path, &record.label)?;
                if outcome == Insertion::Fresh {
                    tally.count_region(range.prefix);
                }
                let key: String = path.iter().map(|symbol| symbol.as_char()).collect();
                note_insertion(report, kind, key, &record.label, outcome, &mut tally);
            }
        }

        self.finish_dataset(kind, builder, records.len() as u64, tally, report)
    }

    fn compile_manufacturer(
        &self,
        records: &[ManufacturerRecord],
        report: &mut CompileReport,
    ) -> Result<EmittedDict, CodegenError> {
        let kind = DatasetKind::Manufacturer;
        let mut builder = TrieBuilder::new(kind.depth(), self.options.manufacturer_policy);
        let mut tally = DatasetTally::default();

        for record in records {
            let Some(wmi) = screen_manufacturer(record, report, &mut tally) else {
                continue;
            };
            let outcome = builder.insert(&wmi.symbols(), &record.manufacturer)?;
            if outcome == Insertion::Fresh {
                tally.count_region(wmi.first());
            }
            note_insertion(
                report,
                kind,
                wmi.to_string(),
                &record.manufacturer,
                outcome,
                &mut tally,
            );
        }

        self.finish_dataset(kind, builder, records.len() as u64, tally, report)
    }

    fn finish_dataset(
        &self,
        kind: DatasetKind,
        builder: TrieBuilder,
        records_in: u64,
        tally: DatasetTally,
        report: &mut CompileReport,
    ) -> Result<EmittedDict, CodegenError> {
        if builder.is_empty() {
            return Err(CodegenError::EmptyDataset(kind));
        }

        let entries = builder.len() as u64;
        let tree = builder.finish();
        let module = lower(kind.fn_name(), &tree, UNKNOWN_LABEL);
        let source = self.backend.render(&module);
        let file_name = format!("{}.{}", kind.artifact_stem(), self.backend.extension());

        info!(
            dataset = %kind,
            records_in,
            records_dropped = tally.dropped,
            duplicates = tally.duplicates,
            replaced = tally.replaced,
            entries,
            "dataset compiled"
        );

        report.dicts.push(DictReport {
            dataset: kind,
            file_name: file_name.clone(),
            records_in,
            records_dropped: tally.dropped,
            duplicates: tally.duplicates,
            replaced: tally.replaced,
            entries,
            entries_by_region: tally.entries_by_region,
        });

        Ok(EmittedDict {
            dataset: kind,
            file_name,
            fn_name: kind.fn_name().to_string(),
            source,
        })
    }
}

fn note_insertion(
    report: &mut CompileReport,
    kind: DatasetKind,
    key: String,
    label: &str,
    outcome: Insertion,
    tally: &mut DatasetTally,
) {
    match outcome {
        Insertion::Fresh => {}
        Insertion::Replaced { previous } => {
            tally.replaced += 1;
            warn!(
                dataset = %kind,
                key = %key,
                previous = %previous,
                label = %label,
                "duplicate key overwritten"
            );
            report.record_warning(CompileIssue {
                level: "warn".to_string(),
                code: "duplicate_key".to_string(),
                message: format!("key '{key}' remapped from '{previous}' to '{label}'"),
                dataset: kind,
                key: Some(key),
                label: Some(label.to_string()),
            });
        }
        Insertion::Duplicate { kept } => {
            tally.duplicates += 1;
            warn!(
                dataset = %kind,
                key = %key,
                kept = %kept,
                dropped = %label,
                "duplicate key ignored"
            );
            report.record_warning(CompileIssue {
                level: "warn".to_string(),
                code: "duplicate_key".to_string(),
                message: format!("key '{key}' already maps to '{kept}', ignoring '{label}'"),
                dataset: kind,
                key: Some(key),
                label: Some(label.to_string()),
            });
        }
    }
}

/// Validity gates for raw NHTSA rows: WMI shape, continent allocation,
/// present labels. Returns the validated WMI or records the drop.
fn screen_manufacturer(
    record: &ManufacturerRecord,
    report: &mut CompileReport,
    tally: &mut DatasetTally,
) -> Option<Wmi> {
    let wmi = match Wmi::parse(&record.wmi) {
        Ok(wmi) => wmi,
        Err(err) => {
            let reason = match err {
                CoreError::Symbol(_) => DropReason::WmiSymbol,
                _ => DropReason::WmiLength,
            };
            drop_record(report, tally, reason, record, err.to_string());
            return None;
        }
    };

    if Region::from_first_symbol(wmi.first()).is_none() {
        drop_record(
            report,
            tally,
            DropReason::UnallocatedRegion,
            record,
            format!("first symbol '{}' has no continent allocation", wmi.first()),
        );
        return None;
    }

    if record.country.is_empty() || record.manufacturer.is_empty() {
        drop_record(
            report,
            tally,
            DropReason::EmptyLabel,
            record,
            "missing country or manufacturer label".to_string(),
        );
        return None;
    }

    Some(wmi)
}

fn drop_record(
    report: &mut CompileReport,
    tally: &mut DatasetTally,
    reason: DropReason,
    record: &ManufacturerRecord,
    message: String,
) {
    tally.dropped += 1;
    warn!(
        dataset = %DatasetKind::Manufacturer,
        wmi = %record.wmi,
        reason = reason.code(),
        "manufacturer record dropped"
    );
    report.record_drop(
        reason,
        CompileIssue {
            level: "warn".to_string(),
            code: reason.code().to_string(),
            message,
            dataset: DatasetKind::Manufacturer,
            key: Some(record.wmi.clone()),
            label: Some(record.manufacturer.clone()),
        },
    );
}
