//! Ingestion pipeline with explicit stages.
//!
//! 1. **Ingest**: list and read bundle files, one outcome per file
//! 2. **Finalize**: coerce, impute, and label the extracted records
//! 3. **Persist**: write the table as delimited text
//!
//! A run that extracts no record stops after ingest and writes nothing.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Level, info, info_span, trace};

use medai_dataset::{Dataset, DatasetBuilder};
use medai_ingest::{BundleReader, FileOutcome, ReadSummary};
use medai_model::{IngestConfig, PatientRecord, SourceValue};

use crate::logging::redact_value;
use crate::types::RunResult;

/// Rows shown in the run preview.
pub const PREVIEW_ROWS: usize = 5;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    pub builder: DatasetBuilder,
    pub summary: ReadSummary,
}

/// Read every eligible file under the configured source directory.
///
/// A missing source directory is fatal. Per-file problems only show up in
/// the returned summary.
pub fn ingest(config: &IngestConfig, show_progress: bool) -> Result<IngestResult> {
    let span = info_span!("ingest", source = %config.source_directory.display());
    let _guard = span.enter();
    let start = Instant::now();

    let reader = BundleReader::from_config(config).with_context(|| {
        format!(
            "open source directory {}",
            config.source_directory.display()
        )
    })?;

    let progress = progress_bar(reader.remaining(), show_progress);
    let mut summary = ReadSummary::new(reader.files_found());
    let mut builder = DatasetBuilder::new(config.label_policy);

    for outcome in reader {
        progress.set_message(outcome.file().to_string());
        if let FileOutcome::Extracted(record) = &outcome {
            trace_record(record);
        }
        if let Some(record) = summary.record(outcome) {
            builder.push(record);
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    info!(
        files_found = summary.files_found,
        files_scanned = summary.files_scanned,
        records = summary.records_extracted,
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(IngestResult { builder, summary })
}

/// Run the finalize passes. Returns `None` when there is nothing to finalize.
pub fn finalize(builder: DatasetBuilder) -> Result<Option<Dataset>> {
    if builder.is_empty() {
        info!("no records extracted; skipping finalize and persist");
        return Ok(None);
    }
    let span = info_span!("finalize", records = builder.len());
    let _guard = span.enter();
    let start = Instant::now();

    let dataset = builder.finalize().context("finalize dataset")?;

    info!(
        rows = dataset.record_count(),
        at_risk = dataset.report.at_risk,
        duration_ms = start.elapsed().as_millis(),
        "finalize complete"
    );
    Ok(Some(dataset))
}

pub fn persist(dataset: &mut Dataset, output_path: &Path) -> Result<()> {
    let span = info_span!("persist", output = %output_path.display());
    let _guard = span.enter();
    let start = Instant::now();

    dataset
        .write_csv(output_path)
        .with_context(|| format!("write {}", output_path.display()))?;

    info!(
        rows = dataset.record_count(),
        duration_ms = start.elapsed().as_millis(),
        "persist complete"
    );
    Ok(())
}

/// Run ingest, finalize, and persist for one configuration.
pub fn run_ingestion(config: &IngestConfig, show_progress: bool) -> Result<RunResult> {
    let IngestResult { builder, summary } = ingest(config, show_progress)?;

    let mut result = RunResult {
        source_directory: config.source_directory.clone(),
        output_path: config.output_path.clone(),
        written: false,
        read: summary,
        report: None,
        preview: None,
        record_count: 0,
    };

    let Some(mut dataset) = finalize(builder)? else {
        return Ok(result);
    };
    persist(&mut dataset, &config.output_path)?;

    result.written = true;
    result.record_count = dataset.record_count();
    result.preview = Some(dataset.preview(PREVIEW_ROWS).context("build preview")?);
    result.report = Some(dataset.report);
    Ok(result)
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar
}

fn trace_record(record: &PatientRecord) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    let shown = |value: Option<&SourceValue>| {
        value.map_or_else(|| "-".to_string(), SourceValue::as_text)
    };
    let age = record.age.map_or_else(|| "-".to_string(), |v| v.to_string());
    let bmi = shown(record.bmi.as_ref());
    let systolic_bp = shown(record.systolic_bp.as_ref());
    let cholesterol = shown(record.cholesterol.as_ref());
    trace!(
        file = %record.file,
        age = %redact_value(&age),
        bmi = %redact_value(&bmi),
        systolic_bp = %redact_value(&systolic_bp),
        cholesterol = %redact_value(&cholesterol),
        diabetes_history = record.diabetes_history,
        smoker = record.smoker,
        "record extracted"
    );
}
