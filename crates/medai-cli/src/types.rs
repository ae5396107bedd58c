use std::path::PathBuf;

use polars::prelude::DataFrame;

use medai_dataset::FinalizeReport;
use medai_ingest::ReadSummary;

/// Everything one ingestion run produced, for reporting.
#[derive(Debug)]
pub struct RunResult {
    pub source_directory: PathBuf,
    pub output_path: PathBuf,
    /// False when no record was extracted and nothing was written.
    pub written: bool,
    pub read: ReadSummary,
    pub report: Option<FinalizeReport>,
    /// Leading rows of age, systolic pressure, and label.
    pub preview: Option<DataFrame>,
    pub record_count: usize,
}

impl RunResult {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}
