//! Aggregated view of a read pass.

use medai_model::PatientRecord;

use crate::reader::{FileOutcome, SkipReason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub file: String,
    pub message: String,
}

/// Counts and per-file reasons collected while draining a reader.
#[derive(Debug, Clone, Default)]
pub struct ReadSummary {
    /// Matching files in the directory, before any limit.
    pub files_found: usize,
    /// Files actually opened.
    pub files_scanned: usize,
    pub records_extracted: usize,
    pub skipped: Vec<SkippedFile>,
    pub failed: Vec<FailedFile>,
}

impl ReadSummary {
    pub fn new(files_found: usize) -> Self {
        Self {
            files_found,
            ..Self::default()
        }
    }

    /// Tally one outcome, handing back the record if it produced one.
    pub fn record(&mut self, outcome: FileOutcome) -> Option<PatientRecord> {
        self.files_scanned += 1;
        match outcome {
            FileOutcome::Extracted(record) => {
                self.records_extracted += 1;
                Some(record)
            }
            FileOutcome::Skipped { file, reason } => {
                self.skipped.push(SkippedFile { file, reason });
                None
            }
            FileOutcome::Failed { file, error } => {
                self.failed.push(FailedFile {
                    file,
                    message: error.to_string(),
                });
                None
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
