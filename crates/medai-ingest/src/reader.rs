//! Lazy, file-by-file bundle reading.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use medai_model::{IngestConfig, PatientRecord};

use crate::bundle::{BUNDLE_RESOURCE_TYPE, Bundle};
use crate::discovery::list_bundle_files;
use crate::error::{IngestError, Result};
use crate::extract::{ExtractionRules, extract_record};
use crate::summary::ReadSummary;

/// Why a readable file produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Top-level `resourceType` is not `Bundle`.
    NotBundle { resource_type: Option<String> },
    /// The bundle had no demographics entry, so no age.
    NoDemographics,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBundle {
                resource_type: Some(kind),
            } => write!(f, "resourceType is {kind}, not {BUNDLE_RESOURCE_TYPE}"),
            Self::NotBundle {
                resource_type: None,
            } => write!(f, "no resourceType"),
            Self::NoDemographics => write!(f, "no demographics entry"),
        }
    }
}

/// Result of reading one file.
#[derive(Debug)]
pub enum FileOutcome {
    Extracted(PatientRecord),
    Skipped { file: String, reason: SkipReason },
    Failed { file: String, error: IngestError },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            Self::Extracted(record) => &record.file,
            Self::Skipped { file, .. } | Self::Failed { file, .. } => file,
        }
    }
}

/// Read, parse, and extract one bundle file.
///
/// Never fails: I/O and parse errors become [`FileOutcome::Failed`]. The file
/// is read in full and closed before parsing begins.
pub fn read_bundle_file(path: &Path, rules: &ExtractionRules) -> FileOutcome {
    let file = file_name(path);
    match read_document(path) {
        Ok(document) => outcome_for_document(file, path, &document, rules),
        Err(error) => FileOutcome::Failed { file, error },
    }
}

fn read_document(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

fn outcome_for_document(
    file: String,
    path: &Path,
    document: &Value,
    rules: &ExtractionRules,
) -> FileOutcome {
    if !document.is_object() {
        return FileOutcome::Failed {
            file,
            error: IngestError::NotAnObject {
                path: path.to_path_buf(),
            },
        };
    }

    let resource_type = document.get("resourceType").and_then(Value::as_str);
    if resource_type != Some(BUNDLE_RESOURCE_TYPE) {
        return FileOutcome::Skipped {
            file,
            reason: SkipReason::NotBundle {
                resource_type: resource_type.map(str::to_string),
            },
        };
    }

    let bundle = match Bundle::deserialize(document) {
        Ok(bundle) => bundle,
        Err(source) => {
            return FileOutcome::Failed {
                file,
                error: IngestError::InvalidBundle {
                    path: path.to_path_buf(),
                    source,
                },
            };
        }
    };

    let record = extract_record(&file, &bundle, rules);
    if record.is_retainable() {
        FileOutcome::Extracted(record)
    } else {
        FileOutcome::Skipped {
            file,
            reason: SkipReason::NoDemographics,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Iterator over the outcomes of every eligible file in a directory.
///
/// Files are listed up front, sorted by name, and read one at a time as the
/// iterator advances.
#[derive(Debug)]
pub struct BundleReader {
    files: std::vec::IntoIter<PathBuf>,
    files_found: usize,
    rules: ExtractionRules,
}

impl BundleReader {
    /// List `dir` and prepare to read at most `limit` files from it.
    ///
    /// Fails when `dir` does not exist, before any file is opened.
    pub fn open(
        dir: &Path,
        extension: &str,
        limit: Option<usize>,
        rules: ExtractionRules,
    ) -> Result<Self> {
        let mut files = list_bundle_files(dir, extension)?;
        let files_found = files.len();
        if let Some(limit) = limit {
            files.truncate(limit);
        }
        debug!(
            dir = %dir.display(),
            files_found,
            files_to_scan = files.len(),
            "bundle files listed"
        );
        Ok(Self {
            files: files.into_iter(),
            files_found,
            rules,
        })
    }

    pub fn from_config(config: &IngestConfig) -> Result<Self> {
        Self::open(
            &config.source_directory,
            &config.file_extension,
            config.record_limit,
            ExtractionRules::from_config(config),
        )
    }

    /// Number of matching files in the directory, before the limit.
    pub fn files_found(&self) -> usize {
        self.files_found
    }

    /// Number of files this reader has yet to read.
    pub fn remaining(&self) -> usize {
        self.files.len()
    }

    /// Drain the reader, keeping extracted records and tallying the rest.
    pub fn read_all(mut self) -> (Vec<PatientRecord>, ReadSummary) {
        let mut summary = ReadSummary::new(self.files_found);
        let records = self
            .by_ref()
            .filter_map(|outcome| summary.record(outcome))
            .collect();
        (records, summary)
    }
}

impl Iterator for BundleReader {
    type Item = FileOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files.next()?;
        let outcome = read_bundle_file(&path, &self.rules);
        match &outcome {
            FileOutcome::Extracted(_) => {}
            FileOutcome::Skipped { file, reason } => {
                debug!(file = %file, reason = %reason, "skipping file");
            }
            FileOutcome::Failed { file, error } => {
                warn!(file = %file, error = %error, "skipping unreadable file");
            }
        }
        Some(outcome)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.files.size_hint()
    }
}

impl ExactSizeIterator for BundleReader {}
