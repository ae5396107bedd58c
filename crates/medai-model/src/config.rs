//! Configuration options for a single ingestion run.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// LOINC code for body-mass index.
pub const LOINC_BMI: &str = "39156-5";
/// LOINC code for total cholesterol.
pub const LOINC_CHOLESTEROL: &str = "2093-3";
/// LOINC code for tobacco smoking status.
pub const LOINC_SMOKING_STATUS: &str = "72166-2";

/// Observation codes the reader matches against, keyed by what they measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodedIdentifiers {
    pub bmi: String,
    pub cholesterol: String,
    pub smoking_status: String,
}

impl Default for CodedIdentifiers {
    fn default() -> Self {
        Self {
            bmi: LOINC_BMI.to_string(),
            cholesterol: LOINC_CHOLESTEROL.to_string(),
            smoking_status: LOINC_SMOKING_STATUS.to_string(),
        }
    }
}

/// Thresholds behind systolic imputation and the derived risk label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPolicy {
    /// Systolic pressure strictly above this value marks a patient at risk.
    pub systolic_threshold: f64,
    /// Value written for patients with no systolic reading.
    pub default_systolic: f64,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            systolic_threshold: 140.0,
            default_systolic: 120.0,
        }
    }
}

impl LabelPolicy {
    pub fn is_at_risk(&self, systolic_bp: f64, diabetes_history: bool) -> bool {
        systolic_bp > self.systolic_threshold || diabetes_history
    }
}

/// How a blood-pressure observation without a systolic component is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BloodPressureFallback {
    /// Fall back to the observation's own display text whenever no component
    /// supplied a systolic value.
    #[default]
    Corrected,
    /// Only consult the observation's own display text when it has no
    /// component list at all. Reproduces output of earlier runs.
    Legacy,
}

/// Options controlling one ingestion run.
///
/// Every field has a default, so a partial JSON file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Directory holding one bundle document per file.
    pub source_directory: PathBuf,
    /// Destination of the finalized table.
    pub output_path: PathBuf,
    /// Maximum number of files to enumerate, in file-name order.
    pub record_limit: Option<usize>,
    /// File extension (without the dot) a file needs to be read.
    pub file_extension: String,
    pub coded_identifiers: CodedIdentifiers,
    pub label_policy: LabelPolicy,
    pub blood_pressure_fallback: BloodPressureFallback,
    /// Date ages are computed against. Defaults to the local date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from("fhir"),
            output_path: PathBuf::from("processed_patient_data.csv"),
            record_limit: None,
            file_extension: "json".to_string(),
            coded_identifiers: CodedIdentifiers::default(),
            label_policy: LabelPolicy::default(),
            blood_pressure_fallback: BloodPressureFallback::default(),
            reference_date: None,
        }
    }
}

impl IngestConfig {
    pub fn new(source_directory: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source_directory: source_directory.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_record_limit(mut self, limit: Option<usize>) -> Self {
        self.record_limit = limit;
        self
    }

    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_blood_pressure_fallback(mut self, mode: BloodPressureFallback) -> Self {
        self.blood_pressure_fallback = mode;
        self
    }

    /// The date ages are computed against for this run.
    pub fn effective_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
