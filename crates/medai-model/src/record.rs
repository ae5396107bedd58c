//! Per-bundle patient record.

use serde::{Deserialize, Serialize};

/// A scalar measurement exactly as it appeared in the source document.
///
/// Values are kept uncoerced until the dataset is finalized; text that does
/// not parse as a number becomes missing at that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceValue {
    Number(f64),
    Text(String),
}

impl SourceValue {
    /// Text form handed to the numeric coercion pass.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for SourceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SourceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Facts extracted from one bundle.
///
/// A record is mutated in place while the bundle's entries are scanned and
/// is only kept when a demographics entry populated `age`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Source file name.
    pub file: String,
    pub age: Option<i32>,
    pub bmi: Option<SourceValue>,
    pub systolic_bp: Option<SourceValue>,
    pub cholesterol: Option<SourceValue>,
    pub diabetes_history: bool,
    pub smoker: bool,
}

impl PatientRecord {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            age: None,
            bmi: None,
            systolic_bp: None,
            cholesterol: None,
            diabetes_history: false,
            smoker: false,
        }
    }

    /// Whether the record carries enough to be kept in the dataset.
    pub fn is_retainable(&self) -> bool {
        self.age.is_some()
    }
}
