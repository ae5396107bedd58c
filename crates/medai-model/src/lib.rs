//! Shared types for the patient dataset pipeline.
//!
//! - **record**: the per-bundle [`PatientRecord`] and raw [`SourceValue`]s
//! - **config**: [`IngestConfig`] with coded identifiers and label policy
//! - **columns**: output column names and layouts
//! - **error**: configuration loading errors

pub mod columns;
pub mod config;
pub mod error;
pub mod record;

pub use config::{BloodPressureFallback, CodedIdentifiers, IngestConfig, LabelPolicy};
pub use error::{ConfigError, Result};
pub use record::{PatientRecord, SourceValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_policy_threshold_is_exclusive() {
        let policy = LabelPolicy::default();
        assert!(!policy.is_at_risk(140.0, false));
        assert!(policy.is_at_risk(140.5, false));
        assert!(policy.is_at_risk(110.0, true));
    }

    #[test]
    fn new_record_starts_empty() {
        let record = PatientRecord::new("patient.json");
        assert_eq!(record.file, "patient.json");
        assert_eq!(record.age, None);
        assert_eq!(record.bmi, None);
        assert!(!record.diabetes_history);
        assert!(!record.smoker);
        assert!(!record.is_retainable());
    }
}
