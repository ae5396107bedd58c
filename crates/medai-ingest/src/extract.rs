//! Patient record extraction from a parsed bundle.
//!
//! Entries are visited in document order and each one may overwrite what an
//! earlier entry set, so the last matching fact wins.

use chrono::NaiveDate;
use tracing::trace;

use medai_model::{BloodPressureFallback, CodedIdentifiers, IngestConfig, PatientRecord};

use crate::age::age_from_birth_date;
use crate::bundle::{Bundle, Condition, Observation, Resource};

const SYSTOLIC: &str = "systolic";
const SMOKER: &str = "smoker";
const NEVER: &str = "never";
const DIABETES: &str = "diabetes";

/// Inputs that decide how entries map onto a record.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    pub codes: CodedIdentifiers,
    pub blood_pressure_fallback: BloodPressureFallback,
    /// Date ages are computed against.
    pub reference_date: NaiveDate,
}

impl ExtractionRules {
    pub fn new(codes: CodedIdentifiers, reference_date: NaiveDate) -> Self {
        Self {
            codes,
            blood_pressure_fallback: BloodPressureFallback::default(),
            reference_date,
        }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            codes: config.coded_identifiers.clone(),
            blood_pressure_fallback: config.blood_pressure_fallback,
            reference_date: config.effective_reference_date(),
        }
    }

    #[must_use]
    pub fn with_blood_pressure_fallback(mut self, mode: BloodPressureFallback) -> Self {
        self.blood_pressure_fallback = mode;
        self
    }
}

/// Scan every entry of `bundle` into a fresh record for `file`.
///
/// The returned record may still lack an age; callers decide whether to keep
/// it. Fields with an unexpected shape read as missing.
pub fn extract_record(file: &str, bundle: &Bundle, rules: &ExtractionRules) -> PatientRecord {
    let mut record = PatientRecord::new(file);

    for entry in &bundle.entry {
        match entry.resource() {
            Resource::Patient(patient) => {
                record.age = Some(age_from_birth_date(
                    patient.birth_date.as_deref(),
                    rules.reference_date,
                ));
            }
            Resource::Observation(observation) => {
                apply_observation(&mut record, &observation, rules);
            }
            Resource::Condition(condition) => apply_condition(&mut record, &condition),
            Resource::Other => {}
        }
    }

    trace!(file, retained = record.is_retainable(), "bundle scanned");
    record
}

fn apply_observation(
    record: &mut PatientRecord,
    observation: &Observation,
    rules: &ExtractionRules,
) {
    let code = observation.code.primary_code();

    if code == Some(rules.codes.bmi.as_str()) {
        record.bmi = observation.quantity_value();
        return;
    }
    if code == Some(rules.codes.cholesterol.as_str()) {
        record.cholesterol = observation.quantity_value();
        return;
    }

    // Components take precedence over the observation's own display text.
    // The last systolic component in the list wins.
    if let Some(components) = &observation.component {
        let systolic = components
            .iter()
            .rev()
            .find(|c| c.code.display_lowercase().contains(SYSTOLIC));
        match (systolic, rules.blood_pressure_fallback) {
            (Some(component), _) => {
                record.systolic_bp = component.quantity_value();
                return;
            }
            (None, BloodPressureFallback::Legacy) => return,
            (None, BloodPressureFallback::Corrected) => {}
        }
    }

    if observation.code.display_lowercase().contains(SYSTOLIC) {
        record.systolic_bp = observation.quantity_value();
        return;
    }

    if code == Some(rules.codes.smoking_status.as_str()) {
        let text = observation.concept_text();
        if text.contains(SMOKER) && !text.contains(NEVER) {
            record.smoker = true;
        }
    }
}

fn apply_condition(record: &mut PatientRecord, condition: &Condition) {
    if condition.code.text_lowercase().contains(DIABETES) {
        record.diabetes_history = true;
    }
}
