//! Accumulates patient records and finalizes them into a [`Dataset`].

use polars::prelude::DataType;
use tracing::{debug, info, warn};

use medai_model::columns::{AGE, BMI, CHOLESTEROL, NUMERIC_COLUMNS, SYSTOLIC_BP};
use medai_model::{LabelPolicy, PatientRecord};

use crate::coerce::coerce_numeric;
use crate::error::{DatasetError, Result};
use crate::frame::{Dataset, column, records_to_frame};
use crate::impute::{ensure_complete, fill_constant, fill_median};
use crate::label::derive_label;

/// How missing values of one column were filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImputeStrategy {
    /// A fixed default.
    Constant(f64),
    /// The median of the column's present values.
    Median(f64),
}

impl ImputeStrategy {
    pub fn value(&self) -> f64 {
        match self {
            Self::Constant(v) | Self::Median(v) => *v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Median(_) => "median",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Imputation {
    pub column: String,
    pub strategy: ImputeStrategy,
    /// Number of values that were missing and got filled.
    pub filled: usize,
}

/// What the finalize passes changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalizeReport {
    /// Present values per column that failed numeric coercion.
    pub coercion_failures: Vec<(String, usize)>,
    /// One entry per imputed column, in the order the passes ran.
    pub imputations: Vec<Imputation>,
    /// Rows labeled at risk.
    pub at_risk: usize,
}

impl FinalizeReport {
    pub fn total_coercion_failures(&self) -> usize {
        self.coercion_failures.iter().map(|(_, n)| n).sum()
    }
}

/// Collects records in arrival order and turns them into the final table.
///
/// Imputation runs in a fixed order: systolic pressure gets the policy
/// default, then body-mass index and cholesterol get their column medians.
/// The risk label is derived after imputation, so an imputed systolic value
/// takes part in the rule.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    policy: LabelPolicy,
    records: Vec<PatientRecord>,
}

impl DatasetBuilder {
    pub fn new(policy: LabelPolicy) -> Self {
        Self {
            policy,
            records: Vec::new(),
        }
    }

    /// Append one record. Records keep their push order in the output.
    pub fn push(&mut self, record: PatientRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run the finalize passes over everything pushed so far.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::NoRecords`] when nothing was pushed
    /// - [`DatasetError::DataQuality`] when a median column has no present
    ///   values or an age is missing
    pub fn finalize(self) -> Result<Dataset> {
        if self.records.is_empty() {
            return Err(DatasetError::NoRecords);
        }

        let mut df = records_to_frame(&self.records)?;
        let mut report = FinalizeReport::default();

        for name in NUMERIC_COLUMNS {
            let rejected = coerce_numeric(&mut df, name)?;
            if rejected > 0 {
                warn!(
                    column = name,
                    rejected, "non-numeric values treated as missing"
                );
            }
            report.coercion_failures.push((name.to_string(), rejected));
        }

        let default_systolic = self.policy.default_systolic;
        let filled = fill_constant(&mut df, SYSTOLIC_BP, default_systolic)?;
        report.imputations.push(Imputation {
            column: SYSTOLIC_BP.to_string(),
            strategy: ImputeStrategy::Constant(default_systolic),
            filled,
        });

        for name in [BMI, CHOLESTEROL] {
            let (median, filled) = fill_median(&mut df, name)?;
            debug!(column = name, median, filled, "median imputation");
            report.imputations.push(Imputation {
                column: name.to_string(),
                strategy: ImputeStrategy::Median(median),
                filled,
            });
        }

        ensure_complete(&df, AGE)?;
        let age = column(&df, AGE)?.cast(&DataType::Int64)?;
        df.with_column(age)?;

        report.at_risk = derive_label(&mut df, &self.policy)?;

        info!(
            rows = df.height(),
            at_risk = report.at_risk,
            coercion_failures = report.total_coercion_failures(),
            "dataset finalized"
        );

        Ok(Dataset { data: df, report })
    }
}

impl Extend<PatientRecord> for DatasetBuilder {
    fn extend<T: IntoIterator<Item = PatientRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medai_model::SourceValue;
    use medai_model::columns::{HEART_DISEASE_RISK, OUTPUT_COLUMNS};

    fn record(file: &str, age: i32) -> PatientRecord {
        let mut r = PatientRecord::new(file);
        r.age = Some(age);
        r
    }

    fn floats(dataset: &Dataset, name: &str) -> Vec<Option<f64>> {
        dataset
            .data
            .column(name)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn sample() -> DatasetBuilder {
        let mut a = record("a.json", 55);
        a.bmi = Some(SourceValue::from(30.0));
        a.systolic_bp = Some(SourceValue::from(150.0));
        a.cholesterol = Some(SourceValue::from("210"));
        let mut b = record("b.json", 40);
        b.bmi = Some(SourceValue::from(20.0));
        b.cholesterol = Some(SourceValue::from(190.0));
        b.diabetes_history = true;
        let mut c = record("c.json", 62);
        c.bmi = Some(SourceValue::from("n/a"));
        c.systolic_bp = Some(SourceValue::from(128.0));

        let mut builder = DatasetBuilder::new(LabelPolicy::default());
        builder.extend([a, b, c]);
        builder
    }

    #[test]
    fn test_finalize_empty_is_error() {
        let builder = DatasetBuilder::new(LabelPolicy::default());
        assert!(matches!(builder.finalize(), Err(DatasetError::NoRecords)));
    }

    #[test]
    fn test_finalize_column_layout() {
        let dataset = sample().finalize().unwrap();
        let names: Vec<String> = dataset
            .data
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, OUTPUT_COLUMNS.to_vec());
        assert_eq!(dataset.record_count(), 3);
    }

    #[test]
    fn test_finalize_imputes_in_order() {
        let dataset = sample().finalize().unwrap();

        assert_eq!(
            floats(&dataset, SYSTOLIC_BP),
            vec![Some(150.0), Some(120.0), Some(128.0)]
        );
        assert_eq!(
            floats(&dataset, BMI),
            vec![Some(30.0), Some(20.0), Some(25.0)]
        );
        assert_eq!(
            floats(&dataset, CHOLESTEROL),
            vec![Some(210.0), Some(190.0), Some(200.0)]
        );

        let report = &dataset.report;
        assert_eq!(report.total_coercion_failures(), 1);
        let strategies: Vec<(&str, ImputeStrategy, usize)> = report
            .imputations
            .iter()
            .map(|i| (i.column.as_str(), i.strategy, i.filled))
            .collect();
        assert_eq!(
            strategies,
            vec![
                (SYSTOLIC_BP, ImputeStrategy::Constant(120.0), 1),
                (BMI, ImputeStrategy::Median(25.0), 1),
                (CHOLESTEROL, ImputeStrategy::Median(200.0), 1),
            ]
        );
    }

    #[test]
    fn test_finalize_labels_after_imputation() {
        let dataset = sample().finalize().unwrap();
        let labels: Vec<Option<i32>> = dataset
            .data
            .column(HEART_DISEASE_RISK)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(labels, vec![Some(1), Some(1), Some(0)]);
        assert_eq!(dataset.report.at_risk, 2);
    }

    #[test]
    fn test_age_is_integer() {
        let dataset = sample().finalize().unwrap();
        let age = dataset.data.column(AGE).unwrap();
        assert_eq!(age.dtype(), &DataType::Int64);
        let ages: Vec<Option<i64>> = age.i64().unwrap().into_iter().collect();
        assert_eq!(ages, vec![Some(55), Some(40), Some(62)]);
    }

    #[test]
    fn test_all_missing_median_column_fails() {
        let mut builder = DatasetBuilder::new(LabelPolicy::default());
        let mut a = record("a.json", 30);
        a.bmi = Some(SourceValue::from(22.0));
        builder.push(a);
        let err = builder.finalize().unwrap_err();
        assert!(matches!(err, DatasetError::DataQuality { column } if column == CHOLESTEROL));
    }

    #[test]
    fn test_missing_age_fails() {
        let mut builder = DatasetBuilder::new(LabelPolicy::default());
        let mut a = PatientRecord::new("a.json");
        a.bmi = Some(SourceValue::from(22.0));
        a.cholesterol = Some(SourceValue::from(180.0));
        builder.push(a);
        let err = builder.finalize().unwrap_err();
        assert!(matches!(err, DatasetError::DataQuality { column } if column == AGE));
    }

    #[test]
    fn test_preview_selects_three_columns() {
        let dataset = sample().finalize().unwrap();
        let preview = dataset.preview(2).unwrap();
        assert_eq!(preview.height(), 2);
        assert_eq!(preview.width(), 3);
    }
}
