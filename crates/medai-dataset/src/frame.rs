//! DataFrame representation of the patient dataset.

use std::path::Path;

use polars::prelude::{Column, DataFrame};

use medai_model::columns::{
    AGE, BMI, CHOLESTEROL, DIABETES_HISTORY, FILE, PREVIEW_COLUMNS, SMOKER, SYSTOLIC_BP,
};
use medai_model::{PatientRecord, SourceValue};

use crate::builder::FinalizeReport;
use crate::error::{DatasetError, Result};
use crate::writer::write_csv;

/// Build the raw, unfinalized frame for `records`, one row each, in order.
///
/// Measurements are carried as text so coercion can decide what is numeric;
/// flags become 0/1 integers.
pub fn records_to_frame(records: &[PatientRecord]) -> Result<DataFrame> {
    let files: Vec<&str> = records.iter().map(|r| r.file.as_str()).collect();
    let ages: Vec<Option<i32>> = records.iter().map(|r| r.age).collect();
    let bmi = raw_values(records, |r| r.bmi.as_ref());
    let systolic = raw_values(records, |r| r.systolic_bp.as_ref());
    let cholesterol = raw_values(records, |r| r.cholesterol.as_ref());
    let diabetes: Vec<i32> = records
        .iter()
        .map(|r| i32::from(r.diabetes_history))
        .collect();
    let smoker: Vec<i32> = records.iter().map(|r| i32::from(r.smoker)).collect();

    let df = DataFrame::new(vec![
        Column::new(FILE.into(), files),
        Column::new(AGE.into(), ages),
        Column::new(BMI.into(), bmi),
        Column::new(SYSTOLIC_BP.into(), systolic),
        Column::new(CHOLESTEROL.into(), cholesterol),
        Column::new(DIABETES_HISTORY.into(), diabetes),
        Column::new(SMOKER.into(), smoker),
    ])?;
    Ok(df)
}

fn raw_values<F>(records: &[PatientRecord], field: F) -> Vec<Option<String>>
where
    F: Fn(&PatientRecord) -> Option<&SourceValue>,
{
    records
        .iter()
        .map(|r| field(r).map(SourceValue::as_text))
        .collect()
}

/// Look up a column, reporting a missing one by name.
pub(crate) fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| DatasetError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// A finalized dataset: complete numeric columns plus the derived label.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// The table in output column order.
    pub data: DataFrame,
    /// What the finalize passes changed.
    pub report: FinalizeReport,
}

impl Dataset {
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// First `rows` rows of age, systolic pressure, and label.
    pub fn preview(&self, rows: usize) -> Result<DataFrame> {
        Ok(self.data.select(PREVIEW_COLUMNS)?.head(Some(rows)))
    }

    /// Persist the table to `path` as delimited text with a header row.
    pub fn write_csv(&mut self, path: &Path) -> Result<()> {
        write_csv(&mut self.data, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    #[test]
    fn test_records_to_frame_layout() {
        let mut a = PatientRecord::new("a.json");
        a.age = Some(51);
        a.bmi = Some(SourceValue::from(28.5));
        a.diabetes_history = true;
        let mut b = PatientRecord::new("b.json");
        b.age = Some(33);
        b.systolic_bp = Some(SourceValue::from("high"));
        b.smoker = true;

        let df = records_to_frame(&[a, b]).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "file",
                "age",
                "bmi",
                "systolic_bp",
                "cholesterol",
                "diabetes_history",
                "smoker"
            ]
        );
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("bmi").unwrap().dtype(), &DataType::String);
        let bmi = df.column("bmi").unwrap().str().unwrap();
        assert_eq!(bmi.get(0), Some("28.5"));
        assert_eq!(bmi.get(1), None);
        let diabetes = df.column("diabetes_history").unwrap().i32().unwrap();
        assert_eq!(diabetes.get(0), Some(1));
        assert_eq!(diabetes.get(1), Some(0));
    }

    #[test]
    fn test_missing_column_is_named() {
        let df = records_to_frame(&[]).unwrap();
        let err = column(&df, "heart_disease_risk").unwrap_err();
        assert!(matches!(err, DatasetError::ColumnNotFound { column } if column == "heart_disease_risk"));
    }
}
