//! Derived outcome label.

use polars::prelude::{Column, DataFrame};

use medai_model::LabelPolicy;
use medai_model::columns::{DIABETES_HISTORY, HEART_DISEASE_RISK, SYSTOLIC_BP};

use crate::error::Result;
use crate::frame::column;

/// Append the 0/1 risk label computed row by row from systolic pressure and
/// diabetes history. Returns the number of rows labeled 1.
///
/// Expects systolic pressure to be Float64 and the diabetes flag Int32.
pub fn derive_label(df: &mut DataFrame, policy: &LabelPolicy) -> Result<usize> {
    let labels: Vec<i32> = {
        let systolic = column(df, SYSTOLIC_BP)?.f64()?;
        let diabetes = column(df, DIABETES_HISTORY)?.i32()?;
        systolic
            .into_iter()
            .zip(diabetes)
            .map(|(bp, flag)| {
                let diabetic = flag.is_some_and(|v| v != 0);
                let at_risk = match bp {
                    Some(bp) => policy.is_at_risk(bp, diabetic),
                    None => diabetic,
                };
                i32::from(at_risk)
            })
            .collect()
    };
    let positives = labels.iter().filter(|&&label| label == 1).count();
    df.with_column(Column::new(HEART_DISEASE_RISK.into(), labels))?;
    Ok(positives)
}
