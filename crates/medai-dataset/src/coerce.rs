//! Fail-soft numeric coercion.

use polars::prelude::{AnyValue, Column, DataFrame};

use medai_common::any_to_f64;

use crate::error::Result;
use crate::frame::column;

/// Replace `name` with a Float64 column parsed from its current values.
///
/// Values that do not parse become missing instead of raising an error.
/// Returns how many present values were turned into missing ones.
pub fn coerce_numeric(df: &mut DataFrame, name: &str) -> Result<usize> {
    let (values, rejected) = {
        let source = column(df, name)?;
        let mut values: Vec<Option<f64>> = Vec::with_capacity(source.len());
        let mut rejected = 0usize;
        for idx in 0..source.len() {
            let raw = source.get(idx)?;
            let was_present = !matches!(raw, AnyValue::Null);
            let parsed = any_to_f64(raw);
            if was_present && parsed.is_none() {
                rejected += 1;
            }
            values.push(parsed);
        }
        (values, rejected)
    };

    df.with_column(Column::new(name.into(), values))?;
    Ok(rejected)
}
