//! Missing-value imputation.

use polars::prelude::{Column, DataFrame};

use crate::error::{DatasetError, Result};
use crate::frame::column;

/// Median of `values`; the mean of the two middle values for even counts.
///
/// Returns `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Fill missing values of a Float64 column with `value`.
///
/// Returns the number of values filled.
pub fn fill_constant(df: &mut DataFrame, name: &str, value: f64) -> Result<usize> {
    let (values, filled) = {
        let ca = column(df, name)?.f64()?;
        let filled = ca.null_count();
        let values: Vec<f64> = ca.into_iter().map(|v| v.unwrap_or(value)).collect();
        (values, filled)
    };
    df.with_column(Column::new(name.into(), values))?;
    Ok(filled)
}

/// Fill missing values of a Float64 column with the median of its present values.
///
/// The median is computed once, before any value is filled. Fails with
/// [`DatasetError::DataQuality`] when the column has no present values.
/// Returns the median used and the number of values filled.
pub fn fill_median(df: &mut DataFrame, name: &str) -> Result<(f64, usize)> {
    let present: Vec<f64> = column(df, name)?.f64()?.into_iter().flatten().collect();
    let Some(value) = median(&present) else {
        return Err(DatasetError::DataQuality {
            column: name.to_string(),
        });
    };
    let filled = fill_constant(df, name, value)?;
    Ok((value, filled))
}

/// Fail unless `name` has no missing values.
pub fn ensure_complete(df: &DataFrame, name: &str) -> Result<()> {
    if column(df, name)?.null_count() > 0 {
        return Err(DatasetError::DataQuality {
            column: name.to_string(),
        });
    }
    Ok(())
}
