//! Error types for dataset finalization.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// Finalize was asked to run over zero records.
    #[error("no records to finalize")]
    NoRecords,

    /// A column that must be complete cannot be filled.
    #[error("cannot fill column '{column}': no non-missing values to derive a median from")]
    DataQuality { column: String },

    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },
}

impl From<polars::prelude::PolarsError> for DatasetError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_quality_names_column() {
        let err = DatasetError::DataQuality {
            column: "bmi".to_string(),
        };
        assert!(err.to_string().contains("'bmi'"));
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("bmi".into());
        let err: DatasetError = polars_err.into();
        assert!(matches!(err, DatasetError::DataFrame { .. }));
    }
}
