//! Delimited-text persistence.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::debug;

use crate::error::{DatasetError, Result};

/// Write `df` to `path` as comma-separated text with a header row.
///
/// Columns keep their frame order and rows their frame order. The parent
/// directory is created when missing.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DatasetError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = File::create(path).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| DatasetError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(path = %path.display(), rows = df.height(), "dataset written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn test_write_csv_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let mut df = DataFrame::new(vec![
            Column::new("file".into(), vec!["a.json", "b.json"]),
            Column::new("age".into(), vec![40i64, 61]),
        ])
        .unwrap();

        write_csv(&mut df, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["file,age", "a.json,40", "b.json,61"]);
    }
}
