//! DataFrame ingestion.

use std::path::Path;

use ndarray::Array2;
use polars::prelude::*;

use crate::UtilsError;

/// Read a CSV file with a header row.
///
/// # Errors
/// Returns `UtilsError::Polars` if the file cannot be opened or parsed.
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame, UtilsError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Extract `columns` as a `T × columns.len()` matrix.
///
/// Integer columns are cast to `f64`.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` for an unknown name,
/// `UtilsError::MissingValue` for the first null or NaN cell, and
/// `UtilsError::Polars` if a column cannot be cast to `f64`.
pub fn frame_to_matrix(df: &DataFrame, columns: &[&str]) -> Result<Array2<f64>, UtilsError> {
    if columns.is_empty() {
        return Err(UtilsError::InvalidParameter("no columns selected".to_string()));
    }

    let mut matrix = Array2::zeros((df.height(), columns.len()));

    for (j, &name) in columns.iter().enumerate() {
        let column =
            df.column(name).map_err(|_| UtilsError::MissingColumn(name.to_string()))?;
        let values = column.cast(&DataType::Float64)?;

        for (row, value) in values.f64()?.into_iter().enumerate() {
            match value {
                Some(v) if !v.is_nan() => matrix[[row, j]] = v,
                _ => {
                    return Err(UtilsError::MissingValue { column: name.to_string(), row });
                }
            }
        }
    }

    Ok(matrix)
}
