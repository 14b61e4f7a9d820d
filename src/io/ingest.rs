//! Read a persisted sales CSV back into a dataset.
//!
//! - **Strict schema**: every column of `CSV_HEADER` must be present (order is free).
//! - **Row-level validation**: rows that fail to parse are skipped and reported.
//! - Categorical values must name a known category/city.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{CSV_HEADER, SalesDataset, SalesRecord};
use crate::error::AppError;

/// A row that could not be turned into a record.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: SalesDataset,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

pub fn read_sales_csv(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?;
    let headers = normalize_headers(headers);
    ensure_columns_exist(&headers)?;
    reader.set_headers(headers);

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.deserialize::<SalesRecord>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;
        match result {
            Ok(record) => records.push(record),
            Err(e) => row_errors.push(RowError {
                line,
                message: format!("CSV parse error: {e}"),
            }),
        }
    }

    if !row_errors.is_empty() {
        tracing::warn!(
            skipped = row_errors.len(),
            path = %path.display(),
            "skipped unparseable CSV rows"
        );
    }

    if records.is_empty() {
        return Err(AppError::input(format!(
            "No valid rows in '{}'.",
            path.display()
        )));
    }

    Ok(IngestedData {
        dataset: SalesDataset::new(records),
        row_errors,
        rows_read,
    })
}

fn normalize_headers(headers: &StringRecord) -> StringRecord {
    // Spreadsheet tools sometimes prefix the first header with a UTF-8 BOM.
    headers
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}'))
        .collect()
}

fn ensure_columns_exist(headers: &StringRecord) -> Result<(), AppError> {
    let missing: Vec<&str> = CSV_HEADER
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::input(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        )))
    }
}
