//! Persist the dataset as CSV.
//!
//! The header is written explicitly so the column order is fixed by
//! `CSV_HEADER` and an empty dataset still produces a valid file.

use std::fs::File;
use std::path::Path;

use crate::domain::{CSV_HEADER, SalesDataset};
use crate::error::AppError;

/// Write every record to `path`, replacing any existing file.
pub fn write_sales_csv(path: &Path, dataset: &SalesDataset) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::input(format!("Failed to create directory '{}': {e}", parent.display()))
        })?;
    }

    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create CSV '{}': {e}", path.display())))?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| AppError::input(format!("Failed to write CSV header: {e}")))?;

    for record in dataset.iter() {
        writer
            .serialize(record)
            .map_err(|e| AppError::input(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush CSV '{}': {e}", path.display())))?;

    Ok(())
}
