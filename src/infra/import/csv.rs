use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::domain::entities::row::Row;
use crate::infra::import::tabular::{rows_from_records, text_cell};

/// Reads a CSV file with a header line. Cells stay text; the comparator decides
/// numeric-ness when sorting.
pub fn import_csv_rows(csv_path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        records.push(
            (0..headers.len())
                .map(|col_idx| text_cell(record.get(col_idx).unwrap_or("")))
                .collect(),
        );
    }

    let rows = rows_from_records(&headers, records)
        .with_context(|| format!("invalid csv rows: {}", csv_path.display()))?;
    info!("imported {} rows from {}", rows.len(), csv_path.display());
    Ok(rows)
}
