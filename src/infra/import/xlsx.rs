use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use log::info;

use crate::domain::entities::row::{CellValue, Row};
use crate::infra::import::tabular::rows_from_records;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn cell_to_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::Float(v) => Some(CellValue::Number(*v)),
        Data::Int(v) => Some(CellValue::Number(*v as f64)),
        Data::String(v) if v.is_empty() => None,
        other => Some(CellValue::Text(cell_to_string(other))),
    }
}

/// Reads the first worksheet; its first row is the header.
pub fn import_xlsx_rows(xlsx_path: &Path) -> Result<Vec<Row>> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open workbook: {}", xlsx_path.display()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("workbook has no sheets: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("failed to read sheet: {sheet}"))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|header| header.iter().map(|cell| cell_to_string(cell).trim().to_string()).collect())
        .unwrap_or_default();
    let records: Vec<Vec<Option<CellValue>>> = sheet_rows
        .map(|r| r.iter().map(cell_to_value).collect())
        .collect();

    let rows = rows_from_records(&headers, records)
        .with_context(|| format!("invalid rows in sheet {sheet}: {}", xlsx_path.display()))?;
    info!(
        "imported {} rows from sheet {sheet} of {}",
        rows.len(),
        xlsx_path.display()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_become_numbers() {
        assert_eq!(cell_to_value(&Data::Float(2.5)), Some(CellValue::Number(2.5)));
        assert_eq!(cell_to_value(&Data::Int(4)), Some(CellValue::Number(4.0)));
    }

    #[test]
    fn other_cells_become_text_and_empty_cells_are_absent() {
        assert_eq!(cell_to_value(&Data::Bool(true)), Some(CellValue::from("true")));
        assert_eq!(
            cell_to_value(&Data::String("Active".to_string())),
            Some(CellValue::from("Active"))
        );
        assert_eq!(cell_to_value(&Data::String(String::new())), None);
        assert_eq!(cell_to_value(&Data::Empty), None);
    }
}
