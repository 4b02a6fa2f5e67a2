use anyhow::{anyhow, Result};

use crate::domain::entities::row::{CellValue, Row, RowId};
use crate::infra::memory::store::ensure_unique_ids;

pub const ID_HEADER: &str = "id";

/// Builds rows from a header line and its records. Empty cells are left out of the
/// row. With an `id` column every record must carry an integral id; without one,
/// ids are assigned from 1 in record order.
pub fn rows_from_records(
    headers: &[String],
    records: impl IntoIterator<Item = Vec<Option<CellValue>>>,
) -> Result<Vec<Row>> {
    if headers.is_empty() {
        anyhow::bail!("header row is required")
    }

    let id_col = headers.iter().position(|header| header == ID_HEADER);
    let mut rows = Vec::new();

    for (record_idx, record) in records.into_iter().enumerate() {
        let id = match id_col {
            Some(col) => record
                .get(col)
                .and_then(Option::as_ref)
                .and_then(row_id_from_cell)
                .ok_or_else(|| anyhow!("record {} has no valid id", record_idx + 1))?,
            None => RowId(record_idx as i64 + 1),
        };

        let mut row = Row::new(id.0);
        for (col_idx, cell) in record.into_iter().enumerate() {
            if Some(col_idx) == id_col {
                continue;
            }
            let (Some(header), Some(value)) = (headers.get(col_idx), cell) else {
                continue;
            };
            row.fields.insert(header.clone(), value);
        }
        rows.push(row);
    }

    ensure_unique_ids(&rows)?;
    Ok(rows)
}

pub fn row_id_from_cell(value: &CellValue) -> Option<RowId> {
    match value {
        CellValue::Number(number) if number.fract() == 0.0 && number.is_finite() => {
            Some(RowId(*number as i64))
        }
        CellValue::Number(_) => None,
        CellValue::Text(text) => text.trim().parse::<i64>().ok().map(RowId),
    }
}

pub fn text_cell(value: &str) -> Option<CellValue> {
    if value.is_empty() {
        None
    } else {
        Some(CellValue::Text(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn numeric_id_cells_become_row_ids() {
        let rows = rows_from_records(
            &headers(&["id", "name", "enps"]),
            vec![
                vec![
                    Some(CellValue::Number(3.0)),
                    Some(CellValue::from("Ann")),
                    Some(CellValue::Number(20.0)),
                ],
                vec![Some(CellValue::from(" 7 ")), Some(CellValue::from("Bob")), None],
            ],
        )
        .expect("records should convert");

        assert_eq!(rows[0].id, RowId(3));
        assert_eq!(rows[0].get("enps"), Some(&CellValue::Number(20.0)));
        assert_eq!(rows[0].get("id"), None, "id is not kept as a field");
        assert_eq!(rows[1].id, RowId(7));
        assert_eq!(rows[1].get("enps"), None);
    }

    #[test]
    fn fractional_or_missing_ids_are_rejected() {
        let fractional = rows_from_records(
            &headers(&["id", "name"]),
            vec![vec![Some(CellValue::Number(3.5)), Some(CellValue::from("Ann"))]],
        );
        assert!(fractional.is_err());

        let missing = rows_from_records(
            &headers(&["id", "name"]),
            vec![vec![None, Some(CellValue::from("Ann"))]],
        );
        assert!(missing.is_err());
    }

    #[test]
    fn duplicate_numeric_ids_are_rejected() {
        let result = rows_from_records(
            &headers(&["id"]),
            vec![
                vec![Some(CellValue::Number(1.0))],
                vec![Some(CellValue::from("1"))],
            ],
        );
        assert!(result.is_err());
    }
}
