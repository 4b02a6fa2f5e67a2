use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::info;
use serde_json::Value;

use crate::domain::entities::row::{CellValue, Row};
use crate::infra::memory::store::ensure_unique_ids;

/// Reads a JSON array of records. Every record needs an integral `id`; booleans
/// become text and `null` fields are dropped.
pub fn import_json_rows(json_path: &Path) -> Result<Vec<Row>> {
    let raw = fs::read_to_string(json_path)
        .with_context(|| format!("failed to read json: {}", json_path.display()))?;
    let rows = parse_json_rows(&raw)
        .with_context(|| format!("invalid json rows: {}", json_path.display()))?;
    info!("imported {} rows from {}", rows.len(), json_path.display());
    Ok(rows)
}

pub fn parse_json_rows(raw: &str) -> Result<Vec<Row>> {
    let document: Value = serde_json::from_str(raw).context("failed to parse json")?;
    let Value::Array(records) = document else {
        anyhow::bail!("expected a top-level array of records")
    };

    let mut rows = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        let Value::Object(fields) = record else {
            anyhow::bail!("record {} is not an object", idx + 1)
        };

        let id = fields
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| anyhow!("record {} has no integer id", idx + 1))?;

        let mut row = Row::new(id);
        for (key, value) in fields {
            if key == "id" {
                continue;
            }
            if let Some(value) = json_to_cell(value) {
                row.fields.insert(key, value);
            }
        }
        rows.push(row);
    }

    ensure_unique_ids(&rows)?;
    Ok(rows)
}

fn json_to_cell(value: Value) -> Option<CellValue> {
    match value {
        Value::Null => None,
        Value::Number(number) => number.as_f64().map(CellValue::Number),
        Value::String(text) => Some(CellValue::Text(text)),
        Value::Bool(flag) => Some(CellValue::Text(flag.to_string())),
        other => Some(CellValue::Text(other.to_string())),
    }
}
