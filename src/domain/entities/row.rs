use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub i64);

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId(value)
    }
}

impl From<RowId> for i64 {
    fn from(value: RowId) -> Self {
        value.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single field value. Rows only ever hold text or numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

/// Whole numbers within the exact f64 integer range serialize as integers, so `10`
/// read from JSON is written back as `10` rather than `10.0`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Number(value)
                if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER =>
            {
                serializer.serialize_i64(*value as i64)
            }
            CellValue::Number(value) => serializer.serialize_f64(*value),
            CellValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Number(_) => None,
        }
    }

    /// Numeric reading of the value: numbers as-is, and strings whose trimmed form
    /// parses as a float. `"1e5"` and `"  12 "` both count.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => parse_numeric_text(text),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok()?;
    if parsed.is_nan() {
        return None;
    }
    // Rust accepts "inf"/"infinity" in any case; only the spelled-out form counts here.
    if parsed.is_infinite() && trimmed.trim_start_matches(['+', '-']) != "Infinity" {
        return None;
    }
    Some(parsed)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(id: i64) -> Self {
        Self {
            id: RowId(id),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<CellValue>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// Display text of a field; absent fields read as empty.
    pub fn text(&self, field: &str) -> String {
        if field == "id" {
            return self.id.to_string();
        }
        self.get(field).map(ToString::to_string).unwrap_or_default()
    }

    /// Copy of this row with one field replaced.
    pub fn with_field(&self, field: &str, value: CellValue) -> Row {
        let mut next = self.clone();
        next.fields.insert(field.to_string(), value);
        next
    }
}
