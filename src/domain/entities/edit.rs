use crate::domain::entities::row::{CellValue, RowId};

#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    pub row_id: RowId,
    pub field: String,
    pub value: CellValue,
}

impl CellEdit {
    pub fn new(row_id: RowId, field: &str, value: impl Into<CellValue>) -> Self {
        Self {
            row_id,
            field: field.to_string(),
            value: value.into(),
        }
    }
}
