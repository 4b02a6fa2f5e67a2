use crate::domain::entities::row::{CellValue, Row, RowId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("row {0} not found")]
    RowNotFound(RowId),

    #[error("duplicate row id {0}")]
    DuplicateId(RowId),
}

/// Host-owned row collection. The projection only reads snapshots of it; every
/// mutation bumps [`RowStore::generation`].
pub trait RowStore: Send + Sync {
    fn rows(&self) -> Vec<Row>;
    fn generation(&self) -> u64;
    fn get(&self, id: RowId) -> Option<Row>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn replace_rows(&self, rows: Vec<Row>) -> Result<(), StoreError>;

    /// Replaces the row keyed by `id` with a copy carrying the new field value.
    /// Returns whether anything changed.
    fn update_field(&self, id: RowId, field: &str, value: CellValue) -> Result<bool, StoreError>;
}
