use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::domain::entities::row::{CellValue, Row, RowId};
use crate::usecase::ports::repo::{RowStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Row>,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryRowStore {
    inner: RwLock<Inner>,
}

impl InMemoryRowStore {
    pub fn new(rows: Vec<Row>) -> Result<Self, StoreError> {
        ensure_unique_ids(&rows)?;
        Ok(Self {
            inner: RwLock::new(Inner {
                rows,
                generation: 0,
            }),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn ensure_unique_ids(rows: &[Row]) -> Result<(), StoreError> {
    let mut seen = BTreeSet::new();
    for row in rows {
        if !seen.insert(row.id) {
            return Err(StoreError::DuplicateId(row.id));
        }
    }
    Ok(())
}

impl RowStore for InMemoryRowStore {
    fn rows(&self) -> Vec<Row> {
        self.read().rows.clone()
    }

    fn generation(&self) -> u64 {
        self.read().generation
    }

    fn get(&self, id: RowId) -> Option<Row> {
        self.read().rows.iter().find(|row| row.id == id).cloned()
    }

    fn len(&self) -> usize {
        self.read().rows.len()
    }

    fn replace_rows(&self, rows: Vec<Row>) -> Result<(), StoreError> {
        ensure_unique_ids(&rows)?;
        let mut inner = self.write();
        inner.rows = rows;
        inner.generation += 1;
        debug!(
            "row store replaced with {} rows (generation {})",
            inner.rows.len(),
            inner.generation
        );
        Ok(())
    }

    fn update_field(&self, id: RowId, field: &str, value: CellValue) -> Result<bool, StoreError> {
        let mut inner = self.write();
        let slot = inner
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::RowNotFound(id))?;

        if slot.get(field) == Some(&value) {
            return Ok(false);
        }

        *slot = slot.with_field(field, value);
        inner.generation += 1;
        debug!("row {id} field {field:?} updated (generation {})", inner.generation);
        Ok(true)
    }
}
