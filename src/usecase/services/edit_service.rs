use std::sync::Arc;

use log::info;

use crate::domain::entities::column::{find_column, ColumnSpec};
use crate::domain::entities::edit::CellEdit;
use crate::usecase::ports::repo::{RowStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("unknown column {0:?}")]
    UnknownColumn(String),

    #[error("column {0:?} is not editable")]
    NotEditable(String),

    #[error("{value:?} is not an allowed value for {field:?}")]
    InvalidOption { field: String, value: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct EditService {
    store: Arc<dyn RowStore>,
    columns: Vec<ColumnSpec>,
}

impl EditService {
    pub fn new(store: Arc<dyn RowStore>, columns: Vec<ColumnSpec>) -> Self {
        Self { store, columns }
    }

    pub fn validate(&self, edit: &CellEdit) -> Result<(), EditError> {
        let column = find_column(&self.columns, &edit.field)
            .ok_or_else(|| EditError::UnknownColumn(edit.field.clone()))?;
        if !column.editable {
            return Err(EditError::NotEditable(edit.field.clone()));
        }

        let value = edit.value.to_string();
        if !column.edit_options.is_empty() && !column.edit_options.contains(&value) {
            return Err(EditError::InvalidOption {
                field: edit.field.clone(),
                value,
            });
        }
        Ok(())
    }

    /// Validates and applies one cell edit. Returns whether the row changed.
    pub fn apply_edit(&self, edit: CellEdit) -> Result<bool, EditError> {
        self.validate(&edit)?;
        let changed = self
            .store
            .update_field(edit.row_id, &edit.field, edit.value)?;
        if changed {
            info!("row {} field {:?} edited", edit.row_id, edit.field);
        }
        Ok(changed)
    }
}
