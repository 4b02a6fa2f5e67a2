use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::entities::row::Row;
use crate::infra::import::csv::import_csv_rows;
use crate::infra::import::json::import_json_rows;
use crate::infra::import::xlsx::import_xlsx_rows;
use crate::usecase::ports::repo::RowStore;

pub struct ImportService {
    store: Arc<dyn RowStore>,
}

impl ImportService {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    /// Picks the reader from the file extension.
    pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => import_json_rows(path),
            "csv" => import_csv_rows(path),
            "xlsx" | "xlsm" | "xls" | "ods" => import_xlsx_rows(path),
            other => anyhow::bail!("unsupported file type {other:?}: {}", path.display()),
        }
    }

    /// Replaces the store contents with the rows read from `path`.
    pub fn import(&self, path: &Path) -> Result<usize> {
        let rows = Self::read_rows(path)?;
        let count = rows.len();
        self.store
            .replace_rows(rows)
            .with_context(|| format!("failed to load rows from {}", path.display()))?;
        Ok(count)
    }
}
