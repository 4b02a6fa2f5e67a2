use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use log::{info, warn};
use serde::Deserialize;

use crate::domain::entities::column::{default_columns, ColumnSpec};
use crate::usecase::projection::DEFAULT_SEARCH_FIELDS;

pub const PAGE_SIZE: usize = 10;
pub const CONFIG_FILE_NAME: &str = "table.json";

/// Table setup fixed at startup. Every key is optional in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    pub page_size: usize,
    pub search_fields: Vec<String>,
    pub columns: Vec<ColumnSpec>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            search_fields: DEFAULT_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
            columns: default_columns(),
        }
    }
}

impl TableConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: TableConfig =
            serde_json::from_str(raw).context("failed to parse table config")?;
        if config.page_size == 0 {
            anyhow::bail!("pageSize must be greater than zero")
        }
        Ok(config)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "talent-table", "talent-table")
        .ok_or_else(|| anyhow!("unable to resolve config directory"))?;
    Ok(project_dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> Result<TableConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = TableConfig::from_json(&raw)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    info!(
        "loaded table config from {} ({} columns)",
        path.display(),
        config.columns.len()
    );
    Ok(config)
}

/// Reads the config at `path`, or at the default location when `path` is `None`.
/// A missing file yields the built-in defaults; a malformed one is an error.
pub fn load_config_or_default(path: Option<&Path>) -> Result<TableConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Ok(path) => path,
            Err(err) => {
                warn!("{err}; using built-in table config");
                return Ok(TableConfig::default());
            }
        },
    };

    if !path.exists() {
        info!("no config at {}; using built-in table config", path.display());
        return Ok(TableConfig::default());
    }
    load_config(&path)
}
