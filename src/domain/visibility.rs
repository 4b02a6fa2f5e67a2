use std::collections::BTreeMap;

use crate::domain::entities::column::ColumnSpec;

/// Column ids that can never be hidden.
pub const REQUIRED_COLUMNS: [&str; 2] = ["name", "actions"];

pub type ColumnVisibility = BTreeMap<String, bool>;

pub fn is_required_column(column_id: &str) -> bool {
    REQUIRED_COLUMNS.contains(&column_id)
}

/// Fills every column id with a flag: stored flags win, otherwise the column's
/// default. Required columns are always visible.
pub fn normalize_column_visibility(
    columns: &[ColumnSpec],
    visibility: &ColumnVisibility,
) -> ColumnVisibility {
    columns
        .iter()
        .map(|column| {
            let visible = is_required_column(&column.id)
                || visibility.get(&column.id).copied().unwrap_or(column.visible);
            (column.id.clone(), visible)
        })
        .collect()
}

/// Columns to show, in declaration order. An empty map means defaults.
pub fn apply_column_visibility<'a>(
    columns: &'a [ColumnSpec],
    visibility: &ColumnVisibility,
) -> Vec<&'a ColumnSpec> {
    let normalized = normalize_column_visibility(columns, visibility);
    columns
        .iter()
        .filter(|column| normalized.get(&column.id).copied().unwrap_or(true))
        .collect()
}

pub fn set_all_visible(columns: &[ColumnSpec], visible: bool) -> ColumnVisibility {
    columns
        .iter()
        .map(|column| (column.id.clone(), visible || is_required_column(&column.id)))
        .collect()
}

pub fn visible_count(visibility: &ColumnVisibility) -> usize {
    visibility.values().filter(|visible| **visible).count()
}
