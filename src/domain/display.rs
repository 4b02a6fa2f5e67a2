use crate::domain::entities::query::{PageResult, PaginationMode};
use crate::domain::entities::row::Row;

const MONTH_FIELDS: [&str; 2] = ["tenure", "tenureInCurrentRole"];
const PERCENT_FIELDS: [&str; 1] = ["totalAttrition"];

/// `"tenureInCurrentRole"` -> `"Tenure In Current Role"`.
pub fn format_field_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_uppercase() {
            label.push(' ');
        }
        label.push(ch);
    }

    let label = label.trim();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_field_value(field: &str, row: &Row) -> String {
    let text = row.text(field);
    if MONTH_FIELDS.contains(&field) {
        format!("{text} months")
    } else if PERCENT_FIELDS.contains(&field) {
        format!("{text}%")
    } else {
        text
    }
}

pub fn initials(name: &str) -> String {
    name.chars()
        .next()
        .map(|ch| ch.to_uppercase().collect())
        .unwrap_or_default()
}

/// Footer line under the table, e.g. "Showing 11 to 20 of 42 entries".
pub fn footer_summary(result: &PageResult) -> String {
    match result.mode {
        PaginationMode::Scroll => {
            format!(
                "Showing {} of {} entries",
                result.rows.len(),
                result.total_count
            )
        }
        PaginationMode::Paged if result.rows.is_empty() => {
            format!("Showing 0 to 0 of {} entries", result.total_count)
        }
        PaginationMode::Paged => format!(
            "Showing {} to {} of {} entries",
            result.window_start + 1,
            result.window_end,
            result.total_count
        ),
    }
}
