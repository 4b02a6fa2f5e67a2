//! Filter, sort and paginate rows into the slice a table shows.
//!
//! Everything here is a pure function of its inputs: the source rows are only
//! borrowed, and calling [`project`] twice with the same arguments yields equal
//! results.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use log::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization as _;

use crate::domain::dates::{is_date_in_range, parse_cell_date};
use crate::domain::entities::column::{find_column, ColumnSpec};
use crate::domain::entities::query::{
    DateRange, PageResult, PaginationMode, PaginationState, QueryState, SortDirection, SortSpec,
};
use crate::domain::entities::row::{CellValue, Row};

pub const DEFAULT_SEARCH_FIELDS: [&str; 2] = ["name", "email"];

pub fn project(
    rows: &[Row],
    query: &QueryState,
    columns: &[ColumnSpec],
    search_fields: &[String],
) -> PageResult {
    let mut matched = filter_rows(rows, &query.search_term, &query.date_filters, search_fields);
    sort_rows(&mut matched, &query.sort_key, columns);
    let result = paginate(&matched, &query.pagination);
    debug!(
        "projected {} of {} rows into window {}..{}",
        result.total_count,
        rows.len(),
        result.window_start,
        result.window_end
    );
    result
}

pub fn filter_rows<'a, 'f>(
    rows: &'a [Row],
    search_term: &str,
    date_filters: impl IntoIterator<Item = (&'f String, &'f DateRange)>,
    search_fields: &[String],
) -> Vec<&'a Row> {
    let needle = search_term.to_lowercase();
    let active_ranges: Vec<(&String, &DateRange)> = date_filters
        .into_iter()
        .filter(|(_, range)| range.is_active())
        .collect();

    rows.iter()
        .filter(|row| needle.is_empty() || matches_search(row, &needle, search_fields))
        .filter(|row| {
            active_ranges
                .iter()
                .all(|(accessor, range)| is_date_in_range(row.get(accessor), range))
        })
        .collect()
}

fn matches_search(row: &Row, needle: &str, search_fields: &[String]) -> bool {
    search_fields
        .iter()
        .any(|field| row.text(field).to_lowercase().contains(needle))
}

struct ResolvedKey<'a> {
    accessor: &'a str,
    is_date: bool,
    direction: SortDirection,
}

/// Stable multi-key sort. Keys naming a column outside `columns` are skipped.
pub fn sort_rows(rows: &mut [&Row], sort_key: &[SortSpec], columns: &[ColumnSpec]) {
    let keys: Vec<ResolvedKey<'_>> = sort_key
        .iter()
        .filter_map(|spec| match find_column(columns, &spec.column) {
            Some(column) => Some(ResolvedKey {
                accessor: spec.column.as_str(),
                is_date: column.is_date,
                direction: spec.direction,
            }),
            None => {
                debug!("ignoring sort on unknown column {:?}", spec.column);
                None
            }
        })
        .collect();

    if keys.is_empty() {
        return;
    }

    rows.sort_by(|a, b| {
        for key in &keys {
            let ordering = compare_values(a.get(key.accessor), b.get(key.accessor), key.is_date);
            if ordering != Ordering::Equal {
                return match key.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
            }
        }
        Ordering::Equal
    });
}

/// Ascending comparison of two cells of one column.
pub fn compare_values(a: Option<&CellValue>, b: Option<&CellValue>, is_date: bool) -> Ordering {
    if is_date {
        // Dated rows ahead of undated ones.
        return match (parse_cell_date(a), parse_cell_date(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
    }

    let numbers = (a.and_then(CellValue::as_number), b.and_then(CellValue::as_number));
    if let (Some(a), Some(b)) = numbers {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }

    natural_cmp(&sort_text(a), &sort_text(b))
}

fn sort_text(value: Option<&CellValue>) -> String {
    value
        .map(|value| fold_text(value.to_string().trim()))
        .unwrap_or_default()
}

/// Base letters only: compatibility-decomposed, combining marks dropped, lowercased.
/// "Émile" and "emile" fold to the same text.
pub fn fold_text(text: &str) -> String {
    text.nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Ordering that reads runs of ASCII digits as numbers, so "item2" < "item10".
/// Leading zeros do not matter: "a01" and "a1" compare equal. Callers fold case and
/// accents first with [`fold_text`].
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ordering = compare_digit_runs(&l_run, &r_run);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.next_if(char::is_ascii_digit) {
        run.push(ch);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

pub fn paginate(sorted: &[&Row], pagination: &PaginationState) -> PageResult {
    let total_count = sorted.len();
    let page_size = pagination.page_size.max(1);
    let total_pages = total_count.div_ceil(page_size);

    let (window_start, window_end, has_more) = match pagination.mode {
        PaginationMode::Paged => {
            // Page 0 and pages past the end both land on an empty window at the tail.
            let start = pagination
                .page
                .checked_sub(1)
                .map(|offset| offset.saturating_mul(page_size))
                .unwrap_or(total_count)
                .min(total_count);
            let end = start.saturating_add(page_size).min(total_count);
            (start, end, pagination.page < total_pages)
        }
        PaginationMode::Scroll => {
            let end = pagination.loaded_count.min(total_count);
            (0, end, end < total_count)
        }
    };

    PageResult {
        rows: sorted[window_start..window_end]
            .iter()
            .map(|row| (*row).clone())
            .collect(),
        total_count,
        total_pages,
        mode: pagination.mode,
        page: pagination.page,
        loaded_count: pagination.loaded_count,
        has_more,
        window_start,
        window_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_cmp_orders_embedded_numbers() {
        assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
        assert_eq!(natural_cmp("item10", "item9"), Ordering::Greater);
        assert_eq!(natural_cmp("a01", "a1"), Ordering::Equal);
        assert_eq!(natural_cmp("abc", "abd"), Ordering::Less);
        assert_eq!(natural_cmp("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn numeric_strings_compare_as_numbers() {
        let a = CellValue::from("  12 ");
        let b = CellValue::from("1e5");
        let c = CellValue::Number(9.0);
        assert_eq!(compare_values(Some(&a), Some(&b), false), Ordering::Less);
        assert_eq!(compare_values(Some(&c), Some(&a), false), Ordering::Less);
    }

    #[test]
    fn mixed_number_and_text_falls_back_to_text() {
        let number = CellValue::Number(5.0);
        let text = CellValue::from("Active");
        assert_eq!(
            compare_values(Some(&number), Some(&text), false),
            Ordering::Less
        );
    }

    #[test]
    fn text_compare_ignores_case_and_padding() {
        let a = CellValue::from("  bob ");
        let b = CellValue::from("BOB");
        assert_eq!(compare_values(Some(&a), Some(&b), false), Ordering::Equal);
    }

    #[test]
    fn text_compare_ignores_accents() {
        assert_eq!(fold_text("Émile"), "emile");
        assert_eq!(fold_text("Ångström"), "angstrom");
        let accented = CellValue::from("Émile Roux");
        let plain = CellValue::from("Eve Alvarez");
        let last = CellValue::from("Zoe Park");
        assert_eq!(compare_values(Some(&accented), Some(&plain), false), Ordering::Less);
        assert_eq!(compare_values(Some(&accented), Some(&last), false), Ordering::Less);
        assert_eq!(
            compare_values(Some(&CellValue::from("café")), Some(&CellValue::from("CAFE")), false),
            Ordering::Equal
        );
    }

    #[test]
    fn undated_values_sort_after_dated_ones() {
        let dated = CellValue::from("01-01-2020");
        let broken = CellValue::from("2020-01-01");
        assert_eq!(compare_values(Some(&dated), Some(&broken), true), Ordering::Less);
        assert_eq!(compare_values(None, Some(&dated), true), Ordering::Greater);
        assert_eq!(compare_values(None, Some(&broken), true), Ordering::Equal);
    }
}
