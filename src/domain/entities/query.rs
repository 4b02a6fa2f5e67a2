use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Desc,
        }
    }
}

/// Inclusive day range. A missing `to` means the single day `from`; a missing
/// `from` leaves the filter inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn day(day: NaiveDate) -> Self {
        Self {
            from: Some(day),
            to: None,
        }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    Paged,
    Scroll,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaginationState {
    pub mode: PaginationMode,
    pub page_size: usize,
    /// 1-based page number, read in paged mode.
    pub page: usize,
    /// Rows revealed so far, read in scroll mode.
    pub loaded_count: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            mode: PaginationMode::Paged,
            page_size,
            page: 1,
            loaded_count: page_size,
        }
    }

    pub fn scroll(page_size: usize) -> Self {
        Self {
            mode: PaginationMode::Scroll,
            ..Self::new(page_size)
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
        self.loaded_count = self.page_size;
    }

    /// Grows the scroll window by one page while rows remain; never past `total_count`.
    /// Returns whether the window grew.
    pub fn request_more(&mut self, total_count: usize) -> bool {
        if self.loaded_count >= total_count {
            return false;
        }
        self.loaded_count = (self.loaded_count + self.page_size).min(total_count);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    pub search_term: String,
    pub date_filters: BTreeMap<String, DateRange>,
    pub sort_key: Vec<SortSpec>,
    pub pagination: PaginationState,
}

impl QueryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            date_filters: BTreeMap::new(),
            sort_key: Vec::new(),
            pagination: PaginationState::new(page_size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub rows: Vec<Row>,
    pub total_count: usize,
    pub total_pages: usize,
    pub mode: PaginationMode,
    pub page: usize,
    pub loaded_count: usize,
    pub has_more: bool,
    /// Half-open window `[window_start, window_end)` over the sorted rows.
    pub window_start: usize,
    pub window_end: usize,
}
