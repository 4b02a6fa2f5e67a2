use log::debug;

use crate::domain::entities::column::{find_column, ColumnSpec};
use crate::domain::entities::edit::CellEdit;
use crate::domain::entities::query::{
    DateRange, PaginationMode, QueryState, SortDirection, SortSpec,
};
use crate::domain::entities::row::{Row, RowId};
use crate::domain::visibility::{
    apply_column_visibility, is_required_column, normalize_column_visibility, set_all_visible,
    visible_count, ColumnVisibility,
};
use crate::usecase::services::edit_service::{EditError, EditService};
use crate::usecase::services::query_service::QueryService;

/// Everything the host tracks between renders. Each intent method is one logical
/// update: when it changes which rows match, it also resets pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub query: QueryState,
    pub columns: Vec<ColumnSpec>,
    pub column_visibility: ColumnVisibility,
    pub visibility_draft: Option<ColumnVisibility>,
    pub selected_row: Option<RowId>,
}

impl TableState {
    pub fn new(columns: Vec<ColumnSpec>, page_size: usize) -> Self {
        Self {
            query: QueryState::new(page_size),
            columns,
            column_visibility: ColumnVisibility::new(),
            visibility_draft: None,
            selected_row: None,
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.query.search_term == term {
            return false;
        }
        self.query.search_term = term;
        self.query.pagination.reset();
        true
    }

    /// Sets the range for one column, or clears it with `None` or a range without `from`.
    pub fn set_date_filter(&mut self, accessor: &str, range: Option<DateRange>) {
        match range.filter(DateRange::is_active) {
            Some(range) => {
                self.query.date_filters.insert(accessor.to_string(), range);
            }
            None => {
                self.query.date_filters.remove(accessor);
            }
        }
        self.query.pagination.reset();
    }

    /// Header click: absent -> ascending -> descending -> removed. Later clicks on
    /// other columns append lower-precedence keys.
    pub fn toggle_sort(&mut self, accessor: &str) {
        if !self.is_sortable(accessor) {
            debug!("ignoring sort toggle on {accessor:?}");
            return;
        }

        let sort_key = &mut self.query.sort_key;
        match sort_key.iter().position(|spec| spec.column == accessor) {
            None => sort_key.push(SortSpec::asc(accessor)),
            Some(idx) if sort_key[idx].direction == SortDirection::Asc => {
                sort_key[idx].direction = SortDirection::Desc;
            }
            Some(idx) => {
                sort_key.remove(idx);
            }
        }
    }

    /// Sorts `accessor` in `direction`. An existing key keeps its precedence.
    pub fn set_sort(&mut self, accessor: &str, direction: SortDirection) {
        if !self.is_sortable(accessor) {
            debug!("ignoring sort on {accessor:?}");
            return;
        }

        let sort_key = &mut self.query.sort_key;
        match sort_key.iter_mut().find(|spec| spec.column == accessor) {
            Some(spec) => spec.direction = direction,
            None => sort_key.push(SortSpec {
                column: accessor.to_string(),
                direction,
            }),
        }
    }

    fn is_sortable(&self, accessor: &str) -> bool {
        find_column(&self.columns, accessor).is_some_and(|column| column.sortable)
    }

    pub fn sort_direction(&self, accessor: &str) -> Option<SortDirection> {
        self.query
            .sort_key
            .iter()
            .find(|spec| spec.column == accessor)
            .map(|spec| spec.direction)
    }

    pub fn set_pagination_mode(&mut self, mode: PaginationMode) {
        if self.query.pagination.mode == mode {
            return;
        }
        self.query.pagination.mode = mode;
        self.query.pagination.loaded_count = self.query.pagination.page_size;
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.pagination.page = page;
    }

    /// Scroll-mode "load more". Ignored in paged mode.
    pub fn request_more(&mut self, total_count: usize) -> bool {
        if self.query.pagination.mode != PaginationMode::Scroll {
            return false;
        }
        self.query.pagination.request_more(total_count)
    }

    /// Called after the row set changed underneath the query.
    pub fn on_total_changed(&mut self, previous: usize, current: usize) {
        if previous != current {
            debug!("matching rows went from {previous} to {current}; resetting pagination");
            self.query.pagination.reset();
        }
    }

    /// Applies a cell edit and keeps pagination consistent with the new match count.
    pub fn commit_edit(
        &mut self,
        edits: &EditService,
        queries: &QueryService,
        edit: CellEdit,
    ) -> Result<bool, EditError> {
        let before = queries.total_count(&self.query);
        let changed = edits.apply_edit(edit)?;
        if changed {
            let after = queries.total_count(&self.query);
            self.on_total_changed(before, after);
        }
        Ok(changed)
    }

    pub fn visible_columns(&self) -> Vec<&ColumnSpec> {
        apply_column_visibility(&self.columns, &self.column_visibility)
    }

    pub fn open_column_manager(&mut self) {
        self.visibility_draft = Some(normalize_column_visibility(
            &self.columns,
            &self.column_visibility,
        ));
    }

    pub fn toggle_column(&mut self, column_id: &str) {
        if is_required_column(column_id) {
            return;
        }
        if let Some(draft) = self.visibility_draft.as_mut() {
            if let Some(visible) = draft.get_mut(column_id) {
                *visible = !*visible;
            }
        }
    }

    pub fn select_all_columns(&mut self) {
        if self.visibility_draft.is_some() {
            self.visibility_draft = Some(set_all_visible(&self.columns, true));
        }
    }

    pub fn deselect_all_columns(&mut self) {
        if self.visibility_draft.is_some() {
            self.visibility_draft = Some(set_all_visible(&self.columns, false));
        }
    }

    pub fn draft_visible_count(&self) -> usize {
        self.visibility_draft.as_ref().map(visible_count).unwrap_or(0)
    }

    pub fn apply_column_manager(&mut self) {
        if let Some(draft) = self.visibility_draft.take() {
            self.column_visibility = draft;
        }
    }

    pub fn cancel_column_manager(&mut self) {
        self.visibility_draft = None;
    }

    pub fn open_detail(&mut self, row_id: RowId) {
        self.selected_row = Some(row_id);
    }

    pub fn close_detail(&mut self) {
        self.selected_row = None;
    }

    pub fn is_detail_open(&self) -> bool {
        self.selected_row.is_some()
    }

    /// Current copy of the selected row; `None` once it is gone from the store.
    pub fn detail_row(&self, queries: &QueryService) -> Option<Row> {
        self.selected_row.and_then(|id| queries.row(id))
    }
}
