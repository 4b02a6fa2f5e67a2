use std::cell::RefCell;
use std::sync::Arc;

use log::trace;

use crate::config::TableConfig;
use crate::domain::entities::query::{PageResult, QueryState};
use crate::domain::entities::row::{Row, RowId};
use crate::usecase::ports::repo::RowStore;
use crate::usecase::projection::project;

struct CachedPage {
    generation: u64,
    query: QueryState,
    result: PageResult,
}

/// Runs the projection over the store, reusing the previous result while neither
/// the store generation nor the query has changed.
pub struct QueryService {
    store: Arc<dyn RowStore>,
    config: TableConfig,
    last: RefCell<Option<CachedPage>>,
}

impl QueryService {
    pub fn new(store: Arc<dyn RowStore>, config: TableConfig) -> Self {
        Self {
            store,
            config,
            last: RefCell::new(None),
        }
    }

    pub fn query_page(&self, query: &QueryState) -> PageResult {
        let generation = self.store.generation();
        if let Some(cached) = self.last.borrow().as_ref() {
            if cached.generation == generation && cached.query == *query {
                trace!("projection cache hit at generation {generation}");
                return cached.result.clone();
            }
        }

        let rows = self.store.rows();
        let result = project(
            &rows,
            query,
            &self.config.columns,
            &self.config.search_fields,
        );
        *self.last.borrow_mut() = Some(CachedPage {
            generation,
            query: query.clone(),
            result: result.clone(),
        });
        result
    }

    pub fn total_count(&self, query: &QueryState) -> usize {
        self.query_page(query).total_count
    }

    pub fn row(&self, id: RowId) -> Option<Row> {
        self.store.get(id)
    }
}
