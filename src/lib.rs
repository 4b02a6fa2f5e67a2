//! Data side of an employee table: search, multi-column sort, date-range filters,
//! paged or infinite-scroll windows, column visibility and validated cell edits.
//!
//! The core is [`usecase::projection::project`], a pure function from rows plus a
//! [`domain::entities::query::QueryState`] to the visible [`domain::entities::query::PageResult`].
//! Everything else is the host around it: an in-memory row store, file imports,
//! configuration, and the [`ui::state::table_state::TableState`] container that turns
//! user intents into query changes.

pub mod config;

pub mod domain {
    pub mod dates;
    pub mod display;
    pub mod visibility;

    pub mod entities {
        pub mod column;
        pub mod edit;
        pub mod query;
        pub mod row;
    }
}

pub mod usecase {
    pub mod projection;

    pub mod ports {
        pub mod repo;
    }

    pub mod services {
        pub mod edit_service;
        pub mod import_service;
        pub mod query_service;
    }
}

pub mod infra {
    pub mod import {
        pub mod csv;
        pub mod json;
        pub mod tabular;
        pub mod xlsx;
    }

    pub mod memory {
        pub mod store;
    }
}

pub mod ui {
    pub mod state {
        pub mod table_state;
    }
}
