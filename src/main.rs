use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use talent_table::config::load_config_or_default;
use talent_table::domain::dates::parse_date;
use talent_table::domain::display::{
    footer_summary, format_field_label, format_field_value, initials,
};
use talent_table::domain::entities::edit::CellEdit;
use talent_table::domain::entities::query::{DateRange, PageResult, PaginationMode, SortDirection};
use talent_table::domain::entities::row::{CellValue, Row, RowId};
use talent_table::infra::memory::store::InMemoryRowStore;
use talent_table::ui::state::table_state::TableState;
use talent_table::usecase::ports::repo::RowStore;
use talent_table::usecase::services::edit_service::EditService;
use talent_table::usecase::services::import_service::ImportService;
use talent_table::usecase::services::query_service::QueryService;

/// Show one window of a table file after search, date filters and sorting.
#[derive(Parser, Debug)]
#[command(name = "talent-table", version)]
struct Args {
    /// Rows to load (.json, .csv or .xlsx).
    file: PathBuf,

    /// Table config (JSON). Defaults to table.json in the platform config dir.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Case-insensitive substring matched against the search fields.
    #[arg(long, default_value = "")]
    search: String,

    /// Sort key `COLUMN[:asc|desc]`; repeat for secondary keys.
    #[arg(long = "sort", value_name = "KEY")]
    sort: Vec<String>,

    /// Date filter `COLUMN=DD-MM-YYYY[..DD-MM-YYYY]` (repeatable).
    #[arg(long = "date", value_name = "FILTER")]
    dates: Vec<String>,

    /// Cell edit `ID:FIELD=VALUE` applied before the query (repeatable).
    #[arg(long = "set", value_name = "EDIT")]
    edits: Vec<String>,

    /// Column id to hide (repeatable).
    #[arg(long = "hide", value_name = "COLUMN")]
    hidden: Vec<String>,

    /// 1-based page in paged mode.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Use the growing scroll window instead of pages.
    #[arg(long)]
    scroll: bool,

    /// "Load more" requests to issue in scroll mode.
    #[arg(long, default_value_t = 0)]
    more: usize,

    /// Print the detail view of one row instead of the table.
    #[arg(long, value_name = "ID")]
    detail: Option<i64>,

    /// Print the page as JSON.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if let Err(err) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("failed to initialize logger: {err}");
    }

    if let Err(err) = run(args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config_or_default(args.config.as_deref())?;
    let store: Arc<dyn RowStore> = Arc::new(InMemoryRowStore::default());
    ImportService::new(store.clone()).import(&args.file)?;

    let queries = QueryService::new(store.clone(), config.clone());
    let edits = EditService::new(store.clone(), config.columns.clone());
    let mut state = TableState::new(config.columns.clone(), config.page_size);

    for raw in &args.edits {
        let edit = parse_edit_arg(raw)?;
        state
            .commit_edit(&edits, &queries, edit)
            .with_context(|| format!("failed to apply edit {raw:?}"))?;
    }

    if !args.hidden.is_empty() {
        state.open_column_manager();
        for column in &args.hidden {
            state.toggle_column(column);
        }
        state.apply_column_manager();
    }

    state.set_search_term(args.search.clone());
    for raw in &args.dates {
        let (accessor, range) = parse_date_arg(raw)?;
        state.set_date_filter(&accessor, Some(range));
    }
    for raw in &args.sort {
        let (accessor, direction) = parse_sort_arg(raw)?;
        state.set_sort(&accessor, direction);
    }

    if args.scroll {
        state.set_pagination_mode(PaginationMode::Scroll);
        for _ in 0..args.more {
            let total = queries.total_count(&state.query);
            if !state.request_more(total) {
                break;
            }
        }
    } else {
        state.set_page(args.page);
    }

    if let Some(id) = args.detail {
        state.open_detail(RowId(id));
        let row = state
            .detail_row(&queries)
            .ok_or_else(|| anyhow!("row {id} not found"))?;
        print_detail(&row);
        return Ok(());
    }

    let page = queries.query_page(&state.query);
    if args.json {
        let rendered = serde_json::to_string_pretty(&page).context("failed to encode page")?;
        println!("{rendered}");
    } else {
        print_page(&state, &page);
    }
    Ok(())
}

fn parse_sort_arg(raw: &str) -> Result<(String, SortDirection)> {
    let (column, direction) = match raw.split_once(':') {
        Some((column, direction)) => (column, direction),
        None => (raw, "asc"),
    };
    let direction = match direction.to_ascii_lowercase().as_str() {
        "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        other => anyhow::bail!("unknown sort direction {other:?} in {raw:?}"),
    };
    if column.is_empty() {
        anyhow::bail!("sort key {raw:?} has no column")
    }
    Ok((column.to_string(), direction))
}

fn parse_date_arg(raw: &str) -> Result<(String, DateRange)> {
    let (column, range) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("date filter {raw:?} must look like COLUMN=DD-MM-YYYY"))?;
    let parse = |text: &str| {
        parse_date(text.trim()).ok_or_else(|| anyhow!("invalid date {text:?} in {raw:?}"))
    };
    let range = match range.split_once("..") {
        Some((from, to)) => DateRange::between(parse(from)?, parse(to)?),
        None => DateRange::day(parse(range)?),
    };
    Ok((column.to_string(), range))
}

fn parse_edit_arg(raw: &str) -> Result<CellEdit> {
    let (id, assignment) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("edit {raw:?} must look like ID:FIELD=VALUE"))?;
    let (field, value) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("edit {raw:?} must look like ID:FIELD=VALUE"))?;
    let id: i64 = id
        .trim()
        .parse()
        .with_context(|| format!("invalid row id in {raw:?}"))?;
    Ok(CellEdit::new(RowId(id), field, CellValue::from(value)))
}

fn print_page(state: &TableState, page: &PageResult) {
    let columns: Vec<_> = state
        .visible_columns()
        .into_iter()
        .filter(|column| !column.is_action_column)
        .collect();

    let labels: Vec<&str> = columns.iter().map(|column| column.label.as_str()).collect();
    println!("{}", labels.join("\t"));

    if page.rows.is_empty() {
        println!("No data found");
    }
    for row in &page.rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| format_field_value(&column.accessor, row))
            .collect();
        println!("{}", cells.join("\t"));
    }

    println!();
    println!("{}", footer_summary(page));
    if page.mode == PaginationMode::Paged && page.total_pages > 0 {
        println!("Page {} of {}", page.page, page.total_pages);
    }
}

fn print_detail(row: &Row) {
    let name = row.text("name");
    if !name.is_empty() {
        println!("[{}] {name}", initials(&name));
    }
    println!("{:<24}{}", "ID", row.id);
    for field in row.fields.keys() {
        println!(
            "{:<24}{}",
            format_field_label(field),
            format_field_value(field, row)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sort_arg_defaults_to_ascending() {
        let (column, direction) = parse_sort_arg("enps").expect("sort arg should parse");
        assert_eq!(column, "enps");
        assert_eq!(direction, SortDirection::Asc);

        let (_, direction) = parse_sort_arg("enps:DESC").expect("sort arg should parse");
        assert_eq!(direction, SortDirection::Desc);

        assert!(parse_sort_arg("enps:sideways").is_err());
    }

    #[test]
    fn parse_date_arg_reads_single_day_and_range() {
        let (column, range) =
            parse_date_arg("dateOfJoining=05-03-2021").expect("date arg should parse");
        assert_eq!(column, "dateOfJoining");
        assert_eq!(range.from, parse_date("05-03-2021"));
        assert_eq!(range.to, None);

        let (_, range) = parse_date_arg("dateOfJoining=01-03-2021..31-03-2021")
            .expect("date range arg should parse");
        assert_eq!(range.to, parse_date("31-03-2021"));

        assert!(parse_date_arg("dateOfJoining=2021-03-05").is_err());
    }

    #[test]
    fn parse_edit_arg_splits_id_field_and_value() {
        let edit = parse_edit_arg("7:status=On Leave").expect("edit arg should parse");
        assert_eq!(edit, CellEdit::new(RowId(7), "status", "On Leave"));
        assert!(parse_edit_arg("status=Active").is_err());
    }
}
