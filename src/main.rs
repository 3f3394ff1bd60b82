//! tabstate - Entry Point

use clap::Parser;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use tabstate::config::{self, CliOverrides, ResolvedConfig};
use tabstate::model::AppError;
use tabstate::source::{detect_input_source, PagedSource};
use tabstate::strategy::DataSource;
use tabstate::{HybridPaginator, ListController, PageNumber, Row, RowKey};

/// tabstate - search and page through JSON rows
#[derive(Parser, Debug)]
#[command(name = "tabstate")]
#[command(version)]
#[command(about = "Search, paginate and select rows of a JSON array or JSON Lines file")]
pub struct Args {
    /// Path to a JSON array or JSON Lines file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Searchable field (repeatable)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Search query as FIELD=QUERY (repeatable)
    #[arg(short, long, value_parser = parse_search)]
    pub search: Vec<(String, String)>,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page
    #[arg(short = 'n', long)]
    pub rows_per_page: Option<usize>,

    /// Field holding each row's stable identity
    #[arg(short, long)]
    pub key: Option<String>,

    /// Simulate a server that returns pages of this size
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub remote_size: Option<u32>,

    /// Columns to display, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Mark a row as selected by key (repeatable)
    #[arg(long)]
    pub select: Vec<String>,

    /// Mark a row as expanded by key (repeatable)
    #[arg(long)]
    pub expand: Vec<String>,

    /// Reject searches on fields that are not searchable
    #[arg(long)]
    pub strict: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse `FIELD=QUERY`. The query may be empty or contain `=`.
fn parse_search(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, query)) if !field.trim().is_empty() => {
            Ok((field.to_string(), query.to_string()))
        }
        _ => Err(format!("expected FIELD=QUERY, got '{raw}'")),
    }
}

/// Key given on the command line: an absolute row position when rows
/// have no key field.
fn parse_key(raw: &str, keyed: bool) -> RowKey {
    if keyed {
        return RowKey::id(raw);
    }
    raw.parse::<usize>()
        .map(RowKey::Position)
        .unwrap_or_else(|_| RowKey::id(raw))
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged);

    let cli = CliOverrides {
        rows_per_page: args.rows_per_page,
        search_fields: args.fields.clone(),
        key_field: args.key.clone(),
        strict_fields: args.strict.then_some(true),
    };
    Ok(config::apply_cli_overrides(with_env, cli))
}

fn build_controller(config: &ResolvedConfig) -> Result<ListController<Value>, AppError> {
    let mut builder = ListController::builder(Vec::new())
        .search_fields(config.search_fields.iter().cloned())
        .rows_per_page(config.rows_per_page)
        .out_of_range(config.out_of_range)
        .strict_fields(config.strict_fields);

    if let Some(field) = config.key_field.clone() {
        builder = builder.key_fn(move |row: &Value| {
            RowKey::id(row.field_text(&field).unwrap_or_default().into_owned())
        });
    }

    Ok(builder.build()?)
}

fn render<S>(
    mut paginator: HybridPaginator<S>,
    args: &Args,
    columns: &[String],
    keyed: bool,
) -> Result<String, AppError>
where
    S: DataSource<Row = Value>,
{
    for (field, query) in &args.search {
        paginator.set_search(field.as_str(), query.as_str())?;
    }

    let page = PageNumber::new(args.page as usize).unwrap_or_default();
    if page != PageNumber::FIRST {
        paginator.change_page(page)?;
    }

    let controller = paginator.controller_mut();
    for raw in &args.select {
        controller.toggle_selected(parse_key(raw, keyed));
    }
    for raw in &args.expand {
        controller.toggle_expanded(parse_key(raw, keyed));
    }

    info!(mode = ?paginator.mode(), "Rendering page");
    let pagination = paginator.pagination();
    let view = paginator.view();
    Ok(tabstate::view::render_table(&view, columns, &pagination))
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(&args)?;

    tabstate::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let rows = detect_input_source(args.file.clone()).load()?;

    let columns = if !args.columns.is_empty() {
        args.columns.clone()
    } else if !config.search_fields.is_empty() {
        config.search_fields.clone()
    } else {
        tabstate::view::columns_from_rows(&rows)
    };

    let keyed = config.key_field.is_some();
    let controller = build_controller(&config)?;

    let output = match args.remote_size {
        Some(size) => {
            let source = PagedSource::new(rows, size as usize)?;
            render(HybridPaginator::new(source, controller), &args, &columns, keyed)?
        }
        None => render(HybridPaginator::new(rows, controller), &args, &columns, keyed)?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
