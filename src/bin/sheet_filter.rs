use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sheet_filter::config::FilterConfig;
use sheet_filter::export::{export_table, ExportFormat, ExportOptions};
use sheet_filter::load::{
    load_from_source, CompositeObserver, FileObserver, LoadObserver, LoadOptions, SheetSelection,
    TracingObserver,
};
use sheet_filter::render::{HtmlRenderer, Renderer};
use sheet_filter::session::Session;
use sheet_filter::types::Table;

#[derive(Parser)]
#[command(about = "Filter spreadsheet rows by null / not-null checks and render or export the result.")]
struct Args {
    /// Source spreadsheet (.csv, .xlsx, .xls, .xlsm, .xlsb, .ods): a local path or an
    /// http(s) URL.
    input: String,

    /// Worksheet to read (default: the first sheet).
    #[arg(long)]
    sheet: Option<String>,

    /// Rows whose primary column is empty are always dropped.
    #[arg(long)]
    primary: Option<String>,

    /// Comma-separated columns to check, e.g. `email, phone`.
    #[arg(long)]
    columns: Option<String>,

    /// How the column checks combine: `and` or `or`.
    #[arg(long, default_value = "and")]
    combinator: String,

    /// Check to run on each column: `null` or `not-null`.
    #[arg(long, default_value = "not-null")]
    predicate: String,

    /// Read the filter from a JSON file instead of the flags above.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["primary", "columns"])]
    config: Option<PathBuf>,

    /// Write the view as a standalone HTML page.
    #[arg(long, value_name = "PATH")]
    html: Option<PathBuf>,

    /// Export the view as a spreadsheet with this file name (extension added; blank means
    /// `download`).
    #[arg(long, value_name = "FILENAME")]
    export: Option<String>,

    /// Export format: `xlsx` or `csv`.
    #[arg(long, default_value = "xlsx")]
    format: ExportFormat,

    /// Directory for exported files.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Also append load events to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let renderer = HtmlRenderer::default();

    let loaded = load_from_source(&args.input, &load_options(&args));
    if let (Err(_), Some(path)) = (&loaded, &args.html) {
        write_html(path, &renderer.page_for_load(&title(&args), &loaded))?;
    }
    let table = loaded.with_context(|| format!("failed to load {}", args.input))?;

    let mut session = Session::new(table);
    if let Some(cfg) = filter_config(&args)? {
        let view = session.apply(&cfg).context("filter not applied")?;
        info!(rows = view.row_count(), columns = view.column_count(), "filtered view ready");
    }
    let view = session.view();

    if let Some(path) = &args.html {
        write_html(path, &renderer.render_page(view, &title(&args)))?;
    }
    if let Some(filename) = &args.export {
        export(view, &args, filename)?;
    }
    if args.html.is_none() && args.export.is_none() {
        print!("{}", renderer.render(view));
    }

    Ok(())
}

fn load_options(args: &Args) -> LoadOptions {
    let mut observers: Vec<Arc<dyn LoadObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = &args.log_file {
        observers.push(Arc::new(FileObserver::new(path)));
    }

    LoadOptions {
        sheet_selection: args
            .sheet
            .clone()
            .map(SheetSelection::Sheet)
            .unwrap_or_default(),
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    }
}

/// `None` when no filter was requested; the full table is shown.
fn filter_config(args: &Args) -> Result<Option<FilterConfig>> {
    if let Some(path) = &args.config {
        let cfg = FilterConfig::from_json_path(path)
            .with_context(|| format!("failed to read filter config {}", path.display()))?;
        return Ok(Some(cfg));
    }
    if args.primary.is_none() && args.columns.is_none() {
        return Ok(None);
    }

    let cfg = FilterConfig::from_inputs(
        args.primary.as_deref().unwrap_or_default(),
        args.columns.as_deref().unwrap_or_default(),
        &args.combinator,
        &args.predicate,
    )
    .context("filter not applied")?;
    Ok(Some(cfg))
}

fn export(view: &Table, args: &Args, filename: &str) -> Result<()> {
    let opts = ExportOptions {
        filename: filename.to_string(),
        format: args.format,
        ..Default::default()
    };
    let path = export_table(view, &args.out_dir, &opts)
        .with_context(|| format!("failed to export {}", opts.file_name()))?;
    println!("{}", path.display());
    Ok(())
}

fn write_html(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))
}

fn title(args: &Args) -> String {
    let source = args.input.split(['?', '#']).next().unwrap_or_default();
    Path::new(source)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string())
}
