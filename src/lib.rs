//! `sheet-filter` loads a spreadsheet into an in-memory [`types::Table`], filters its rows by
//! null-presence predicates, renders the result as HTML and exports it as XLSX or CSV.
//!
//! The core is [`processing::apply_filter`]: a single pass over the source rows that keeps rows
//! whose primary column has a value and whose operation columns satisfy a null / not-null check
//! (combined with AND or OR), then projects each kept row onto those columns.
//!
//! ## What you can load
//!
//! **File formats (auto-detected by extension):**
//!
//! - **CSV**: `.csv`
//! - **Excel/workbooks** (Cargo feature `excel`, on by default): `.xlsx`, `.xls`, `.xlsm`,
//!   `.xlsb`, `.ods`
//!
//! Sources are local paths or, with the `http` feature (on by default), `http(s)://` URLs; see
//! [`load::load_from_source`].
//!
//! Column names come from the first non-empty row. Cells become typed [`types::Value`]s; a cell
//! is *absent* when it is null or an empty string, and absent cells are shown and exported as the
//! literal `NULL`.
//!
//! ## Quick example: load, filter, render, export
//!
//! ```no_run
//! use sheet_filter::config::FilterConfig;
//! use sheet_filter::export::{export_table, ExportFormat, ExportOptions};
//! use sheet_filter::load::{load_from_path, LoadOptions};
//! use sheet_filter::render::{HtmlRenderer, Renderer};
//! use sheet_filter::session::Session;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = load_from_path("contacts.xlsx", &LoadOptions::default())?;
//! let mut session = Session::new(table);
//!
//! let cfg = FilterConfig::from_inputs("id", "email, phone", "or", "not-null")?;
//! session.apply(&cfg)?;
//!
//! println!("{}", HtmlRenderer::default().render(session.view()));
//!
//! let opts = ExportOptions { format: ExportFormat::Csv, ..Default::default() };
//! export_table(session.view(), ".", &opts)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: [`types::Value`], [`types::Table`] and the absent-cell rules
//! - [`config`]: [`config::FilterConfig`] and its option values
//! - [`processing`]: the row filter & projector
//! - [`session`]: owner of the source table and the current view
//! - [`load`]: CSV/workbook loading from paths and URLs, and load observers
//! - [`render`]: the [`render::Renderer`] trait and HTML output
//! - [`export`]: XLSX/CSV export
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod export;
pub mod load;
pub mod processing;
pub mod render;
pub mod session;
pub mod types;

pub use error::{ConfigError, ExportError, ExportResult, LoadError, LoadResult};
