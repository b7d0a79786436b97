//! Tabular export of a (usually filtered) [`Table`].
//!
//! Every exporter normalizes absent cells to the `"NULL"` sentinel before writing, so the file
//! matches what the renderer shows.
//!
//! ```no_run
//! use sheet_filter::export::{export_table, ExportFormat, ExportOptions};
//! use sheet_filter::types::{Table, Value};
//!
//! # fn main() -> Result<(), sheet_filter::ExportError> {
//! let table = Table::new(vec!["id".into()], vec![vec![Value::Int64(1)]]);
//! let opts = ExportOptions {
//!     filename: "report".to_string(),
//!     format: ExportFormat::Csv,
//!     ..Default::default()
//! };
//! let written = export_table(&table, "out", &opts)?;
//! assert!(written.ends_with("report.csv"));
//! # Ok(())
//! # }
//! ```

pub mod csv;
#[cfg(feature = "excel")]
pub mod xlsx;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::types::Table;

/// File name used when the caller leaves it blank.
pub const DEFAULT_FILENAME: &str = "download";

/// Worksheet name used for XLSX exports.
pub const DEFAULT_SHEET_NAME: &str = "Filtered Data";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Office Open XML workbook (feature-gated behind `excel`).
    #[default]
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Options controlling [`export_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// File name without extension; blank falls back to [`DEFAULT_FILENAME`].
    pub filename: String,
    pub format: ExportFormat,
    /// Worksheet name (XLSX only).
    pub sheet_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            format: ExportFormat::default(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl ExportOptions {
    /// The output file name, extension included.
    pub fn file_name(&self) -> String {
        let stem = match self.filename.trim() {
            "" => DEFAULT_FILENAME,
            s => s,
        };
        format!("{stem}.{}", self.format.extension())
    }
}

/// Write `table` into `dir` using `options`, returning the path written.
pub fn export_table(
    table: &Table,
    dir: impl AsRef<Path>,
    options: &ExportOptions,
) -> ExportResult<PathBuf> {
    let path = dir.as_ref().join(options.file_name());

    match options.format {
        ExportFormat::Csv => csv::export_csv_to_path(table, &path)?,
        ExportFormat::Xlsx => export_xlsx_dispatch(table, &path, &options.sheet_name)?,
    }

    info!(
        format = %options.format,
        path = %path.display(),
        rows = table.row_count(),
        "exported table"
    );
    Ok(path)
}

fn export_xlsx_dispatch(table: &Table, path: &Path, sheet_name: &str) -> ExportResult<()> {
    let _ = (table, path, sheet_name);

    #[cfg(feature = "excel")]
    {
        xlsx::export_xlsx_to_path(table, path, sheet_name)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(ExportError::FeatureDisabled {
            what: "xlsx export",
            feature: "excel",
        })
    }
}
