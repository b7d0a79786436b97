use thiserror::Error;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Convenience result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Error type returned when a source table cannot be loaded.
///
/// This is a single error enum shared across CSV and (optional) workbook loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook parse error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV parse error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "http")]
    /// The remote source could not be fetched (connection failure or non-success status).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A source that looked like a URL could not be parsed as one.
    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The source format could not be determined from the path.
    #[error("cannot infer format: {message}")]
    UnknownFormat { message: String },

    /// The source contains no non-empty row to use as a header.
    #[error("no header row found in {source_name}")]
    NoHeader { source_name: String },

    /// The workbook has no sheets to load.
    #[error("workbook has no sheets")]
    NoSheets,

    /// Sheets selected for a multi-sheet load do not share the same header.
    #[error("sheet '{sheet}' header {found:?} does not match {expected:?}")]
    HeaderMismatch {
        sheet: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The requested format needs a cargo feature that is not enabled.
    #[error("{what} not enabled (enable cargo feature '{feature}')")]
    FeatureDisabled {
        what: &'static str,
        feature: &'static str,
    },
}

/// Error type returned when a filter configuration is missing or malformed.
///
/// A failed filter never produces a partial table; callers keep their previous view.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No primary column was given.
    #[error("missing primary column: enter the primary column and the columns to operate on")]
    MissingPrimaryColumn,

    /// No operation columns were given.
    #[error("missing operation columns: enter the primary column and the columns to operate on")]
    MissingOperationColumns,

    /// Combinator text other than `and` / `or`.
    #[error("unknown combinator '{0}' (expected 'and' or 'or')")]
    UnknownCombinator(String),

    /// Predicate text other than `null` / `not-null`.
    #[error("unknown predicate '{0}' (expected 'null' or 'not-null')")]
    UnknownPredicate(String),

    /// A filter configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A filter configuration file is not valid JSON for [`crate::config::FilterConfig`].
    #[error("invalid filter config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error type returned by the tabular exporters.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying I/O error while writing the output file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// XLSX serialization error (feature-gated behind `excel`).
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Format text other than `xlsx` / `csv`.
    #[error("unknown export format '{0}' (expected 'xlsx' or 'csv')")]
    UnknownFormat(String),

    /// The table does not fit in a worksheet.
    #[error("table too large for a worksheet: {message}")]
    TooLarge { message: String },

    /// The requested format needs a cargo feature that is not enabled.
    #[error("{what} not enabled (enable cargo feature '{feature}')")]
    FeatureDisabled {
        what: &'static str,
        feature: &'static str,
    },
}
