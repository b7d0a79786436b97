//! Unified load entrypoint.
//!
//! Most callers should use [`load_from_source`], which reads a local file ([`load_from_path`]) or
//! an `http(s)://` URL ([`load_from_url`], feature `http`) into an in-memory
//! [`crate::types::Table`].
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension (for a
//!   URL, the extension of its path).
//! - If a [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::types::Table;

use super::csv;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Infer the format of `path` from its extension.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LoadError::UnknownFormat {
                message: format!("path has no extension ({})", path.display()),
            })?;

        Self::from_extension(ext).ok_or_else(|| LoadError::UnknownFormat {
            message: format!("unsupported extension '{ext}' ({})", path.display()),
        })
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Excel => "excel",
        })
    }
}

/// Which sheet(s) to read from a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// The first sheet (default).
    #[default]
    First,
    /// A single named sheet.
    Sheet(String),
    /// All sheets, rows concatenated.
    AllSheets,
    /// The listed sheets in order, rows concatenated.
    Sheets(Vec<String>),
}

impl fmt::Display for SheetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelection::First => f.write_str("first"),
            SheetSelection::Sheet(name) => f.write_str(name),
            SheetSelection::AllSheets => f.write_str("all"),
            SheetSelection::Sheets(names) => f.write_str(&names.join(",")),
        }
    }
}

/// Options controlling [`load_from_path`] and [`load_from_url`].
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<SourceFormat>,
    /// Workbook-only: which sheet(s) to read.
    pub sheet_selection: SheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("sheet_selection", &self.sheet_selection)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet_selection: SheetSelection::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a table from a local file.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with row/column counts
/// - `on_failure` with a [`LoadSeverity`] computed from the error
/// - `on_alert` when that severity is >= `options.alert_at_or_above`
///
/// A path whose format cannot be inferred fails before any observer is called.
///
/// ```no_run
/// use sheet_filter::load::{load_from_path, LoadOptions, SheetSelection};
///
/// # fn main() -> Result<(), sheet_filter::LoadError> {
/// let opts = LoadOptions {
///     sheet_selection: SheetSelection::Sheet("Sheet1".to_string()),
///     ..Default::default()
/// };
/// let table = load_from_path("workbook.xlsx", &opts)?;
/// println!("rows={} columns={:?}", table.row_count(), table.columns);
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Table> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => SourceFormat::from_path(path)?,
    };

    let result = match format {
        SourceFormat::Csv => csv::load_csv_from_path(path),
        SourceFormat::Excel => load_excel_dispatch(path, &options.sheet_selection),
    };

    let ctx = LoadContext::new(path.display().to_string(), format, &options.sheet_selection);
    report(options, &ctx, &result);
    result
}

/// `true` for sources that should be fetched over the network rather than read from disk.
pub fn is_url(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Load from a local path or an `http(s)://` URL, whichever `source` is.
///
/// Without the `http` feature a URL fails with [`LoadError::FeatureDisabled`].
pub fn load_from_source(source: &str, options: &LoadOptions) -> LoadResult<Table> {
    if is_url(source) {
        load_from_url(source, options)
    } else {
        load_from_path(source, options)
    }
}

/// Download `url` and load the body as a table.
///
/// The format comes from [`LoadOptions::format`] or the extension of the URL's path
/// (`https://host/files/contacts.xlsx?token=…` is a workbook). A connection failure or a
/// non-success status is [`LoadError::Http`] and is reported as [`LoadSeverity::Critical`].
#[cfg(feature = "http")]
pub fn load_from_url(url: &str, options: &LoadOptions) -> LoadResult<Table> {
    let client = reqwest::blocking::Client::builder().build()?;
    load_from_url_with_client(&client, url, options)
}

/// Like [`load_from_url`], using a caller-configured client (timeouts, proxies, headers).
#[cfg(feature = "http")]
pub fn load_from_url_with_client(
    client: &reqwest::blocking::Client,
    url: &str,
    options: &LoadOptions,
) -> LoadResult<Table> {
    let parsed = reqwest::Url::parse(url.trim()).map_err(|e| LoadError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    let format = match options.format {
        Some(f) => f,
        None => SourceFormat::from_path(Path::new(parsed.path()))?,
    };

    let result = super::http::fetch_bytes(client, parsed.clone()).and_then(|bytes| match format {
        SourceFormat::Csv => csv::load_csv_from_bytes(&bytes),
        SourceFormat::Excel => load_excel_bytes_dispatch(bytes, &options.sheet_selection),
    });

    let ctx = LoadContext::new(parsed.to_string(), format, &options.sheet_selection);
    report(options, &ctx, &result);
    result
}

#[cfg(not(feature = "http"))]
pub fn load_from_url(_url: &str, _options: &LoadOptions) -> LoadResult<Table> {
    Err(LoadError::FeatureDisabled {
        what: "URL loading",
        feature: "http",
    })
}

fn report(options: &LoadOptions, ctx: &LoadContext, result: &LoadResult<Table>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(table) => obs.on_success(
            ctx,
            LoadStats {
                rows: table.row_count(),
                columns: table.column_count(),
            },
        ),
        Err(e) => {
            let sev = LoadSeverity::for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn load_excel_dispatch(path: &Path, sel: &SheetSelection) -> LoadResult<Table> {
    let _ = (path, sel);

    #[cfg(feature = "excel")]
    {
        let mut workbook = calamine::open_workbook_auto(path)?;
        super::excel::read_selection(&mut workbook, sel)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(LoadError::FeatureDisabled {
            what: "workbook loading",
            feature: "excel",
        })
    }
}

#[cfg(feature = "http")]
fn load_excel_bytes_dispatch(bytes: Vec<u8>, sel: &SheetSelection) -> LoadResult<Table> {
    let _ = (&bytes, sel);

    #[cfg(feature = "excel")]
    {
        super::excel::load_excel_from_bytes(bytes, sel)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(LoadError::FeatureDisabled {
            what: "workbook loading",
            feature: "excel",
        })
    }
}

/// An owned source (path or URL) + options pair that can be run later.
#[derive(Clone)]
pub struct LoadRequest {
    /// Local path or `http(s)://` URL.
    pub source: String,
    /// Options controlling the load.
    pub options: LoadOptions,
}

impl fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRequest")
            .field("source", &self.source)
            .field("options", &self.options)
            .finish()
    }
}

impl LoadRequest {
    pub fn new(source: impl Into<String>, options: LoadOptions) -> Self {
        Self {
            source: source.into(),
            options,
        }
    }

    /// Execute the request by calling [`load_from_source`].
    pub fn run(&self) -> LoadResult<Table> {
        load_from_source(&self.source, &self.options)
    }
}
