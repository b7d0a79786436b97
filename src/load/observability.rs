use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info};

use crate::error::LoadError;

use super::unified::{SheetSelection, SourceFormat};

/// How bad a load failure is; compared against [`super::LoadOptions::alert_at_or_above`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// The source was read but could not be turned into a table.
    Error,
    /// The source could not be read at all (missing file, network failure).
    Critical,
}

impl LoadSeverity {
    /// Classify a load failure.
    pub fn for_error(e: &LoadError) -> Self {
        match e {
            LoadError::Io(_) => LoadSeverity::Critical,
            LoadError::Csv(err) if matches!(err.kind(), ::csv::ErrorKind::Io(_)) => {
                LoadSeverity::Critical
            }
            #[cfg(feature = "excel")]
            LoadError::Excel(err) if is_workbook_io(err) => LoadSeverity::Critical,
            #[cfg(feature = "http")]
            LoadError::Http(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        }
    }
}

/// calamine wraps I/O failures once per workbook format.
#[cfg(feature = "excel")]
fn is_workbook_io(err: &calamine::Error) -> bool {
    use calamine::{Error, OdsError, XlsError, XlsbError, XlsxError};

    matches!(
        err,
        Error::Io(_)
            | Error::Xlsx(XlsxError::Io(_))
            | Error::Xls(XlsError::Io(_))
            | Error::Xlsb(XlsbError::Io(_))
            | Error::Ods(OdsError::Io(_))
    )
}

impl fmt::Display for LoadSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadSeverity::Error => "error",
            LoadSeverity::Critical => "critical",
        })
    }
}

/// What was being loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContext {
    /// The path or URL, as given by the caller.
    pub source: String,
    /// Format used to read it.
    pub format: SourceFormat,
    /// Sheet(s) requested; `None` for CSV sources.
    pub sheet_selection: Option<SheetSelection>,
}

impl LoadContext {
    pub(crate) fn new(source: String, format: SourceFormat, selection: &SheetSelection) -> Self {
        let sheet_selection = match format {
            SourceFormat::Excel => Some(selection.clone()),
            SourceFormat::Csv => None,
        };
        Self {
            source,
            format,
            sheet_selection,
        }
    }

    /// The sheet selection as log text (`-` for CSV).
    pub fn sheet_label(&self) -> String {
        self.sheet_selection
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string)
    }
}

impl fmt::Display for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source={} format={} sheet={}",
            self.source,
            self.format,
            self.sheet_label()
        )
    }
}

/// Shape of a successfully loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub columns: usize,
}

/// Receives the outcome of every load.
pub trait LoadObserver: Send + Sync {
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &LoadError) {}

    /// Called after [`Self::on_failure`] when the severity meets the alert threshold.
    ///
    /// Defaults to doing nothing beyond the failure callback.
    fn on_alert(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &LoadError) {}
}

/// Forwards every callback to each observer in turn.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }

    pub fn push(&mut self, observer: Arc<dyn LoadObserver>) {
        self.observers.push(observer);
    }
}

impl FromIterator<Arc<dyn LoadObserver>> for CompositeObserver {
    fn from_iter<I: IntoIterator<Item = Arc<dyn LoadObserver>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.observers
            .iter()
            .for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.observers
            .iter()
            .for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Reports load events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        info!(
            source = %ctx.source,
            format = %ctx.format,
            sheet = %ctx.sheet_label(),
            rows = stats.rows,
            columns = stats.columns,
            "loaded table"
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        error!(
            %severity,
            source = %ctx.source,
            format = %ctx.format,
            sheet = %ctx.sheet_label(),
            %error,
            "failed to load table"
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        error!(alert = true, %severity, source = %ctx.source, "load alert");
    }
}

/// Appends one line per load event to a log file.
///
/// Lines read `<unix seconds> <event> source=… format=… sheet=… <detail>`, where `<event>` is
/// `ok`, `fail` or `ALERT`. The file is opened on first use and kept open. A log that cannot be
/// opened or written is skipped; loading itself is never affected.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: &str, ctx: &LoadContext, detail: fmt::Arguments<'_>) {
        let Ok(mut slot) = self.file.lock() else {
            return;
        };
        if slot.is_none() {
            *slot = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .ok();
        }
        if let Some(file) = slot.as_mut() {
            let _ = writeln!(file, "{} {event} {ctx} {detail}", unix_seconds());
        }
    }
}

impl LoadObserver for FileObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.record(
            "ok",
            ctx,
            format_args!("rows={} columns={}", stats.rows, stats.columns),
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.record(
            "fail",
            ctx,
            format_args!("severity={severity} error=\"{error}\""),
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.record("ALERT", ctx, format_args!("severity={severity}"));
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
