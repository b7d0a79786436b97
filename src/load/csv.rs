//! CSV loading implementation.

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::{Table, Value};

use super::header::normalize_headers;

/// Load a CSV file into an in-memory [`Table`].
///
/// Rules:
///
/// - The first record is the header (see [`normalize_headers`]); a file without one is
///   [`LoadError::NoHeader`].
/// - Records may be shorter or longer than the header; missing cells read as null and extra
///   cells are dropped.
/// - Records whose cells are all empty are skipped.
/// - Each cell is typed by [`parse_cell`].
pub fn load_csv_from_path(path: impl AsRef<Path>) -> LoadResult<Table> {
    let path = path.as_ref();
    let mut rdr = reader_builder().from_path(path)?;
    read_table(&mut rdr, || path.display().to_string())
}

/// Load CSV data held in memory (e.g. a downloaded file).
pub fn load_csv_from_bytes(bytes: &[u8]) -> LoadResult<Table> {
    let mut rdr = reader_builder().from_reader(bytes);
    read_table(&mut rdr, || "downloaded csv".to_string())
}

/// Load CSV data from an existing CSV reader.
///
/// The reader should be built with `has_headers(true)`; use `flexible(true)` to accept ragged
/// records.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> LoadResult<Table> {
    read_table(rdr, || "csv input".to_string())
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

fn read_table<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    source_name: impl FnOnce() -> String,
) -> LoadResult<Table> {
    let header = rdr.headers()?;
    if header.is_empty() {
        return Err(LoadError::NoHeader {
            source_name: source_name(),
        });
    }
    let columns = normalize_headers(header.iter());
    let width = columns.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row: Vec<Value> = (0..width)
            .map(|idx| parse_cell(record.get(idx).unwrap_or("")))
            .collect();
        rows.push(row);
    }

    Ok(Table::new(columns, rows))
}

/// Infer a typed [`Value`] from raw CSV text.
///
/// Empty text is null; integers, floats and `TRUE`/`FALSE` (any case) are typed; anything else is
/// kept verbatim as a string.
pub fn parse_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }

    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Value::Int64(v);
    }
    if let Some(v) = parse_number(trimmed) {
        return Value::Float64(v);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::Utf8(raw.to_owned())
}

fn parse_number(s: &str) -> Option<f64> {
    // `f64::from_str` also accepts "inf"/"NaN"; spreadsheets treat those as text.
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
