#![cfg(feature = "excel")]

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::error::{LoadError, LoadResult};
use crate::types::{Table, Value};

use super::header::normalize_headers;
use super::unified::SheetSelection;

/// Load one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into an in-memory [`Table`].
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Uses the first non-empty row as the header row
/// - Skips blank rows and converts cells into [`Value`]s
pub fn load_excel_from_path(path: impl AsRef<Path>, sheet_name: Option<&str>) -> LoadResult<Table> {
    let mut workbook = open_workbook_auto(path)?;
    read_sheet(&mut workbook, sheet_name)
}

/// Load several sheets of a workbook and concatenate all rows into one [`Table`].
///
/// - If `sheet_names` is `None`, loads **all sheets** in workbook order.
/// - If `sheet_names` is `Some(&[...])`, loads only those sheets (in the provided order).
///
/// Every sheet must have the same header as the first one.
pub fn load_excel_workbook_from_path(
    path: impl AsRef<Path>,
    sheet_names: Option<&[&str]>,
) -> LoadResult<Table> {
    let mut workbook = open_workbook_auto(path)?;
    read_sheets(&mut workbook, sheet_names)
}

/// Load a workbook held in memory (e.g. a downloaded file). The container format is detected
/// from the bytes.
pub fn load_excel_from_bytes(bytes: Vec<u8>, selection: &SheetSelection) -> LoadResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    read_selection(&mut workbook, selection)
}

pub(crate) fn read_selection<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    selection: &SheetSelection,
) -> LoadResult<Table> {
    match selection {
        SheetSelection::First => read_sheet(workbook, None),
        SheetSelection::Sheet(name) => read_sheet(workbook, Some(name.as_str())),
        SheetSelection::AllSheets => read_sheets(workbook, None),
        SheetSelection::Sheets(names) => {
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            read_sheets(workbook, Some(refs.as_slice()))
        }
    }
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet_name: Option<&str>,
) -> LoadResult<Table> {
    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoadError::NoSheets)?,
    };
    let range = workbook.worksheet_range(&sheet)?;
    load_sheet_range(&sheet, &range)
}

fn read_sheets<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet_names: Option<&[&str]>,
) -> LoadResult<Table> {
    let sheets: Vec<String> = match sheet_names {
        Some(names) => names.iter().map(|s| s.to_string()).collect(),
        None => workbook.sheet_names().to_vec(),
    };
    if sheets.is_empty() {
        return Err(LoadError::NoSheets);
    }

    let mut out: Option<Table> = None;
    for sheet in sheets {
        let range = workbook.worksheet_range(&sheet)?;
        let mut table = load_sheet_range(&sheet, &range)?;
        match out.as_mut() {
            None => out = Some(table),
            Some(acc) if acc.columns == table.columns => acc.rows.append(&mut table.rows),
            Some(acc) => {
                return Err(LoadError::HeaderMismatch {
                    sheet,
                    expected: acc.columns.clone(),
                    found: table.columns,
                });
            }
        }
    }

    out.ok_or(LoadError::NoSheets)
}

fn load_sheet_range(sheet: &str, range: &Range<Data>) -> LoadResult<Table> {
    let mut rows_iter = range
        .rows()
        .filter(|row| row.iter().any(|c| !is_blank(c)));

    let header = rows_iter.next().ok_or_else(|| LoadError::NoHeader {
        source_name: format!("sheet '{sheet}'"),
    })?;
    let columns = normalize_headers(header.iter().map(cell_to_header_string));
    let width = columns.len();

    let rows = rows_iter
        .map(|row| {
            (0..width)
                .map(|idx| convert_cell(row.get(idx).unwrap_or(&Data::Empty)))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn is_blank(c: &Data) -> bool {
    match c {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

fn cell_to_header_string(c: &Data) -> String {
    if is_blank(c) {
        return String::new();
    }
    convert_cell(c).to_string()
}

/// Convert a workbook cell into a [`Value`].
///
/// Date-time cells keep their serial number, matching what the sheet stores.
fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::Float64(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(_) => Value::Utf8(c.to_string()),
    }
}
