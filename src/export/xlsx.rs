#![cfg(feature = "excel")]

//! XLSX export.

use std::path::Path;

use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet};

use crate::error::{ExportError, ExportResult};
use crate::types::{Table, Value};

/// Build an in-memory workbook holding `table` on a single worksheet named `sheet_name`.
///
/// The header row is written as strings. Numbers and booleans keep their cell types; absent cells
/// are written as the string `NULL`. Worksheet numbers are `f64`, so integers beyond ±2^53 are
/// written as text to keep every digit.
pub fn build_workbook(table: &Table, sheet_name: &str) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (idx, column) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_num(idx)?, column.as_str())?;
    }

    let normalized = table.normalized();
    for (r, row) in normalized.rows.iter().enumerate() {
        let excel_row = row_num(r + 1)?;
        for (c, value) in row.iter().enumerate() {
            write_value(worksheet, excel_row, col_num(c)?, value)?;
        }
    }

    Ok(workbook)
}

/// Serialize `table` to XLSX bytes.
pub fn xlsx_bytes(table: &Table, sheet_name: &str) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(table, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write `table` as an XLSX file at `path`, replacing any existing file.
pub fn export_xlsx_to_path(
    table: &Table,
    path: impl AsRef<Path>,
    sheet_name: &str,
) -> ExportResult<()> {
    let mut workbook = build_workbook(table, sheet_name)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Largest integer magnitude an `f64` cell holds exactly.
const MAX_EXACT_INT: u64 = 1 << 53;

fn write_value(ws: &mut Worksheet, row: RowNum, col: ColNum, value: &Value) -> ExportResult<()> {
    match value {
        Value::Int64(v) if v.unsigned_abs() <= MAX_EXACT_INT => {
            ws.write_number(row, col, *v as f64)?
        }
        Value::Int64(v) => ws.write_string(row, col, v.to_string())?,
        Value::Float64(v) => ws.write_number(row, col, *v)?,
        Value::Bool(b) => ws.write_boolean(row, col, *b)?,
        other => ws.write_string(row, col, other.to_string())?,
    };
    Ok(())
}

fn row_num(idx: usize) -> ExportResult<RowNum> {
    RowNum::try_from(idx).map_err(|_| ExportError::TooLarge {
        message: format!("row {idx} exceeds the worksheet row limit"),
    })
}

fn col_num(idx: usize) -> ExportResult<ColNum> {
    ColNum::try_from(idx).map_err(|_| ExportError::TooLarge {
        message: format!("column {idx} exceeds the worksheet column limit"),
    })
}
