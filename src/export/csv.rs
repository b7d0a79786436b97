//! CSV export.

use std::io;
use std::path::Path;

use crate::error::ExportResult;
use crate::types::Table;

/// Write `table` as CSV to any writer: a header row, then one record per row.
///
/// Absent cells are written as `NULL`.
pub fn write_csv<W: io::Write>(table: &Table, writer: W) -> ExportResult<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&table.columns)?;

    let normalized = table.normalized();
    for row in &normalized.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `table` as a CSV file at `path`, replacing any existing file.
pub fn export_csv_to_path(table: &Table, path: impl AsRef<Path>) -> ExportResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, io::BufWriter::new(file))
}
