//! CSV output of normalized tables

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::EtlError;
use crate::table::Table;

/// Write a table as comma-delimited CSV with a header row
///
/// Decimals always use `.`; dates are `YYYY-MM-DD`; nulls are empty fields.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), EtlError> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(table.columns()).map_err(output_error)?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|value| value.render()))
            .map_err(output_error)?;
    }
    writer.flush().map_err(|e| EtlError::Output(e.to_string()))?;
    Ok(())
}

/// Write a table to a CSV file, replacing it if it exists
pub fn write_csv_path(table: &Table, path: &Path) -> Result<(), EtlError> {
    let file = File::create(path)
        .map_err(|e| EtlError::Output(format!("Failed to create {}: {}", path.display(), e)))?;
    write_csv(table, file)
}

fn output_error(err: csv::Error) -> EtlError {
    EtlError::Output(err.to_string())
}
