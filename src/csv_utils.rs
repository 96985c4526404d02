//! Shared CSV utilities
//!
//! Portal B exports and the region reference are semicolon-delimited CSV
//! with a header row. [`read_csv`] decodes a whole payload into a
//! [`CsvTable`]; parsers then look fields up by column name.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{DecodeError, EtlError};
use crate::transport::{HttpGet, Transport};

/// Decoded CSV payload: header row plus data records
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

impl CsvTable {
    /// Check that every named column is present in the header
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), DecodeError> {
        for col in columns {
            if !self.headers.iter().any(|h| h == *col) {
                return Err(DecodeError::MissingColumn(col.to_string()));
            }
        }
        Ok(())
    }
}

/// Helper to get field value by column name from CSV record
///
/// # Arguments
///
/// * `record` - CSV record (row)
/// * `headers` - CSV header row
/// * `field_name` - Column name to look up
///
/// # Returns
///
/// * `Ok(&str)` - Field value
/// * `Err(DecodeError::MissingColumn)` - Column not found
///
/// # Example
///
/// ```rust
/// use csv::StringRecord;
/// use energo_reports::csv_utils::get_field;
///
/// let headers = StringRecord::from(vec!["date", "hour", "Pbst"]);
/// let record = StringRecord::from(vec!["01.10.2018 0:00:00", "0", "12,5"]);
///
/// let value = get_field(&record, &headers, "Pbst").unwrap();
/// assert_eq!(value, "12,5");
/// ```
pub fn get_field<'a>(
    record: &'a StringRecord,
    headers: &StringRecord,
    field_name: &str,
) -> Result<&'a str, DecodeError> {
    let idx = headers
        .iter()
        .position(|h| h == field_name)
        .ok_or_else(|| DecodeError::MissingColumn(field_name.to_string()))?;

    record
        .get(idx)
        .ok_or_else(|| DecodeError::MissingColumn(field_name.to_string()))
}

/// Decode a semicolon-delimited CSV payload
///
/// Invalid UTF-8 sequences are replaced rather than rejected; column names
/// are ASCII and only numeric and identifier fields are consumed.
pub fn read_csv(bytes: &[u8]) -> Result<CsvTable, DecodeError> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DecodeError::CsvFormat(format!("Failed to read CSV headers: {}", e)))?
        .clone();

    if headers.is_empty() {
        return Err(DecodeError::CsvFormat("Empty CSV payload".to_string()));
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| DecodeError::CsvFormat(format!("CSV parse error: {}", e)))?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        records.push(record);
    }

    Ok(CsvTable { headers, records })
}

/// Fetch a CSV export and decode it
pub fn open_csv<C: HttpGet>(transport: &Transport<C>, url: &str) -> Result<CsvTable, EtlError> {
    let bytes = transport.fetch(url)?;
    Ok(read_csv(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_field_success() {
        let headers = StringRecord::from(vec!["col1", "col2", "col3"]);
        let record = StringRecord::from(vec!["a", "b", "c"]);

        assert_eq!(get_field(&record, &headers, "col1").unwrap(), "a");
        assert_eq!(get_field(&record, &headers, "col3").unwrap(), "c");
    }

    #[test]
    fn test_get_field_missing_column() {
        let headers = StringRecord::from(vec!["col1", "col2"]);
        let record = StringRecord::from(vec!["a", "b"]);

        assert!(get_field(&record, &headers, "col3").is_err());
    }

    #[test]
    fn test_get_field_short_record() {
        let headers = StringRecord::from(vec!["col1", "col2"]);
        let record = StringRecord::from(vec!["a"]);

        assert_eq!(
            get_field(&record, &headers, "col2"),
            Err(DecodeError::MissingColumn("col2".to_string()))
        );
    }

    #[test]
    fn test_read_csv_semicolon_with_comma_decimals() {
        let table = read_csv(b"date;hour;Pbst\n01.10.2018 0:00:00;0;12,5\n01.10.2018 0:00:00;1;13,0\n")
            .unwrap();

        assert_eq!(table.records.len(), 2);
        assert_eq!(get_field(&table.records[0], &table.headers, "Pbst").unwrap(), "12,5");
    }

    #[test]
    fn test_read_csv_skips_blank_lines_and_bom() {
        let table = read_csv("\u{feff}a;b\n1;2\n;\n".as_bytes()).unwrap();
        assert_eq!(table.headers.get(0), Some("a"));
        assert_eq!(table.records.len(), 1);
    }

    #[test]
    fn test_read_csv_empty_payload() {
        assert!(matches!(read_csv(b""), Err(DecodeError::CsvFormat(_))));
    }

    #[test]
    fn test_require_columns() {
        let table = read_csv(b"a;b\n1;2\n").unwrap();
        assert!(table.require_columns(&["a", "b"]).is_ok());
        assert_eq!(
            table.require_columns(&["a", "c"]),
            Err(DecodeError::MissingColumn("c".to_string()))
        );
    }
}
