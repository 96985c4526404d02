//! Error types for the report pipeline
//!
//! Covers every failure mode of a download run:
//! - Transport exhaustion (5 failed attempts for one URL)
//! - Missing download links on a portal index page
//! - Archive, workbook and CSV decoding errors (layout and locale issues)
//! - Region names absent from the reference table

use std::fmt;

/// Top-level error type for report downloads
///
/// Any variant aborts the enclosing driver call; no accumulated rows are returned.
#[derive(Debug)]
pub enum EtlError {
    /// Transport failed every attempt for one URL
    FetchExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },

    /// Index page yielded zero download links for a period/zone
    NoLinksFound {
        report_type: String,
        date: String,
        zone: String,
    },

    /// Archive, workbook or CSV content is malformed
    Decode(DecodeError),

    /// Region display name has no entry in the reference table
    Resolution(ResolutionError),

    /// Invalid configuration, date range or reference file
    Config(String),

    /// Failed to write a result table
    Output(String),
}

impl fmt::Display for EtlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtlError::FetchExhausted {
                url,
                attempts,
                last_error,
            } => write!(
                f,
                "Failed to fetch {} after {} attempts: {}",
                url, attempts, last_error
            ),
            EtlError::NoLinksFound {
                report_type,
                date,
                zone,
            } => write!(
                f,
                "No download links for report '{}' on {} (zone '{}')",
                report_type, date, zone
            ),
            EtlError::Decode(e) => write!(f, "Decode error: {}", e),
            EtlError::Resolution(e) => write!(f, "Resolution error: {}", e),
            EtlError::Config(msg) => write!(f, "Configuration error: {}", msg),
            EtlError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for EtlError {}

impl From<DecodeError> for EtlError {
    fn from(err: DecodeError) -> Self {
        EtlError::Decode(err)
    }
}

impl From<ResolutionError> for EtlError {
    fn from(err: ResolutionError) -> Self {
        EtlError::Resolution(err)
    }
}

/// Archive, workbook and CSV decoding errors
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// ZIP archive contains no entries
    EmptyArchive,

    /// Bytes are not a readable ZIP archive
    InvalidArchive(String),

    /// Archive entry is not a readable legacy workbook
    InvalidWorkbook(String),

    /// Workbook has no sheet at the expected position
    MissingSheet(usize),

    /// Hourly sheet name is not an hour number
    ///
    /// Example: "Лист1" where "0".."23" is expected
    InvalidSheetName(String),

    /// Cell content does not fit the expected column type
    InvalidCell {
        sheet: String,
        row: usize,
        col: usize,
        value: String,
    },

    /// Failed to parse a decimal (comma or period separator)
    ///
    /// Example: "12,5a"
    InvalidDecimal(String),

    /// Failed to parse a date
    ///
    /// Example: "32.10.2018"
    InvalidDate(String),

    /// Required CSV column is missing
    ///
    /// Example: Missing "INTERVAL" column in a GenConsum export
    MissingColumn(String),

    /// CSV format error (wrong delimiter, malformed row)
    CsvFormat(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::EmptyArchive => write!(f, "Archive contains no entries"),
            DecodeError::InvalidArchive(msg) => write!(f, "Invalid ZIP archive: {}", msg),
            DecodeError::InvalidWorkbook(msg) => write!(f, "Invalid workbook: {}", msg),
            DecodeError::MissingSheet(idx) => write!(f, "Workbook has no sheet #{}", idx),
            DecodeError::InvalidSheetName(name) => {
                write!(f, "Invalid sheet name: '{}' (expected hour number)", name)
            }
            DecodeError::InvalidCell {
                sheet,
                row,
                col,
                value,
            } => write!(
                f,
                "Invalid cell value '{}' at sheet '{}', row {}, column {}",
                value, sheet, row, col
            ),
            DecodeError::InvalidDecimal(val) => write!(f, "Invalid decimal format: '{}'", val),
            DecodeError::InvalidDate(val) => write!(f, "Invalid date format: '{}'", val),
            DecodeError::MissingColumn(col) => write!(f, "Missing required column: '{}'", col),
            DecodeError::CsvFormat(msg) => write!(f, "CSV format error: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Region name resolution error
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionError {
    /// Display name as found in the source data
    pub name: String,
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown region name: '{}'", self.name)
    }
}

impl std::error::Error for ResolutionError {}
