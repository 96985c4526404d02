//! Value transformations shared by all report parsers
//!
//! Both portals publish numbers in Russian locale and mix typed workbook cells
//! with text. These helpers normalize the raw values into typed columns:
//!
//! 1. **Decimal normalization**: `"12,5"` → `12.5` (comma or period separator)
//! 2. **Blank handling**: `""` / `" "` → `None`
//! 3. **Integer columns**: `1234.0` → `1234` (identifiers arrive as floats)
//! 4. **Hour sheet names**: `"13"` → `13`
//! 5. **Date parsing**: `"01.10.2018 0:00:00"`, `"2018-10-01"`, Excel serials
//! 6. **Territory remapping**: SO UPS territory codes → OES identifiers
//!
//! # Example
//!
//! ```rust
//! use energo_reports::transformations::*;
//!
//! assert_eq!(parse_decimal("12,5").unwrap(), 12.5);
//! assert_eq!(parse_optional_decimal(" ").unwrap(), None);
//! assert_eq!(territory_to_oes(530000), 1);
//! ```

use chrono::{Duration, NaiveDate};

use crate::error::DecodeError;
use crate::workbook::Cell;

/// Excel serial day zero (1900 date system, including the Lotus leap-year bug)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

// ============================================================================
// Decimals
// ============================================================================

/// Parse a decimal written with either comma or period as separator
///
/// Spaces (including non-breaking spaces used as thousands separators) are removed
/// before parsing, so `"1 234,5"` parses as `1234.5`.
///
/// # Examples
///
/// ```
/// # use energo_reports::transformations::parse_decimal;
/// assert_eq!(parse_decimal("12,5").unwrap(), 12.5);
/// assert_eq!(parse_decimal("12.5").unwrap(), 12.5);
/// assert_eq!(parse_decimal("-0,75").unwrap(), -0.75);
/// assert!(parse_decimal("").is_err());
/// assert!(parse_decimal("abc").is_err());
/// ```
pub fn parse_decimal(value: &str) -> Result<f64, DecodeError> {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if compact.is_empty() {
        return Err(DecodeError::InvalidDecimal(value.to_string()));
    }

    compact
        .parse::<f64>()
        .map_err(|_| DecodeError::InvalidDecimal(value.to_string()))
}

/// Parse a decimal where blank text means "no value"
///
/// # Examples
///
/// ```
/// # use energo_reports::transformations::parse_optional_decimal;
/// assert_eq!(parse_optional_decimal("").unwrap(), None);
/// assert_eq!(parse_optional_decimal("  ").unwrap(), None);
/// assert_eq!(parse_optional_decimal("3,25").unwrap(), Some(3.25));
/// ```
pub fn parse_optional_decimal(value: &str) -> Result<Option<f64>, DecodeError> {
    if is_blank(value) {
        return Ok(None);
    }
    parse_decimal(value).map(Some)
}

/// `true` for empty strings and strings made only of whitespace
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ============================================================================
// Integers
// ============================================================================

/// Convert an integer-valued float to `i64`
///
/// Workbook cells store identifiers as floats (`1234.0`). Anything with a
/// fractional part, or outside the `i64` range, is rejected.
pub fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(value as i64)
    } else {
        None
    }
}

/// Parse integer text, tolerating a trailing `,0` / `.0`
pub fn parse_integer(value: &str) -> Result<i64, DecodeError> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    let parsed = parse_decimal(trimmed)?;
    integral(parsed).ok_or_else(|| DecodeError::InvalidDecimal(value.to_string()))
}

// ============================================================================
// Cells
// ============================================================================

/// Read a workbook cell as an optional float
///
/// Blank cells give `None`; text cells go through [`parse_decimal`].
pub fn cell_to_f64(cell: &Cell) -> Result<Option<f64>, DecodeError> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(n) => Ok(Some(*n)),
        Cell::Text(s) => parse_optional_decimal(s),
    }
}

/// Read a workbook cell as an optional integer
pub fn cell_to_i64(cell: &Cell) -> Result<Option<i64>, DecodeError> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(n) => integral(*n)
            .map(Some)
            .ok_or_else(|| DecodeError::InvalidDecimal(n.to_string())),
        Cell::Text(s) if is_blank(s) => Ok(None),
        Cell::Text(s) => parse_integer(s).map(Some),
    }
}

/// Read a workbook cell as a date
///
/// Numeric cells are Excel serial dates; text cells go through [`parse_report_date`].
pub fn cell_to_date(cell: &Cell) -> Result<NaiveDate, DecodeError> {
    match cell {
        Cell::Number(serial) => excel_serial_to_date(*serial)
            .ok_or_else(|| DecodeError::InvalidDate(serial.to_string())),
        Cell::Text(s) => parse_report_date(s),
        Cell::Empty => Err(DecodeError::InvalidDate(String::new())),
    }
}

// ============================================================================
// Hours and Dates
// ============================================================================

/// Parse the hour number from an hourly sheet name
///
/// # Examples
///
/// ```
/// # use energo_reports::transformations::parse_hour_sheet_name;
/// assert_eq!(parse_hour_sheet_name("0").unwrap(), 0);
/// assert_eq!(parse_hour_sheet_name(" 23 ").unwrap(), 23);
/// assert!(parse_hour_sheet_name("Sheet1").is_err());
/// ```
pub fn parse_hour_sheet_name(name: &str) -> Result<u8, DecodeError> {
    name.trim()
        .parse::<u8>()
        .map_err(|_| DecodeError::InvalidSheetName(name.to_string()))
}

/// Parse a date as published by either portal
///
/// Accepts `DD.MM.YYYY` and `YYYY-MM-DD`, optionally followed by a time part
/// (`"01.10.2018 0:00:00"`, `"2018-10-01T00:00:00"`). The time part is discarded.
///
/// # Examples
///
/// ```
/// # use energo_reports::transformations::parse_report_date;
/// # use chrono::NaiveDate;
/// let expected = NaiveDate::from_ymd_opt(2018, 10, 1).unwrap();
/// assert_eq!(parse_report_date("01.10.2018 0:00:00").unwrap(), expected);
/// assert_eq!(parse_report_date("2018-10-01").unwrap(), expected);
/// assert!(parse_report_date("32.10.2018").is_err());
/// ```
pub fn parse_report_date(value: &str) -> Result<NaiveDate, DecodeError> {
    let date_part = value
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or_default();

    NaiveDate::parse_from_str(date_part, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y-%m-%d"))
        .map_err(|_| DecodeError::InvalidDate(value.to_string()))
}

/// Convert an Excel serial day number to a calendar date
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

// ============================================================================
// Territory Codes
// ============================================================================

/// Map an SO UPS territory code to its OES identifier
///
/// Codes outside the table pass through unchanged. OES 6 has no territory
/// code in the export and is never produced.
///
/// | territory | OES |
/// |-----------|-----|
/// | 530000 | 1 |
/// | 550000 | 2 |
/// | 600000 | 3 |
/// | 610000 | 4 |
/// | 630000 | 5 |
/// | 840000 | 7 |
pub fn territory_to_oes(code: i64) -> i64 {
    match code {
        530000 => 1,
        550000 => 2,
        600000 => 3,
        610000 => 4,
        630000 => 5,
        840000 => 7,
        other => other,
    }
}
