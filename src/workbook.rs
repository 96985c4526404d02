//! In-memory workbook model and decoders
//!
//! ATS publishes every report as a ZIP archive holding exactly one legacy
//! `.xls` workbook. The archive is unpacked in memory and the workbook is
//! decoded with `calamine` into a dense grid of [`Cell`]s.
//!
//! The grid is always anchored at row 0 / column 0, so the fixed header
//! offsets of each report layout (row 3, 5, 6, 7, 8) can be used as-is even
//! when the leading rows of a sheet are empty.

use std::io::{Cursor, Read};

use calamine::{Data, Range, Reader, Xls};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zip::ZipArchive;

use crate::error::DecodeError;

static EMPTY: Cell = Cell::Empty;

/// One decoded worksheet cell
///
/// Serialized untagged, so JSON fixtures read naturally:
/// `[1001, "Москва", null, "12,5"]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// `true` for empty cells and whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }

    /// Text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            _ => Cell::Empty,
        }
    }
}

/// One worksheet as a dense, zero-anchored grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Build a zero-anchored sheet from a calamine range
    ///
    /// calamine ranges start at the first used cell; the missing leading rows
    /// and columns are filled with [`Cell::Empty`].
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let (first_row, first_col) = range.start().unwrap_or((0, 0));

        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); first_row as usize];
        for raw in range.rows() {
            let mut cells = vec![Cell::Empty; first_col as usize];
            cells.extend(raw.iter().map(Cell::from));
            rows.push(cells);
        }

        Self::new(name, rows)
    }

    /// Number of rows, including leading empty ones
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, col), or [`Cell::Empty`] outside the used area
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }
}

/// A decoded workbook
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Sheet by position
    pub fn sheet(&self, index: usize) -> Result<&Sheet, DecodeError> {
        self.sheets
            .get(index)
            .ok_or(DecodeError::MissingSheet(index))
    }

    /// Decode a legacy `.xls` workbook held in memory
    pub fn from_xls_bytes(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let mut xls: Xls<_> = Xls::new(Cursor::new(bytes))
            .map_err(|e| DecodeError::InvalidWorkbook(e.to_string()))?;

        let names = xls.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = xls
                .worksheet_range(&name)
                .map_err(|e| DecodeError::InvalidWorkbook(format!("sheet '{}': {}", name, e)))?;
            sheets.push(Sheet::from_range(name, &range));
        }

        Ok(Self::new(sheets))
    }
}

/// Extract the first entry of a ZIP archive
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - Uncompressed bytes of the first entry
/// * `Err(DecodeError::EmptyArchive)` - Archive has zero entries
/// * `Err(DecodeError::InvalidArchive)` - Bytes are not a ZIP archive
pub fn unzip_single_entry(bytes: Vec<u8>) -> Result<Vec<u8>, DecodeError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DecodeError::InvalidArchive(e.to_string()))?;

    if archive.len() == 0 {
        return Err(DecodeError::EmptyArchive);
    }

    let mut entry = archive
        .by_index(0)
        .map_err(|e| DecodeError::InvalidArchive(e.to_string()))?;
    debug!(entry = entry.name(), size = entry.size(), "Unpacking archive entry");

    let mut contents = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut contents)
        .map_err(|e| DecodeError::InvalidArchive(e.to_string()))?;

    Ok(contents)
}

/// Unpack a single-entry archive and decode the entry as a legacy workbook
pub fn decode_archived_workbook(bytes: Vec<u8>) -> Result<Workbook, DecodeError> {
    let contents = unzip_single_entry(bytes)?;
    Workbook::from_xls_bytes(contents)
}
