//! Region reference: display name → numeric region identifier
//!
//! Loaded once from a semicolon-delimited table with `region_pk` and
//! `region_name` columns, then consulted read-only by every parser that
//! meets region names in source data.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::csv_utils::{get_field, read_csv};
use crate::error::{DecodeError, EtlError, ResolutionError};
use crate::transformations::parse_integer;

/// Static region reference set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionReference {
    by_name: HashMap<String, i64>,
    by_id: BTreeMap<i64, String>,
}

impl RegionReference {
    /// Build a reference from `(id, name)` pairs
    ///
    /// # Example
    ///
    /// ```
    /// # use energo_reports::RegionReference;
    /// let regions = RegionReference::from_pairs([(77, "Москва"), (78, "Санкт-Петербург")]);
    /// assert_eq!(regions.resolve("Москва").unwrap(), 77);
    /// assert!(regions.resolve("Атлантида").is_err());
    /// ```
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (i64, &'a str)>) -> Self {
        let mut reference = Self::default();
        for (id, name) in pairs {
            reference.insert(id, name);
        }
        reference
    }

    fn insert(&mut self, id: i64, name: &str) {
        let name = name.trim().to_string();
        self.by_name.insert(name.clone(), id);
        self.by_id.insert(id, name);
    }

    /// Parse the reference table from a reader
    ///
    /// The table must be UTF-8. Extra columns are ignored; rows with an
    /// empty name are skipped.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, EtlError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| EtlError::Config(format!("Failed to read region reference: {}", e)))?;
        std::str::from_utf8(&bytes).map_err(|e| {
            EtlError::Config(format!("Region reference is not valid UTF-8: {}", e))
        })?;

        let table = read_csv(&bytes)?;
        table.require_columns(&["region_pk", "region_name"])?;

        let mut reference = Self::default();
        for record in &table.records {
            let name = get_field(record, &table.headers, "region_name")?;
            if name.trim().is_empty() {
                continue;
            }
            let pk = get_field(record, &table.headers, "region_pk")?;
            let id = parse_integer(pk).map_err(|_| DecodeError::CsvFormat(format!(
                "Invalid region_pk '{}' for region '{}'",
                pk, name
            )))?;
            reference.insert(id, name);
        }

        Ok(reference)
    }

    /// Load the reference table from a file
    pub fn from_path(path: &Path) -> Result<Self, EtlError> {
        let file = File::open(path).map_err(|e| {
            EtlError::Config(format!(
                "Failed to open region reference {}: {}",
                path.display(),
                e
            ))
        })?;
        let reference = Self::from_reader(file)?;
        info!(path = %path.display(), regions = reference.len(), "Loaded region reference");
        Ok(reference)
    }

    /// Resolve a display name to its region identifier
    ///
    /// Surrounding whitespace is ignored; otherwise the match is exact.
    pub fn resolve(&self, name: &str) -> Result<i64, ResolutionError> {
        self.by_name
            .get(name.trim())
            .copied()
            .ok_or_else(|| ResolutionError {
                name: name.to_string(),
            })
    }

    /// Display name of a region identifier
    pub fn name(&self, id: i64) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
