//! Stub portals for driver tests
//!
//! The ATS stub answers every index request with one archive link naming
//! the report (`?file=<rname>&zip=1`) and serves each archive as a ZIP
//! holding a JSON-encoded workbook.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::time::Duration;

use energo_reports::workbook::unzip_single_entry;
use energo_reports::{AtsPortal, Cell, DecodeError, HttpGet, RegionReference, Sheet, Transport, Workbook};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const ATS_BASE: &str = "https://ats.test";

pub fn zip_json(workbook: &Workbook) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("report.xls", SimpleFileOptions::default())
        .unwrap();
    writer
        .write_all(&serde_json::to_vec(workbook).unwrap())
        .unwrap();
    writer.finish().unwrap().into_inner()
}

/// Unzip, then read the entry as a JSON workbook
pub fn zipped_json_decoder(bytes: Vec<u8>) -> Result<Workbook, DecodeError> {
    let entry = unzip_single_entry(bytes)?;
    serde_json::from_slice(&entry).map_err(|e| DecodeError::InvalidWorkbook(e.to_string()))
}

#[derive(Default)]
pub struct AtsStub {
    /// Archives by report type; a report without an archive gets an empty index page
    pub archives: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<String>>,
}

impl AtsStub {
    pub fn with_report(mut self, report_type: &str, workbook: &Workbook) -> Self {
        self.archives
            .insert(report_type.to_string(), zip_json(workbook));
        self
    }

    pub fn index_requests(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .filter(|url| url.contains("access=public"))
            .cloned()
            .collect()
    }
}

fn query_value<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let query = url.split_once('?')?.1;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

impl HttpGet for AtsStub {
    fn get(&self, url: &str) -> Result<Vec<u8>, String> {
        self.requests.borrow_mut().push(url.to_string());

        if url.contains("access=public") {
            let rname = query_value(url, "rname").unwrap_or_default();
            let page = if self.archives.contains_key(rname) {
                format!(
                    r#"<html><body><a href="?file={}&amp;zip=1">archive</a></body></html>"#,
                    rname
                )
            } else {
                "<html><body>Нет данных</body></html>".to_string()
            };
            return Ok(page.into_bytes());
        }

        let file = query_value(url, "file").ok_or_else(|| format!("unexpected url {}", url))?;
        self.archives
            .get(file)
            .cloned()
            .ok_or_else(|| format!("404 {}", url))
    }
}

pub fn regions() -> RegionReference {
    RegionReference::from_pairs([(77, "Москва"), (54, "Новосибирская область")])
}

pub fn ats_portal(stub: &AtsStub) -> AtsPortal<&AtsStub> {
    AtsPortal::new(
        Transport::new(stub).with_retry(2, Duration::ZERO),
        regions(),
        ATS_BASE,
    )
    .with_decoder(zipped_json_decoder)
}

pub fn n(v: f64) -> Cell {
    Cell::Number(v)
}

pub fn t(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

/// Sheet with `header_rows` title rows followed by `data`
pub fn sheet(name: &str, header_rows: usize, data: Vec<Vec<Cell>>) -> Sheet {
    let mut rows = vec![vec![t("Заголовок")]; header_rows];
    rows.extend(data);
    Sheet::new(name, rows)
}
