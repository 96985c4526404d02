//! Energo Reports - batch ETL for Russian wholesale electricity market reports
//!
//! Downloads published reports from two portals and normalizes them into
//! tables keyed by date, hour and region/node identifiers:
//!
//! - **ATS** (trading system administrator): per-day or per-month ZIP archives
//!   holding one legacy `.xls` workbook, discovered through an HTML index page
//!   per (report, date, price zone)
//! - **SO UPS** (system operator): one semicolon-delimited CSV export per day
//!
//! # Features
//! - Fixed-interval retrying transport (5 attempts, 1 second apart by default)
//! - Layout decoders for eight ATS reports and three SO UPS exports
//! - Russian locale handling (comma decimals, `DD.MM.YYYY` dates)
//! - Region name → identifier resolution against a static reference table
//! - Combined region report joining trade, block-station and section data
//!
//! # Architecture
//! ```text
//! RegionReference ─┐
//! Transport ───────┼─> links / workbook / csv_utils
//!                  ├─> ats_parsers / so_parsers
//!                  ├─> ats_reports / so_reports (drivers)
//!                  └─> composite (RegionTotalReport)
//! ```
//!
//! Everything runs single-threaded and blocking; any failure aborts the
//! whole request.

pub mod ats_parsers;
pub mod ats_reports;
pub mod composite;
pub mod config;
pub mod csv_utils;
mod error;
pub mod links;
pub mod output;
pub mod periods;
pub mod regions;
pub mod so_parsers;
pub mod so_reports;
pub mod table;
pub mod transformations;
pub mod transport;
pub mod types;
pub mod types_so;
pub mod workbook;

// Re-export public types for easier access
pub use ats_reports::{AtsPortal, AtsReport, AtsReportKind};
pub use composite::{RegionTotalReport, RegionTotalResult};
pub use config::PortalConfig;
pub use error::{DecodeError, EtlError, ResolutionError};
pub use links::PriceZone;
pub use periods::Granularity;
pub use regions::RegionReference;
pub use so_reports::{SoPortal, SoReport, SoReportKind};
pub use table::{Table, TableRow, Value};
pub use transport::{HttpGet, ReqwestClient, Transport};
pub use workbook::{Cell, Sheet, Workbook};
