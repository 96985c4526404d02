//! SO UPS (portal B) report drivers
//!
//! One CSV export per day, fetched from
//! `{base}/Public/Export/Csv/<ReportName>.aspx?<query>`. The query depends
//! on the report: a date range with a territory list, or a single date.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::PortalConfig;
use crate::csv_utils::{open_csv, CsvTable};
use crate::error::{DecodeError, EtlError};
use crate::periods::{expand_periods, Granularity};
use crate::so_parsers;
use crate::table::{Table, TableRow};
use crate::transport::{HttpGet, ReqwestClient, Transport};
use crate::types_so::{BlockStationRow, ForecastConsumRow, GenConsumRow};

/// Territories requested from the `GenConsum` export
const GEN_CONSUM_TERRITORIES: &str = ":530000,:550000,:600000,:610000,:630000,:840000";

/// Connection to the SO UPS portal
pub struct SoPortal<C> {
    transport: Transport<C>,
    base_url: String,
}

impl SoPortal<ReqwestClient> {
    /// Portal over a `reqwest` client configured from `config`
    pub fn from_config(config: &PortalConfig) -> Result<Self, EtlError> {
        config.validate()?;
        let client = ReqwestClient::new(config.timeout())?;
        Ok(Self::new(
            Transport::from_config(client, config),
            config.so_base_url.clone(),
        ))
    }
}

impl<C: HttpGet> SoPortal<C> {
    pub fn new(transport: Transport<C>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Export URL of one report for one day
    pub fn report_url<R: SoReport>(&self, report: &R, date: NaiveDate) -> String {
        format!(
            "{}/Public/Export/Csv/{}.aspx?{}",
            self.base_url.trim_end_matches('/'),
            report.report_name(),
            report.query(date)
        )
    }

    /// Run a report for every day of `[start, end]`
    pub fn download<R: SoReport>(
        &self,
        report: &R,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<R::Row>, EtlError> {
        let report_name = report.report_name();
        let days = expand_periods(start, end, Granularity::Day)?;
        info!(report_name, days = days.len(), "Downloading SO report");

        let mut rows = Vec::new();
        for day in days {
            let url = self.report_url(report, day);
            let table = open_csv(&self.transport, &url)?;
            let decoded = report.decode(&table)?;
            debug!(report_name, %day, rows = decoded.len(), "Decoded export");
            rows.extend(decoded);
        }

        info!(report_name, rows = rows.len(), "SO report downloaded");
        Ok(rows)
    }
}

/// One SO UPS CSV export
pub trait SoReport {
    type Row: TableRow;

    /// Export name, the `<ReportName>` part of the URL
    fn report_name(&self) -> &'static str;

    /// Query string for one day
    fn query(&self, date: NaiveDate) -> String;

    fn decode(&self, table: &CsvTable) -> Result<Vec<Self::Row>, DecodeError>;

    /// Download the report for a single date or a date range
    fn download<C: HttpGet>(
        &self,
        portal: &SoPortal<C>,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Self::Row>, EtlError>
    where
        Self: Sized,
    {
        portal.download(self, start, end)
    }
}

/// Generation and consumption by OES
#[derive(Debug, Clone, Copy, Default)]
pub struct GenConsumReport;

impl SoReport for GenConsumReport {
    type Row = GenConsumRow;

    fn report_name(&self) -> &'static str {
        "GenConsum"
    }

    fn query(&self, date: NaiveDate) -> String {
        let day = date.format("%d.%m.%Y");
        format!(
            "startDate={}&endDate={}&territoriesIds={}&notCheckedColumnsNames=",
            day, day, GEN_CONSUM_TERRITORIES
        )
    }

    fn decode(&self, table: &CsvTable) -> Result<Vec<Self::Row>, DecodeError> {
        so_parsers::decode_gen_consum(table)
    }
}

/// Forecast consumption by region
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastConsumReport;

impl SoReport for ForecastConsumReport {
    type Row = ForecastConsumRow;

    fn report_name(&self) -> &'static str {
        "ForecastConsumSubRf"
    }

    fn query(&self, date: NaiveDate) -> String {
        format!("date={}", date.format("%Y-%m-%d"))
    }

    fn decode(&self, table: &CsvTable) -> Result<Vec<Self::Row>, DecodeError> {
        so_parsers::decode_forecast_consumption(table)
    }
}

/// Block-station generation by region
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockStationsReport;

impl SoReport for BlockStationsReport {
    type Row = BlockStationRow;

    fn report_name(&self) -> &'static str {
        "PowerESPPByRegions"
    }

    fn query(&self, date: NaiveDate) -> String {
        format!("date={}", date.format("%Y-%m-%d"))
    }

    fn decode(&self, table: &CsvTable) -> Result<Vec<Self::Row>, DecodeError> {
        so_parsers::decode_block_stations(table)
    }
}

/// Every SO UPS report type, addressable by export name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoReportKind {
    GenConsum,
    ForecastConsum,
    BlockStations,
}

impl SoReportKind {
    pub const ALL: [SoReportKind; 3] = [
        SoReportKind::GenConsum,
        SoReportKind::ForecastConsum,
        SoReportKind::BlockStations,
    ];

    pub fn report_name(self) -> &'static str {
        match self {
            SoReportKind::GenConsum => GenConsumReport.report_name(),
            SoReportKind::ForecastConsum => ForecastConsumReport.report_name(),
            SoReportKind::BlockStations => BlockStationsReport.report_name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.report_name() == name)
    }

    /// Download the report and normalize it into a [`Table`]
    pub fn download_table<C: HttpGet>(
        self,
        portal: &SoPortal<C>,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Table, EtlError> {
        Ok(match self {
            SoReportKind::GenConsum => Table::from_rows(&GenConsumReport.download(portal, start, end)?),
            SoReportKind::ForecastConsum => {
                Table::from_rows(&ForecastConsumReport.download(portal, start, end)?)
            }
            SoReportKind::BlockStations => {
                Table::from_rows(&BlockStationsReport.download(portal, start, end)?)
            }
        })
    }
}
