//! ATS (portal A) report drivers
//!
//! A driver expands the requested date range into periods (days or
//! months), then for every (period, price zone) pair discovers the report
//! archives, decodes each workbook and accumulates the rows. Any failure
//! aborts the whole request; rows gathered so far are dropped.
//!
//! Report types differ only in identifier, zone list, granularity and
//! decoder, which is what [`AtsReport`] captures.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use energo_reports::ats_reports::{AtsPortal, AtsReport, BranchReport};
//! use energo_reports::{PortalConfig, RegionReference};
//!
//! let config = PortalConfig::default();
//! let regions = RegionReference::from_path(&config.regions_path)?;
//! let portal = AtsPortal::from_config(&config, regions)?;
//!
//! let rows = BranchReport.download(&portal, NaiveDate::from_ymd_opt(2018, 10, 1).unwrap(), None)?;
//! println!("{} branch rows", rows.len());
//! # Ok::<(), energo_reports::EtlError>(())
//! ```

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::ats_parsers::{self, DecodeContext};
use crate::config::PortalConfig;
use crate::error::{DecodeError, EtlError};
use crate::links::{self, PriceZone, DEFAULT_PRICE_ZONES};
use crate::periods::{expand_periods, Granularity};
use crate::regions::RegionReference;
use crate::table::{Table, TableRow};
use crate::transport::{HttpGet, ReqwestClient, Transport};
use crate::types::*;
use crate::workbook::{decode_archived_workbook, Workbook};

/// Turns a downloaded archive into a workbook
pub type WorkbookDecoder = fn(Vec<u8>) -> Result<Workbook, DecodeError>;

// ============================================================================
// Portal
// ============================================================================

/// Connection to the ATS portal: transport, base URL and region reference
pub struct AtsPortal<C> {
    transport: Transport<C>,
    regions: RegionReference,
    base_url: String,
    decoder: WorkbookDecoder,
}

impl AtsPortal<ReqwestClient> {
    /// Portal over a `reqwest` client configured from `config`
    pub fn from_config(config: &PortalConfig, regions: RegionReference) -> Result<Self, EtlError> {
        config.validate()?;
        let client = ReqwestClient::new(config.timeout())?;
        Ok(Self::new(
            Transport::from_config(client, config),
            regions,
            config.ats_base_url.clone(),
        ))
    }
}

impl<C: HttpGet> AtsPortal<C> {
    pub fn new(transport: Transport<C>, regions: RegionReference, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            regions,
            base_url: base_url.into(),
            decoder: decode_archived_workbook,
        }
    }

    /// Replace the archive decoder (ZIP + `.xls` by default)
    pub fn with_decoder(mut self, decoder: WorkbookDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn regions(&self) -> &RegionReference {
        &self.regions
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Archive URLs of one report for one date and zone
    pub fn list_report_urls(
        &self,
        report_type: &str,
        date: NaiveDate,
        zone: PriceZone,
    ) -> Result<Vec<String>, EtlError> {
        links::list_report_urls(&self.transport, &self.base_url, report_type, date, zone)
    }

    /// Fetch one archive and decode the workbook inside it
    pub fn open_archived_workbook(&self, url: &str) -> Result<Workbook, EtlError> {
        let bytes = self.transport.fetch(url)?;
        Ok((self.decoder)(bytes)?)
    }

    /// Run a report over `[start, end]`
    ///
    /// Periods follow the report's granularity; every period is requested
    /// for each of the report's price zones, period by period.
    pub fn download<R: AtsReport>(
        &self,
        report: &R,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<R::Row>, EtlError> {
        let report_type = report.report_type();
        let periods = expand_periods(start, end, report.granularity())?;
        info!(report_type, periods = periods.len(), "Downloading ATS report");

        let mut rows = Vec::new();
        for date in periods {
            for &zone in report.price_zones() {
                let ctx = DecodeContext::new(date, zone, &self.regions);
                for url in self.list_report_urls(report_type, date, zone)? {
                    let workbook = self.open_archived_workbook(&url)?;
                    let decoded = report.decode(&workbook, &ctx)?;
                    debug!(report_type, %date, zone = zone.code(), rows = decoded.len(), "Decoded workbook");
                    rows.extend(decoded);
                }
            }
        }

        info!(report_type, rows = rows.len(), "ATS report downloaded");
        Ok(rows)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// One ATS report type
pub trait AtsReport {
    type Row: TableRow;

    /// Report identifier used in the portal's `rname` parameter
    fn report_type(&self) -> &'static str;

    /// Price zones requested per period
    fn price_zones(&self) -> &'static [PriceZone] {
        &DEFAULT_PRICE_ZONES
    }

    fn granularity(&self) -> Granularity {
        Granularity::Day
    }

    /// Decode one workbook for one period and zone
    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError>;

    /// Download the report for a single date or a date range
    fn download<C: HttpGet>(
        &self,
        portal: &AtsPortal<C>,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Self::Row>, EtlError>
    where
        Self: Sized,
    {
        portal.download(self, start, end)
    }
}

/// Power flows on grid branches
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchReport;

impl AtsReport for BranchReport {
    type Row = BranchFlowRow;

    fn report_type(&self) -> &'static str {
        "TS_PART_REP_LINE"
    }

    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError> {
        ats_parsers::decode_branch_flows(workbook, ctx)
    }
}

/// Nodal prices
#[derive(Debug, Clone, Copy, Default)]
pub struct NodePriceReport;

impl AtsReport for NodePriceReport {
    type Row = NodePriceRow;

    fn report_type(&self) -> &'static str {
        "big_nodes_prices_pub"
    }

    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError> {
        ats_parsers::decode_node_prices(workbook, ctx)
    }
}

/// Planned volumes of generating units
#[derive(Debug, Clone, Copy, Default)]
pub struct DguVolumeReport;

impl AtsReport for DguVolumeReport {
    type Row = DguVolumeRow;

    fn report_type(&self) -> &'static str {
        "carana_sell_units"
    }

    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError> {
        ats_parsers::decode_dgu_volumes(workbook, ctx)
    }
}

/// Aggregated demand and offer curves
#[derive(Debug, Clone, Copy, Default)]
pub struct DemandOfferCurveReport;

impl AtsReport for DemandOfferCurveReport {
    type Row = CurvePointRow;

    fn report_type(&self) -> &'static str {
        "curve_demand_offer"
    }

    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError> {
        ats_parsers::decode_curve_points(workbook, ctx)
    }
}

/// Controlled cross-section activity
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionReport;

impl AtsReport for SectionReport {
    type Row = SectionFlowRow;

    fn report_type(&self) -> &'static str {
        "overflow_sechen_all_pub"
    }

    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError> {
        ats_parsers::decode_section_flows(workbook, ctx)
    }
}

/// Trade results by region
///
/// Both zones publish the same data, so only the first zone is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionReport;

impl AtsReport for RegionReport {
    type Row = RegionTradeRow;

    fn report_type(&self) -> &'static str {
        "trade_region_spub"
    }

    fn price_zones(&self) -> &'static [PriceZone] {
        &[PriceZone::European]
    }

    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError> {
        ats_parsers::decode_region_trade(workbook, ctx)
    }
}

/// Power flows between regions
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionFlowReport;

impl AtsReport for RegionFlowReport {
    type Row = RegionFlowRow;

    fn report_type(&self) -> &'static str {
        "overflow_region_spub"
    }

    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError> {
        ats_parsers::decode_region_flows(workbook, ctx)
    }
}

/// Actual consumption by region, published monthly
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionFactReport;

impl AtsReport for RegionFactReport {
    type Row = RegionFactRow;

    fn report_type(&self) -> &'static str {
        "fact_region"
    }

    fn price_zones(&self) -> &'static [PriceZone] {
        &[PriceZone::European]
    }

    fn granularity(&self) -> Granularity {
        Granularity::Month
    }

    fn decode(&self, workbook: &Workbook, ctx: &DecodeContext<'_>) -> Result<Vec<Self::Row>, EtlError> {
        ats_parsers::decode_region_facts(workbook, ctx)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Every ATS report type, addressable by identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtsReportKind {
    Branch,
    NodePrice,
    DguVolume,
    DemandOfferCurve,
    Section,
    Region,
    RegionFlow,
    RegionFact,
}

impl AtsReportKind {
    pub const ALL: [AtsReportKind; 8] = [
        AtsReportKind::Branch,
        AtsReportKind::NodePrice,
        AtsReportKind::DguVolume,
        AtsReportKind::DemandOfferCurve,
        AtsReportKind::Section,
        AtsReportKind::Region,
        AtsReportKind::RegionFlow,
        AtsReportKind::RegionFact,
    ];

    pub fn report_type(self) -> &'static str {
        match self {
            AtsReportKind::Branch => BranchReport.report_type(),
            AtsReportKind::NodePrice => NodePriceReport.report_type(),
            AtsReportKind::DguVolume => DguVolumeReport.report_type(),
            AtsReportKind::DemandOfferCurve => DemandOfferCurveReport.report_type(),
            AtsReportKind::Section => SectionReport.report_type(),
            AtsReportKind::Region => RegionReport.report_type(),
            AtsReportKind::RegionFlow => RegionFlowReport.report_type(),
            AtsReportKind::RegionFact => RegionFactReport.report_type(),
        }
    }

    /// Look a report up by its portal identifier
    ///
    /// ```
    /// # use energo_reports::ats_reports::AtsReportKind;
    /// assert_eq!(AtsReportKind::from_name("fact_region"), Some(AtsReportKind::RegionFact));
    /// assert_eq!(AtsReportKind::from_name("GenConsum"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.report_type() == name)
    }

    /// Download the report and normalize it into a [`Table`]
    pub fn download_table<C: HttpGet>(
        self,
        portal: &AtsPortal<C>,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Table, EtlError> {
        Ok(match self {
            AtsReportKind::Branch => Table::from_rows(&BranchReport.download(portal, start, end)?),
            AtsReportKind::NodePrice => {
                Table::from_rows(&NodePriceReport.download(portal, start, end)?)
            }
            AtsReportKind::DguVolume => {
                Table::from_rows(&DguVolumeReport.download(portal, start, end)?)
            }
            AtsReportKind::DemandOfferCurve => {
                Table::from_rows(&DemandOfferCurveReport.download(portal, start, end)?)
            }
            AtsReportKind::Section => Table::from_rows(&SectionReport.download(portal, start, end)?),
            AtsReportKind::Region => Table::from_rows(&RegionReport.download(portal, start, end)?),
            AtsReportKind::RegionFlow => {
                Table::from_rows(&RegionFlowReport.download(portal, start, end)?)
            }
            AtsReportKind::RegionFact => {
                Table::from_rows(&RegionFactReport.download(portal, start, end)?)
            }
        })
    }
}
