//! Normalized rows of ATS (portal A) reports
//!
//! Every row carries the report `date` and a 0-based `hour`. Identifier
//! columns are integers; region identifiers are always canonical numeric
//! ids, never display names.

use chrono::NaiveDate;

use crate::table::{TableRow, Value};

/// One branch of the transmission grid for one hour
///
/// Source: `TS_PART_REP_LINE`, one sheet per hour.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchFlowRow {
    pub node_from: i64,
    pub node_to: i64,
    pub branch_num: i64,
    /// Flow in MW
    pub flow: f64,
    pub hour: u8,
    pub date: NaiveDate,
}

impl TableRow for BranchFlowRow {
    const COLUMNS: &'static [&'static str] =
        &["node_from", "node_to", "branch_num", "flow", "hour", "date"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.node_from.into(),
            self.node_to.into(),
            self.branch_num.into(),
            self.flow.into(),
            self.hour.into(),
            self.date.into(),
        ]
    }
}

/// Nodal price for one hour
///
/// Source: `big_nodes_prices_pub`, one sheet per hour.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePriceRow {
    pub node_id: i64,
    pub region_id: i64,
    /// Price in RUB/MWh
    pub price: f64,
    pub hour: u8,
    pub date: NaiveDate,
}

impl TableRow for NodePriceRow {
    const COLUMNS: &'static [&'static str] = &["node_id", "region_id", "price", "hour", "date"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.node_id.into(),
            self.region_id.into(),
            self.price.into(),
            self.hour.into(),
            self.date.into(),
        ]
    }
}

/// Planned volumes of one generating unit (DGU) for one hour
///
/// Source: `carana_sell_units`, one source row per unit expanded into 24
/// hourly rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DguVolumeRow {
    pub dgu_id: i64,
    pub hour: u8,
    pub node_id: i64,
    pub p_min_tech: Option<f64>,
    pub p_min_techn: Option<f64>,
    pub p_min: Option<f64>,
    pub v_ppp: Option<f64>,
    pub p_max: Option<f64>,
    pub date: NaiveDate,
}

impl TableRow for DguVolumeRow {
    const COLUMNS: &'static [&'static str] = &[
        "dgu_id",
        "hour",
        "node_id",
        "p_min_tech",
        "p_min_techn",
        "p_min",
        "v_ppp",
        "p_max",
        "date",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            self.dgu_id.into(),
            self.hour.into(),
            self.node_id.into(),
            self.p_min_tech.into(),
            self.p_min_techn.into(),
            self.p_min.into(),
            self.v_ppp.into(),
            self.p_max.into(),
            self.date.into(),
        ]
    }
}

/// One point of the aggregated demand/offer curve
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePointRow {
    pub hour: u8,
    pub price: f64,
    pub volume: Option<f64>,
    pub date: NaiveDate,
    /// Price zone number (1 or 2)
    pub pz: u8,
}

impl TableRow for CurvePointRow {
    const COLUMNS: &'static [&'static str] = &["hour", "price", "volume", "date", "pz"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.hour.into(),
            self.price.into(),
            self.volume.into(),
            self.date.into(),
            self.pz.into(),
        ]
    }
}

/// Activity of one controlled cross-section for one hour
///
/// `is_active` is 1 when the planned flow sits on one of the section limits.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionFlowRow {
    pub section_id: i64,
    pub is_active: u8,
    pub hour: u8,
    pub date: NaiveDate,
}

impl TableRow for SectionFlowRow {
    const COLUMNS: &'static [&'static str] = &["section_id", "is_active", "hour", "date"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.section_id.into(),
            self.is_active.into(),
            self.hour.into(),
            self.date.into(),
        ]
    }
}

/// Figure columns of the region trade report, in source order
///
/// Generation, technical minimum, minimum and maximum are each split by
/// source: hydro (`ges`), nuclear (`aes`), thermal (`tes`), solar (`ses`),
/// wind (`ves`) and other.
pub const TRADE_FIGURE_COLUMNS: [&str; 29] = [
    "gen_ges",
    "gen_aes",
    "gen_tes",
    "gen_ses",
    "gen_ves",
    "gen_other",
    "pmin_tech_ges",
    "pmin_tech_aes",
    "pmin_tech_tes",
    "pmin_tech_ses",
    "pmin_tech_ves",
    "pmin_tech_other",
    "pmin_ges",
    "pmin_aes",
    "pmin_tes",
    "pmin_ses",
    "pmin_ves",
    "pmin_other",
    "pmax_ges",
    "pmax_aes",
    "pmax_tes",
    "pmax_ses",
    "pmax_ves",
    "pmax_other",
    "con",
    "exp",
    "imp",
    "price_con",
    "price_gen",
];

/// Trade results of one region for one hour
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTradeRow {
    pub region_id: i64,
    pub hour: u8,
    /// Values in [`TRADE_FIGURE_COLUMNS`] order; blank cells are `None`
    pub figures: [Option<f64>; 29],
    pub date: NaiveDate,
}

impl RegionTradeRow {
    /// Figure by column name
    pub fn figure(&self, column: &str) -> Option<f64> {
        TRADE_FIGURE_COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|idx| self.figures[idx])
    }
}

impl TableRow for RegionTradeRow {
    const COLUMNS: &'static [&'static str] = &[
        "region_id",
        "hour",
        "gen_ges",
        "gen_aes",
        "gen_tes",
        "gen_ses",
        "gen_ves",
        "gen_other",
        "pmin_tech_ges",
        "pmin_tech_aes",
        "pmin_tech_tes",
        "pmin_tech_ses",
        "pmin_tech_ves",
        "pmin_tech_other",
        "pmin_ges",
        "pmin_aes",
        "pmin_tes",
        "pmin_ses",
        "pmin_ves",
        "pmin_other",
        "pmax_ges",
        "pmax_aes",
        "pmax_tes",
        "pmax_ses",
        "pmax_ves",
        "pmax_other",
        "con",
        "exp",
        "imp",
        "price_con",
        "price_gen",
        "date",
    ];

    fn values(&self) -> Vec<Value> {
        let mut values = Vec::with_capacity(Self::COLUMNS.len());
        values.push(self.region_id.into());
        values.push(self.hour.into());
        values.extend(self.figures.iter().map(|f| Value::from(*f)));
        values.push(self.date.into());
        values
    }
}

/// Power flow between two regions for one hour
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFlowRow {
    pub region1_id: i64,
    pub region2_id: i64,
    pub hour: u8,
    pub flow: Option<f64>,
    pub date: NaiveDate,
}

impl TableRow for RegionFlowRow {
    const COLUMNS: &'static [&'static str] = &["region1_id", "region2_id", "hour", "flow", "date"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.region1_id.into(),
            self.region2_id.into(),
            self.hour.into(),
            self.flow.into(),
            self.date.into(),
        ]
    }
}

/// Actual consumption of one region for one hour
///
/// Source: `fact_region`, one workbook per region and month.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFactRow {
    pub date: NaiveDate,
    pub hour: u8,
    pub fact: Option<f64>,
    pub region_id: i64,
}

impl TableRow for RegionFactRow {
    const COLUMNS: &'static [&'static str] = &["date", "hour", "fact", "region_id"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.date.into(),
            self.hour.into(),
            self.fact.into(),
            self.region_id.into(),
        ]
    }
}
