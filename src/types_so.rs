//! Normalized rows of SO UPS (portal B) CSV exports

use chrono::NaiveDate;

use crate::table::{TableRow, Value};

/// Aggregate generation and consumption of one OES for one hour
///
/// Source: `GenConsum`. `oes_id` is the OES identifier after territory code
/// remapping (see [`crate::transformations::territory_to_oes`]).
#[derive(Debug, Clone, PartialEq)]
pub struct GenConsumRow {
    pub hour: u8,
    pub date: NaiveDate,
    pub oes_id: i64,
    /// Actual consumption, MWh
    pub vol_con_fact: Option<f64>,
    /// Planned consumption, MWh
    pub vol_con_plan: Option<f64>,
    pub vol_gen_fact: Option<f64>,
    pub vol_gen_plan: Option<f64>,
}

impl TableRow for GenConsumRow {
    const COLUMNS: &'static [&'static str] = &[
        "hour",
        "date",
        "oes_id",
        "vol_con_fact",
        "vol_con_plan",
        "vol_gen_fact",
        "vol_gen_plan",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            self.hour.into(),
            self.date.into(),
            self.oes_id.into(),
            self.vol_con_fact.into(),
            self.vol_con_plan.into(),
            self.vol_gen_fact.into(),
            self.vol_gen_plan.into(),
        ]
    }
}

/// Forecast consumption of one region for one hour
///
/// Source: `ForecastConsumSubRf`
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConsumRow {
    pub date: NaiveDate,
    pub hour: u8,
    pub region_id: i64,
    pub vol_con_plan: Option<f64>,
}

impl TableRow for ForecastConsumRow {
    const COLUMNS: &'static [&'static str] = &["date", "hour", "region_id", "vol_con_plan"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.date.into(),
            self.hour.into(),
            self.region_id.into(),
            self.vol_con_plan.into(),
        ]
    }
}

/// Block-station generation of one region for one hour
///
/// Source: `PowerESPPByRegions`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStationRow {
    pub date: NaiveDate,
    pub hour: u8,
    pub region_id: i64,
    pub vol_gen_blockstan: Option<f64>,
}

impl TableRow for BlockStationRow {
    const COLUMNS: &'static [&'static str] = &["date", "hour", "region_id", "vol_gen_blockstan"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.date.into(),
            self.hour.into(),
            self.region_id.into(),
            self.vol_gen_blockstan.into(),
        ]
    }
}
