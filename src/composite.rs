//! Region total report
//!
//! Joins three reports into one row per (date, hour, region):
//!
//! 1. Region trade (ATS), the row skeleton
//! 2. Block-station generation (SO UPS), left-joined on (date, hour, region_id)
//! 3. Cross-section activity (ATS), deduplicated, restricted to sections
//!    active at least once that day and pivoted into `is_active_<id>`
//!    columns broadcast over every region of the hour
//!
//! Missing numeric values become 0.0. Days are assembled independently and
//! then concatenated; a section column absent on some day reads 0.0 there.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::ats_reports::{AtsPortal, AtsReport, RegionReport, SectionReport};
use crate::error::EtlError;
use crate::periods::{expand_periods, Granularity};
use crate::so_reports::{BlockStationsReport, SoPortal, SoReport};
use crate::table::{Table, TableRow, Value};
use crate::transport::HttpGet;
use crate::types::{RegionTradeRow, SectionFlowRow, TRADE_FIGURE_COLUMNS};
use crate::types_so::BlockStationRow;

type HourKey = (NaiveDate, u8);

/// One region-hour of the combined report
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTotalRow {
    pub date: NaiveDate,
    pub hour: u8,
    pub region_id: i64,
    /// Trade figures in [`TRADE_FIGURE_COLUMNS`] order
    pub figures: [f64; 29],
    pub vol_gen_blockstan: f64,
    /// Activity flags aligned with [`RegionTotalResult::section_ids`]
    pub section_flags: Vec<f64>,
}

/// Combined report over one or more days
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionTotalResult {
    /// Sections with a flag column, ascending
    pub section_ids: Vec<i64>,
    pub rows: Vec<RegionTotalRow>,
}

impl RegionTotalResult {
    /// Assemble one day from its three source reports
    pub fn from_day(
        trade: &[RegionTradeRow],
        sections: &[SectionFlowRow],
        blocks: &[BlockStationRow],
    ) -> Self {
        let activity = dedup_section_activity(sections);
        let active = active_sections(&activity);
        let pivot = pivot_sections(&activity, &active);
        let section_ids: Vec<i64> = active.into_iter().collect();

        let mut block_gen: HashMap<(NaiveDate, u8, i64), Option<f64>> = HashMap::new();
        for b in blocks {
            block_gen
                .entry((b.date, b.hour, b.region_id))
                .or_insert(b.vol_gen_blockstan);
        }

        let rows = trade
            .iter()
            .map(|t| {
                let flags = pivot.get(&(t.date, t.hour));
                RegionTotalRow {
                    date: t.date,
                    hour: t.hour,
                    region_id: t.region_id,
                    figures: t.figures.map(|f| f.unwrap_or(0.0)),
                    vol_gen_blockstan: block_gen
                        .get(&(t.date, t.hour, t.region_id))
                        .copied()
                        .flatten()
                        .unwrap_or(0.0),
                    section_flags: section_ids
                        .iter()
                        .map(|id| {
                            flags
                                .and_then(|f| f.get(id))
                                .map_or(0.0, |flag| f64::from(*flag))
                        })
                        .collect(),
                }
            })
            .collect();

        Self { section_ids, rows }
    }

    /// Concatenate days, widening every row to the union of section columns
    pub fn concat(days: Vec<RegionTotalResult>) -> Self {
        let section_ids: Vec<i64> = days
            .iter()
            .flat_map(|day| day.section_ids.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut rows = Vec::new();
        for day in days {
            let positions: HashMap<i64, usize> = day
                .section_ids
                .iter()
                .enumerate()
                .map(|(idx, id)| (*id, idx))
                .collect();

            for mut row in day.rows {
                row.section_flags = section_ids
                    .iter()
                    .map(|id| {
                        positions
                            .get(id)
                            .and_then(|&idx| row.section_flags.get(idx))
                            .copied()
                            .unwrap_or(0.0)
                    })
                    .collect();
                rows.push(row);
            }
        }

        Self { section_ids, rows }
    }

    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = RegionTradeRow::COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.push("vol_gen_blockstan".to_string());
        columns.extend(self.section_ids.iter().map(|id| format!("is_active_{}", id)));
        columns
    }

    /// Normalize into a [`Table`]
    ///
    /// Column order: region trade columns, `vol_gen_blockstan`, then one
    /// `is_active_<section_id>` column per section.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(self.columns());
        for row in &self.rows {
            let mut values = Vec::with_capacity(TRADE_FIGURE_COLUMNS.len() + 4 + row.section_flags.len());
            values.push(Value::Int(row.region_id));
            values.push(row.hour.into());
            values.extend(row.figures.iter().map(|f| Value::Float(*f)));
            values.push(row.date.into());
            values.push(Value::Float(row.vol_gen_blockstan));
            values.extend(row.section_flags.iter().map(|f| Value::Float(*f)));
            table.push_row(values);
        }
        table
    }
}

/// Maximum `is_active` per (date, hour, section_id)
pub fn dedup_section_activity(rows: &[SectionFlowRow]) -> BTreeMap<(NaiveDate, u8, i64), u8> {
    let mut activity = BTreeMap::new();
    for row in rows {
        let flag = activity
            .entry((row.date, row.hour, row.section_id))
            .or_insert(row.is_active);
        *flag = (*flag).max(row.is_active);
    }
    activity
}

/// Sections whose summed activity is above zero
pub fn active_sections(activity: &BTreeMap<(NaiveDate, u8, i64), u8>) -> BTreeSet<i64> {
    let mut totals: BTreeMap<i64, u32> = BTreeMap::new();
    for (&(_, _, section_id), &flag) in activity {
        *totals.entry(section_id).or_default() += u32::from(flag);
    }
    totals
        .into_iter()
        .filter(|&(_, total)| total > 0)
        .map(|(section_id, _)| section_id)
        .collect()
}

/// Wide form: (date, hour) → section_id → flag, for `active` sections only
pub fn pivot_sections(
    activity: &BTreeMap<(NaiveDate, u8, i64), u8>,
    active: &BTreeSet<i64>,
) -> BTreeMap<HourKey, BTreeMap<i64, u8>> {
    let mut pivot: BTreeMap<HourKey, BTreeMap<i64, u8>> = BTreeMap::new();
    for (&(date, hour, section_id), &flag) in activity {
        if active.contains(&section_id) {
            pivot.entry((date, hour)).or_default().insert(section_id, flag);
        }
    }
    pivot
}

/// Combined region report over trade, block-station and section data
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionTotalReport;

impl RegionTotalReport {
    /// Download and join the three source reports, one day at a time
    pub fn download<A: HttpGet, S: HttpGet>(
        &self,
        ats: &AtsPortal<A>,
        so: &SoPortal<S>,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<RegionTotalResult, EtlError> {
        let end = end.unwrap_or(start);
        let days = expand_periods(start, Some(end), Granularity::Day)?;

        let mut totals = Vec::with_capacity(days.len());
        for day in days {
            let trade = RegionReport.download(ats, day, None)?;
            let sections = SectionReport.download(ats, day, None)?;
            let blocks = BlockStationsReport.download(so, day, None)?;

            let total = RegionTotalResult::from_day(&trade, &sections, &blocks);
            debug!(%day, rows = total.rows.len(), sections = total.section_ids.len(), "Assembled region totals");
            totals.push(total);
        }

        let result = RegionTotalResult::concat(totals);
        info!(rows = result.rows.len(), sections = result.section_ids.len(), "Region total report assembled");
        Ok(result)
    }
}
