//! Decoders for SO UPS (portal B) CSV exports
//!
//! Exports are semicolon-delimited with comma decimals. Each decoder maps
//! the export's own column names to the canonical schema:
//!
//! | Export | Source column | Output column |
//! |--------|---------------|---------------|
//! | GenConsum | INTERVAL | hour |
//! | | M_DATE | date |
//! | | POWER_SYS_ID | oes_id (territory code remapped) |
//! | | E_USE_FACT / E_USE_PLAN | vol_con_fact / vol_con_plan |
//! | | GEN_FACT / GEN_PLAN | vol_gen_fact / vol_gen_plan |
//! | ForecastConsumSubRf | sub_rf_id | region_id |
//! | | cons_value | vol_con_plan |
//! | PowerESPPByRegions | sub_rf_id | region_id |
//! | | Pbst | vol_gen_blockstan |
//!
//! `PRICE_ZONE_ID` in GenConsum is not carried over.

use chrono::NaiveDate;
use csv::StringRecord;

use crate::csv_utils::{get_field, CsvTable};
use crate::error::DecodeError;
use crate::transformations::{
    parse_integer, parse_optional_decimal, parse_report_date, territory_to_oes,
};
use crate::types_so::{BlockStationRow, ForecastConsumRow, GenConsumRow};

const GEN_CONSUM_COLUMNS: [&str; 7] = [
    "INTERVAL",
    "M_DATE",
    "POWER_SYS_ID",
    "E_USE_FACT",
    "E_USE_PLAN",
    "GEN_FACT",
    "GEN_PLAN",
];
const FORECAST_COLUMNS: [&str; 4] = ["date", "hour", "sub_rf_id", "cons_value"];
const BLOCK_STATION_COLUMNS: [&str; 4] = ["date", "hour", "sub_rf_id", "Pbst"];

// ============================================================================
// Field Helpers
// ============================================================================

/// Named field access for one record
struct Fields<'a> {
    record: &'a StringRecord,
    headers: &'a StringRecord,
}

impl<'a> Fields<'a> {
    fn text(&self, name: &str) -> Result<&'a str, DecodeError> {
        get_field(self.record, self.headers, name)
    }

    fn int(&self, name: &str) -> Result<i64, DecodeError> {
        parse_integer(self.text(name)?)
    }

    fn decimal(&self, name: &str) -> Result<Option<f64>, DecodeError> {
        parse_optional_decimal(self.text(name)?)
    }

    fn date(&self, name: &str) -> Result<NaiveDate, DecodeError> {
        parse_report_date(self.text(name)?)
    }

    fn hour(&self, name: &str) -> Result<u8, DecodeError> {
        let value = self.text(name)?;
        match parse_integer(value)? {
            hour @ 0..=23 => Ok(hour as u8),
            _ => Err(DecodeError::CsvFormat(format!(
                "Hour out of range in column '{}': {}",
                name, value
            ))),
        }
    }
}

fn records<'a>(
    table: &'a CsvTable,
    required: &[&str],
) -> Result<impl Iterator<Item = Fields<'a>>, DecodeError> {
    table.require_columns(required)?;
    Ok(table.records.iter().map(move |record| Fields {
        record,
        headers: &table.headers,
    }))
}

// ============================================================================
// Exports
// ============================================================================

/// Decode a `GenConsum` export
///
/// # Example
///
/// ```
/// # use energo_reports::csv_utils::read_csv;
/// # use energo_reports::so_parsers::decode_gen_consum;
/// let csv = "INTERVAL;M_DATE;POWER_SYS_ID;PRICE_ZONE_ID;E_USE_FACT;E_USE_PLAN;GEN_FACT;GEN_PLAN\n\
///            0;01.10.2018 0:00:00;530000;1;1234,5;1230;1300,25;1299\n";
/// let rows = decode_gen_consum(&read_csv(csv.as_bytes()).unwrap()).unwrap();
/// assert_eq!(rows[0].oes_id, 1);
/// assert_eq!(rows[0].vol_con_fact, Some(1234.5));
/// ```
pub fn decode_gen_consum(table: &CsvTable) -> Result<Vec<GenConsumRow>, DecodeError> {
    records(table, &GEN_CONSUM_COLUMNS)?
        .map(|f| -> Result<GenConsumRow, DecodeError> {
            Ok(GenConsumRow {
                hour: f.hour("INTERVAL")?,
                date: f.date("M_DATE")?,
                oes_id: territory_to_oes(f.int("POWER_SYS_ID")?),
                vol_con_fact: f.decimal("E_USE_FACT")?,
                vol_con_plan: f.decimal("E_USE_PLAN")?,
                vol_gen_fact: f.decimal("GEN_FACT")?,
                vol_gen_plan: f.decimal("GEN_PLAN")?,
            })
        })
        .collect()
}

/// Decode a `ForecastConsumSubRf` export
pub fn decode_forecast_consumption(table: &CsvTable) -> Result<Vec<ForecastConsumRow>, DecodeError> {
    records(table, &FORECAST_COLUMNS)?
        .map(|f| -> Result<ForecastConsumRow, DecodeError> {
            Ok(ForecastConsumRow {
                date: f.date("date")?,
                hour: f.hour("hour")?,
                region_id: f.int("sub_rf_id")?,
                vol_con_plan: f.decimal("cons_value")?,
            })
        })
        .collect()
}

/// Decode a `PowerESPPByRegions` export
pub fn decode_block_stations(table: &CsvTable) -> Result<Vec<BlockStationRow>, DecodeError> {
    records(table, &BLOCK_STATION_COLUMNS)?
        .map(|f| -> Result<BlockStationRow, DecodeError> {
            Ok(BlockStationRow {
                date: f.date("date")?,
                hour: f.hour("hour")?,
                region_id: f.int("sub_rf_id")?,
                vol_gen_blockstan: f.decimal("Pbst")?,
            })
        })
        .collect()
}
