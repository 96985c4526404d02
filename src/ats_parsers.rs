//! Layout decoders for ATS (portal A) workbooks
//!
//! Each report type has its own fixed, undocumented layout. The decoders
//! here are pure functions `decode_*(workbook, context) -> rows`; the
//! drivers in [`crate::ats_reports`] pick one per report type.
//!
//! # Layouts
//!
//! | Report | Sheets | First data row | Columns |
//! |--------|--------|----------------|---------|
//! | Branch flow | one per hour | 5 | node_from, node_to, branch_num, flow |
//! | Node price | one per hour | 3 | node_id, name, u, region, price |
//! | DGU volume | first only | 7 | dgu_id, _, node_id, _, 24 × 5 volumes |
//! | Demand/offer curve | one per hour | 8 | price in column 3, volume in column 4 |
//! | Section flow | one per hour | 3 | section_id, name, node1, node2, branch, p_min, p_max, v_ppp |
//! | Region trade | first only | 6 | region, hour, 29 figures |
//! | Region flow | first only | 6 | region1, region2, hour, flow |
//! | Region fact | first only | 7 | date, hour (1-based), fact; region name in B2 |
//!
//! Hourly sheets are named by their hour number. Fully blank rows are skipped.

use chrono::NaiveDate;

use crate::error::{DecodeError, EtlError};
use crate::links::PriceZone;
use crate::regions::RegionReference;
use crate::transformations::{
    cell_to_date, cell_to_f64, cell_to_i64, integral, parse_hour_sheet_name, parse_integer,
};
use crate::types::*;
use crate::workbook::{Cell, Sheet, Workbook};

const BRANCH_FIRST_ROW: usize = 5;
const NODE_PRICE_FIRST_ROW: usize = 3;
const DGU_FIRST_ROW: usize = 7;
const DGU_FIRST_VALUE_COL: usize = 4;
const DGU_VALUES_PER_HOUR: usize = 5;
const CURVE_FIRST_ROW: usize = 8;
const SECTION_FIRST_ROW: usize = 3;
const REGION_TRADE_FIRST_ROW: usize = 6;
const REGION_FLOW_FIRST_ROW: usize = 6;
const REGION_FACT_FIRST_ROW: usize = 7;
const REGION_FACT_NAME_CELL: (usize, usize) = (1, 1);

/// Period, zone and reference data a decoder runs with
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    pub date: NaiveDate,
    pub zone: PriceZone,
    pub regions: &'a RegionReference,
}

impl<'a> DecodeContext<'a> {
    pub fn new(date: NaiveDate, zone: PriceZone, regions: &'a RegionReference) -> Self {
        Self {
            date,
            zone,
            regions,
        }
    }
}

// ============================================================================
// Row Access
// ============================================================================

/// Typed access to one sheet row
struct RowView<'s> {
    sheet: &'s Sheet,
    row: usize,
}

impl<'s> RowView<'s> {
    fn cell(&self, col: usize) -> &'s Cell {
        self.sheet.cell(self.row, col)
    }

    fn invalid(&self, col: usize) -> DecodeError {
        DecodeError::InvalidCell {
            sheet: self.sheet.name.clone(),
            row: self.row,
            col,
            value: self.cell(col).to_string(),
        }
    }

    fn int(&self, col: usize) -> Result<i64, DecodeError> {
        cell_to_i64(self.cell(col))
            .ok()
            .flatten()
            .ok_or_else(|| self.invalid(col))
    }

    fn float(&self, col: usize) -> Result<f64, DecodeError> {
        self.opt_float(col)?.ok_or_else(|| self.invalid(col))
    }

    fn opt_float(&self, col: usize) -> Result<Option<f64>, DecodeError> {
        cell_to_f64(self.cell(col)).map_err(|_| self.invalid(col))
    }

    /// 0-based hour; `offset` is subtracted first (1 for 1-based sources)
    fn hour(&self, col: usize, offset: i64) -> Result<u8, DecodeError> {
        let hour = self.int(col)? - offset;
        if (0..24).contains(&hour) {
            Ok(hour as u8)
        } else {
            Err(self.invalid(col))
        }
    }

    /// Region identifier: numeric cells pass through, names are resolved
    fn region(&self, col: usize, regions: &RegionReference) -> Result<i64, EtlError> {
        match self.cell(col) {
            Cell::Number(n) => integral(*n).ok_or_else(|| self.invalid(col).into()),
            Cell::Text(s) if !s.trim().is_empty() => match parse_integer(s) {
                Ok(id) => Ok(id),
                Err(_) => Ok(regions.resolve(s)?),
            },
            _ => Err(self.invalid(col).into()),
        }
    }
}

/// Non-blank rows of a sheet, starting at `first_row`
fn data_rows(sheet: &Sheet, first_row: usize) -> impl Iterator<Item = RowView<'_>> {
    (first_row..sheet.height())
        .filter(move |&row| sheet.rows[row].iter().any(|cell| !cell.is_blank()))
        .map(move |row| RowView { sheet, row })
}

fn sheet_hour(sheet: &Sheet) -> Result<u8, DecodeError> {
    let hour = parse_hour_sheet_name(&sheet.name)?;
    if hour < 24 {
        Ok(hour)
    } else {
        Err(DecodeError::InvalidSheetName(sheet.name.clone()))
    }
}

// ============================================================================
// Hourly Sheet Reports
// ============================================================================

/// Decode a branch flow workbook (`TS_PART_REP_LINE`)
pub fn decode_branch_flows(
    workbook: &Workbook,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<BranchFlowRow>, EtlError> {
    let mut rows = Vec::new();
    for sheet in &workbook.sheets {
        let hour = sheet_hour(sheet)?;
        for r in data_rows(sheet, BRANCH_FIRST_ROW) {
            rows.push(BranchFlowRow {
                node_from: r.int(0)?,
                node_to: r.int(1)?,
                branch_num: r.int(2)?,
                flow: r.float(3)?,
                hour,
                date: ctx.date,
            });
        }
    }
    Ok(rows)
}

/// Decode a nodal price workbook (`big_nodes_prices_pub`)
///
/// Node name, voltage and the trailing empty column are dropped.
pub fn decode_node_prices(
    workbook: &Workbook,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<NodePriceRow>, EtlError> {
    let mut rows = Vec::new();
    for sheet in &workbook.sheets {
        let hour = sheet_hour(sheet)?;
        for r in data_rows(sheet, NODE_PRICE_FIRST_ROW) {
            rows.push(NodePriceRow {
                node_id: r.int(0)?,
                region_id: r.region(3, ctx.regions)?,
                price: r.float(4)?,
                hour,
                date: ctx.date,
            });
        }
    }
    Ok(rows)
}

/// Decode a demand/offer curve workbook (`curve_demand_offer`)
///
/// The first non-blank price of each hour may be published as `*` (no
/// bound); it is read as 0.
pub fn decode_curve_points(
    workbook: &Workbook,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<CurvePointRow>, EtlError> {
    let mut rows = Vec::new();
    for sheet in &workbook.sheets {
        let hour = sheet_hour(sheet)?;
        for (i, r) in data_rows(sheet, CURVE_FIRST_ROW).enumerate() {
            let unbounded = i == 0 && r.cell(3).as_text().map(str::trim) == Some("*");
            let price = if unbounded { 0.0 } else { r.float(3)? };

            rows.push(CurvePointRow {
                hour,
                price,
                volume: r.opt_float(4)?,
                date: ctx.date,
                pz: ctx.zone.number(),
            });
        }
    }
    Ok(rows)
}

/// Decode a cross-section flow workbook (`overflow_sechen_all_pub`)
///
/// Rows without either limit are dropped. A section is active when its
/// planned flow equals one of its limits.
pub fn decode_section_flows(
    workbook: &Workbook,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<SectionFlowRow>, EtlError> {
    let mut rows = Vec::new();
    for sheet in &workbook.sheets {
        let hour = sheet_hour(sheet)?;
        for r in data_rows(sheet, SECTION_FIRST_ROW) {
            let p_min = r.opt_float(5)?;
            let p_max = r.opt_float(6)?;
            if p_min.is_none() && p_max.is_none() {
                continue;
            }
            let v_ppp = r.opt_float(7)?;
            let is_active = v_ppp.is_some() && (v_ppp == p_min || v_ppp == p_max);

            rows.push(SectionFlowRow {
                section_id: r.int(0)?,
                is_active: u8::from(is_active),
                hour,
                date: ctx.date,
            });
        }
    }
    Ok(rows)
}

// ============================================================================
// Single Sheet Reports
// ============================================================================

/// Decode a DGU volume workbook (`carana_sell_units`)
///
/// Units are listed from row 7 down to the first row with an empty first
/// column (or the end of the sheet, whichever comes first). Each unit row
/// holds 24 consecutive groups of (p_min_tech, p_min_techn, p_min, v_ppp,
/// p_max) starting at column 4 and expands into 24 hourly rows.
pub fn decode_dgu_volumes(
    workbook: &Workbook,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<DguVolumeRow>, EtlError> {
    let sheet = workbook.sheet(0)?;
    let mut rows = Vec::new();

    let units = (DGU_FIRST_ROW..sheet.height())
        .take_while(|&row| !sheet.cell(row, 0).is_blank())
        .map(|row| RowView { sheet, row });

    for r in units {
        let dgu_id = r.int(0)?;
        let node_id = r.int(2)?;
        for hour in 0..24u8 {
            let base = DGU_FIRST_VALUE_COL + hour as usize * DGU_VALUES_PER_HOUR;
            rows.push(DguVolumeRow {
                dgu_id,
                hour,
                node_id,
                p_min_tech: r.opt_float(base)?,
                p_min_techn: r.opt_float(base + 1)?,
                p_min: r.opt_float(base + 2)?,
                v_ppp: r.opt_float(base + 3)?,
                p_max: r.opt_float(base + 4)?,
                date: ctx.date,
            });
        }
    }
    Ok(rows)
}

/// Decode a region trade workbook (`trade_region_spub`)
pub fn decode_region_trade(
    workbook: &Workbook,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<RegionTradeRow>, EtlError> {
    let sheet = workbook.sheet(0)?;
    let mut rows = Vec::new();
    for r in data_rows(sheet, REGION_TRADE_FIRST_ROW) {
        let mut figures = [None; TRADE_FIGURE_COLUMNS.len()];
        for (idx, figure) in figures.iter_mut().enumerate() {
            *figure = r.opt_float(2 + idx)?;
        }
        rows.push(RegionTradeRow {
            region_id: r.region(0, ctx.regions)?,
            hour: r.hour(1, 0)?,
            figures,
            date: ctx.date,
        });
    }
    Ok(rows)
}

/// Decode an inter-region flow workbook (`overflow_region_spub`)
pub fn decode_region_flows(
    workbook: &Workbook,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<RegionFlowRow>, EtlError> {
    let sheet = workbook.sheet(0)?;
    let mut rows = Vec::new();
    for r in data_rows(sheet, REGION_FLOW_FIRST_ROW) {
        rows.push(RegionFlowRow {
            region1_id: r.region(0, ctx.regions)?,
            region2_id: r.region(1, ctx.regions)?,
            hour: r.hour(2, 0)?,
            flow: r.opt_float(3)?,
            date: ctx.date,
        });
    }
    Ok(rows)
}

/// Decode a regional actual consumption workbook (`fact_region`)
///
/// Dates come from the rows themselves (the workbook covers a month); hours
/// are published 1-based.
pub fn decode_region_facts(
    workbook: &Workbook,
    ctx: &DecodeContext<'_>,
) -> Result<Vec<RegionFactRow>, EtlError> {
    let sheet = workbook.sheet(0)?;
    let (name_row, name_col) = REGION_FACT_NAME_CELL;
    let header = RowView {
        sheet,
        row: name_row,
    };
    let region_id = header.region(name_col, ctx.regions)?;

    let mut rows = Vec::new();
    for r in data_rows(sheet, REGION_FACT_FIRST_ROW) {
        rows.push(RegionFactRow {
            date: cell_to_date(r.cell(0)).map_err(|_| r.invalid(0))?,
            hour: r.hour(1, 1)?,
            fact: r.opt_float(2)?,
            region_id,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    fn t(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn e() -> Cell {
        Cell::Empty
    }

    /// Sheet with `header_rows` empty rows followed by `data`
    fn sheet(name: &str, header_rows: usize, data: Vec<Vec<Cell>>) -> Sheet {
        let mut rows = vec![vec![t("header")]; header_rows];
        rows.extend(data);
        Sheet::new(name, rows)
    }

    fn regions() -> RegionReference {
        RegionReference::from_pairs([(77, "Москва"), (54, "Новосибирская область")])
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 10, 1).unwrap()
    }

    #[test]
    fn test_branch_flows() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let workbook = Workbook::new(vec![
            sheet("0", 5, vec![vec![n(1001.0), n(1002.0), n(0.0), t("12,5")]]),
            sheet(
                "1",
                5,
                vec![
                    vec![n(1001.0), n(1002.0), n(0.0), n(-3.0)],
                    vec![e(), e(), e(), e()],
                    vec![n(1003.0), n(1004.0), n(1.0), n(7.25)],
                ],
            ),
        ]);

        let rows = decode_branch_flows(&workbook, &ctx).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            BranchFlowRow {
                node_from: 1001,
                node_to: 1002,
                branch_num: 0,
                flow: 12.5,
                hour: 0,
                date: date(),
            }
        );
        assert_eq!(rows[2].hour, 1);
        assert_eq!(rows[2].branch_num, 1);
    }

    #[test]
    fn test_branch_flows_bad_sheet_name() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let workbook = Workbook::new(vec![sheet("Лист1", 5, vec![])]);

        assert!(matches!(
            decode_branch_flows(&workbook, &ctx),
            Err(EtlError::Decode(DecodeError::InvalidSheetName(_)))
        ));
    }

    #[test]
    fn test_branch_flows_non_integer_node() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let workbook = Workbook::new(vec![sheet(
            "0",
            5,
            vec![vec![n(1001.5), n(1002.0), n(0.0), n(1.0)]],
        )]);

        match decode_branch_flows(&workbook, &ctx) {
            Err(EtlError::Decode(DecodeError::InvalidCell { row, col, .. })) => {
                assert_eq!((row, col), (5, 0));
            }
            other => panic!("Expected InvalidCell, got {:?}", other),
        }
    }

    #[test]
    fn test_node_prices_resolve_regions() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::Siberian, &regions);
        let workbook = Workbook::new(vec![sheet(
            "13",
            3,
            vec![
                vec![n(500.0), t("ПС Южная"), n(220.0), t("Новосибирская область"), t("1 034,17"), e()],
                vec![n(501.0), t("ПС Северная"), n(110.0), n(77.0), n(998.0), e()],
            ],
        )]);

        let rows = decode_node_prices(&workbook, &ctx).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region_id, 54);
        assert_eq!(rows[0].price, 1034.17);
        assert_eq!(rows[0].hour, 13);
        assert_eq!(rows[1].region_id, 77);
    }

    #[test]
    fn test_node_prices_unknown_region() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let workbook = Workbook::new(vec![sheet(
            "0",
            3,
            vec![vec![n(500.0), t("x"), n(220.0), t("Атлантида"), n(1.0), e()]],
        )]);

        match decode_node_prices(&workbook, &ctx) {
            Err(EtlError::Resolution(e)) => assert_eq!(e.name, "Атлантида"),
            other => panic!("Expected Resolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_dgu_volumes_expand_to_hours() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);

        let mut unit = vec![n(42.0), t("ГТУ-1"), n(1001.0), t("Станция")];
        unit.extend((0..120).map(|i| n(i as f64)));

        let workbook = Workbook::new(vec![sheet(
            "Лист1",
            7,
            vec![unit, vec![e(), t("Итого")], vec![n(43.0), e(), n(1002.0)]],
        )]);

        let rows = decode_dgu_volumes(&workbook, &ctx).unwrap();
        assert_eq!(rows.len(), 24);
        for (hour, row) in rows.iter().enumerate() {
            let base = (hour * 5) as f64;
            assert_eq!(row.hour as usize, hour);
            assert_eq!(row.dgu_id, 42);
            assert_eq!(row.node_id, 1001);
            assert_eq!(row.p_min_tech, Some(base));
            assert_eq!(row.p_min_techn, Some(base + 1.0));
            assert_eq!(row.p_min, Some(base + 2.0));
            assert_eq!(row.v_ppp, Some(base + 3.0));
            assert_eq!(row.p_max, Some(base + 4.0));
        }
    }

    #[test]
    fn test_dgu_volumes_scan_stops_at_sheet_end() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let workbook = Workbook::new(vec![sheet(
            "Лист1",
            7,
            vec![vec![n(1.0), e(), n(2.0)], vec![n(3.0), e(), n(4.0)]],
        )]);

        let rows = decode_dgu_volumes(&workbook, &ctx).unwrap();
        assert_eq!(rows.len(), 48);
        assert!(rows.iter().all(|r| r.p_max.is_none()));
    }

    #[test]
    fn test_curve_star_sentinel() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::Siberian, &regions);
        let workbook = Workbook::new(vec![sheet(
            "2",
            8,
            vec![
                vec![e(), e(), e(), t("*"), n(100.0)],
                vec![e(), e(), e(), t("850,5"), n(250.0)],
            ],
        )]);

        let rows = decode_curve_points(&workbook, &ctx).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].price, 0.0);
        assert_eq!(rows[0].volume, Some(100.0));
        assert_eq!(rows[1].price, 850.5);
        assert!(rows.iter().all(|r| r.pz == 2 && r.hour == 2));
    }

    #[test]
    fn test_curve_star_after_blank_row() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let workbook = Workbook::new(vec![sheet(
            "0",
            8,
            vec![
                vec![],
                vec![e(), e(), e(), t(" * "), n(100.0)],
                vec![e(), e(), e(), t("900"), n(200.0)],
            ],
        )]);

        let rows = decode_curve_points(&workbook, &ctx).unwrap();
        let prices: Vec<f64> = rows.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![0.0, 900.0]);
    }

    #[test]
    fn test_curve_star_only_in_first_row() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let workbook = Workbook::new(vec![sheet(
            "0",
            8,
            vec![
                vec![e(), e(), e(), t("*"), n(100.0)],
                vec![e(), e(), e(), t("*"), n(200.0)],
            ],
        )]);

        assert!(matches!(
            decode_curve_points(&workbook, &ctx),
            Err(EtlError::Decode(DecodeError::InvalidCell { row: 9, col: 3, .. }))
        ));
    }

    #[test]
    fn test_section_flows() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let row = |id: f64, p_min: Cell, p_max: Cell, v: Cell| {
            vec![n(id), t("Сечение"), e(), e(), t(" "), p_min, p_max, v]
        };
        let workbook = Workbook::new(vec![sheet(
            "5",
            3,
            vec![
                row(10.0, t("-100,5"), t("200"), t("200,0")),
                row(11.0, t("-100"), t("200"), t("150")),
                row(12.0, t(" "), t(""), t("150")),
                row(13.0, t("-100,5"), e(), t("-100,5")),
                row(14.0, t("-100"), t("200"), t(" ")),
            ],
        )]);

        let rows = decode_section_flows(&workbook, &ctx).unwrap();
        let flags: Vec<(i64, u8)> = rows.iter().map(|r| (r.section_id, r.is_active)).collect();
        assert_eq!(flags, vec![(10, 1), (11, 0), (13, 1), (14, 0)]);
        assert!(rows.iter().all(|r| r.hour == 5));
    }

    #[test]
    fn test_region_trade() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let mut data = vec![t("Москва"), n(3.0)];
        data.extend((0..29).map(|i| if i == 1 { t("") } else { n(i as f64) }));

        let workbook = Workbook::new(vec![sheet("Лист1", 6, vec![data])]);
        let rows = decode_region_trade(&workbook, &ctx).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region_id, 77);
        assert_eq!(rows[0].hour, 3);
        assert_eq!(rows[0].figure("gen_ges"), Some(0.0));
        assert_eq!(rows[0].figure("gen_aes"), None);
        assert_eq!(rows[0].figure("price_gen"), Some(28.0));
    }

    #[test]
    fn test_region_flows() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let workbook = Workbook::new(vec![sheet(
            "Лист1",
            6,
            vec![
                vec![t("Москва"), t("Новосибирская область"), n(0.0), t("-15,5")],
                vec![t("Москва"), t("Новосибирская область"), n(1.0), t(" ")],
            ],
        )]);

        let rows = decode_region_flows(&workbook, &ctx).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].region1_id, rows[0].region2_id), (77, 54));
        assert_eq!(rows[0].flow, Some(-15.5));
        assert_eq!(rows[1].flow, None);
    }

    #[test]
    fn test_region_facts() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let mut rows = vec![vec![t("header")]; 7];
        rows[1] = vec![t("Регион:"), t("Москва")];
        rows.push(vec![t("01.10.2018"), n(1.0), t("5 100,2")]);
        rows.push(vec![n(43374.0), n(24.0), n(4900.0)]);

        let workbook = Workbook::new(vec![Sheet::new("Лист1", rows)]);
        let rows = decode_region_facts(&workbook, &ctx).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hour, 0);
        assert_eq!(rows[0].fact, Some(5100.2));
        assert_eq!(rows[1].hour, 23);
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2018, 10, 1).unwrap());
        assert!(rows.iter().all(|r| r.region_id == 77));
    }

    #[test]
    fn test_region_facts_hour_out_of_range() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        let mut rows = vec![vec![t("header")]; 7];
        rows[1] = vec![e(), t("Москва")];
        rows.push(vec![t("01.10.2018"), n(0.0), n(1.0)]);

        let workbook = Workbook::new(vec![Sheet::new("Лист1", rows)]);
        assert!(matches!(
            decode_region_facts(&workbook, &ctx),
            Err(EtlError::Decode(DecodeError::InvalidCell { col: 1, .. }))
        ));
    }

    #[test]
    fn test_missing_sheet() {
        let regions = regions();
        let ctx = DecodeContext::new(date(), PriceZone::European, &regions);
        assert!(matches!(
            decode_region_trade(&Workbook::default(), &ctx),
            Err(EtlError::Decode(DecodeError::MissingSheet(0)))
        ));
    }
}
