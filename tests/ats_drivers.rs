mod common;

use chrono::NaiveDate;
use energo_reports::ats_reports::{BranchReport, DguVolumeReport, NodePriceReport, SectionReport};
use energo_reports::{AtsReport, AtsReportKind, EtlError, Table, TableRow, Value, Workbook};

use common::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 10, 1).unwrap()
}

fn branch_workbook() -> Workbook {
    let sheets = (0..24)
        .map(|hour| {
            sheet(
                &hour.to_string(),
                5,
                (0..3)
                    .map(|i| vec![n(1000.0 + i as f64), n(2000.0 + i as f64), n(i as f64), t("12,5")])
                    .collect(),
            )
        })
        .collect();
    Workbook::new(sheets)
}

#[test]
fn test_branch_report_two_zones() {
    let stub = AtsStub::default().with_report("TS_PART_REP_LINE", &branch_workbook());
    let rows = BranchReport.download(&ats_portal(&stub), date(), None).unwrap();

    assert_eq!(rows.len(), 2 * 24 * 3);
    assert!(rows.iter().all(|r| r.date == date() && r.flow == 12.5));

    let table = Table::from_rows(&rows);
    let mut columns: Vec<&str> = table.columns().iter().map(String::as_str).collect();
    columns.sort_unstable();
    assert_eq!(
        columns,
        vec!["branch_num", "date", "flow", "hour", "node_from", "node_to"]
    );

    let zones: Vec<String> = stub
        .index_requests()
        .iter()
        .filter_map(|u| u.rsplit("region=").next().map(str::to_string))
        .collect();
    assert_eq!(zones, vec!["eur", "sib"]);
}

#[test]
fn test_identifier_columns_are_integers() {
    let stub = AtsStub::default().with_report("TS_PART_REP_LINE", &branch_workbook());
    let table = AtsReportKind::Branch
        .download_table(&ats_portal(&stub), date(), None)
        .unwrap();

    for column in ["node_from", "node_to", "branch_num", "hour"] {
        let values = table.column(column).unwrap();
        assert!(values.iter().all(|v| matches!(v, Value::Int(_))), "{}", column);
    }
}

#[test]
fn test_no_links_found_aborts() {
    let stub = AtsStub::default();
    let result = BranchReport.download(&ats_portal(&stub), date(), Some(date().succ_opt().unwrap()));

    match result {
        Err(EtlError::NoLinksFound { report_type, zone, .. }) => {
            assert_eq!(report_type, "TS_PART_REP_LINE");
            assert_eq!(zone, "eur");
        }
        other => panic!("Expected NoLinksFound, got {:?}", other),
    }
    assert_eq!(stub.index_requests().len(), 1);
}

#[test]
fn test_unknown_region_aborts() {
    let workbook = Workbook::new(vec![sheet(
        "0",
        3,
        vec![vec![n(1.0), t("ПС"), n(220.0), t("Атлантида"), n(1000.0), t("")]],
    )]);
    let stub = AtsStub::default().with_report("big_nodes_prices_pub", &workbook);

    match NodePriceReport.download(&ats_portal(&stub), date(), None) {
        Err(EtlError::Resolution(e)) => assert_eq!(e.name, "Атлантида"),
        other => panic!("Expected Resolution error, got {:?}", other),
    }
}

#[test]
fn test_dgu_report_table() {
    let mut unit = vec![n(7.0), t("ГТУ"), n(1001.0), t("")];
    unit.extend((0..120).map(|i| n(i as f64 / 2.0)));
    let workbook = Workbook::new(vec![sheet("Лист1", 7, vec![unit, vec![]])]);
    let stub = AtsStub::default().with_report("carana_sell_units", &workbook);

    let rows = DguVolumeReport.download(&ats_portal(&stub), date(), None).unwrap();
    // one unit, 24 hours, two zones
    assert_eq!(rows.len(), 48);

    let table = Table::from_rows(&rows);
    assert_eq!(table.columns().len(), <energo_reports::types::DguVolumeRow as TableRow>::COLUMNS.len());
    assert!(table.column("dgu_id").unwrap().iter().all(|v| **v == Value::Int(7)));
}

#[test]
fn test_section_report_duplicates_survive_download() {
    let row = |v: &str| vec![n(10.0), t("Сечение"), t(""), t(""), t(""), t("-100"), t("200"), t(v)];
    let workbook = Workbook::new(vec![sheet("0", 3, vec![row("200"), row("150")])]);
    let stub = AtsStub::default().with_report("overflow_sechen_all_pub", &workbook);

    let rows = SectionReport.download(&ats_portal(&stub), date(), None).unwrap();
    let flags: Vec<u8> = rows.iter().map(|r| r.is_active).collect();
    assert_eq!(flags, vec![1, 0, 1, 0]);
}
