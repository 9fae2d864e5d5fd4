//! Summary aggregation and whole-pipeline tests

mod common;

use common::{cells, evaluate, roster_dataset};
use pretty_assertions::assert_eq;
use royalbit_ratio_forge::core::address::{column_letter, column_position};
use royalbit_ratio_forge::core::generate;
use royalbit_ratio_forge::types::{CellContent, CellValue, Dataset, Service};
use royalbit_ratio_forge::RatioError;

/// Split `=SUM('Ratio_51'!G:G)` into ("SUM", "Ratio_51", "G")
fn parse_aggregate(formula: &str) -> (String, String, String) {
    let body = formula.trim_start_matches('=');
    let (func, rest) = body.split_once("('").unwrap();
    let (sheet, range) = rest.split_once("'!").unwrap();
    let column = range.trim_end_matches(')').split(':').next().unwrap();
    (func.to_string(), sheet.to_string(), column.to_string())
}

#[test]
fn test_summary_rows_cover_every_ratio() {
    let ds = roster_dataset();
    let wb = generate(&ds, 10, 37, Service::Iris).unwrap();

    let labels: Vec<CellContent> = wb.summary.rows.iter().map(|r| r.cells[0].clone()).collect();
    let expected: Vec<CellContent> = [10, 15, 20, 25, 30, 35, 37]
        .iter()
        .map(|r| CellContent::text(format!("{}-{}", r, r)))
        .collect();
    assert_eq!(labels, expected);
}

#[test]
fn test_aggregates_point_at_matching_sheet_columns() {
    let ds = roster_dataset();
    let wb = generate(&ds, 51, 61, Service::Fps).unwrap();

    for (row, layout) in wb.summary.rows.iter().zip(&wb.sheets) {
        let sheet_headers = layout.headers();

        for (col, cell) in row.cells.iter().enumerate().skip(4) {
            let header = &wb.summary.headers[col];
            if header == "Avg" {
                continue;
            }
            let (func, sheet, letters) = parse_aggregate(cell.as_formula().unwrap());
            assert_eq!(func, "SUM");
            assert_eq!(sheet, layout.sheet_name);
            let position = column_position(&letters).unwrap() as usize;
            assert_eq!(&sheet_headers[position - 1], header);
        }

        let (func, sheet, letters) = parse_aggregate(row.cells[1].as_formula().unwrap());
        assert_eq!((func.as_str(), sheet.as_str()), ("COUNT", layout.sheet_name.as_str()));
        assert_eq!(letters, column_letter(6));
        assert_eq!(sheet_headers[5], "Total Candidate");
    }
}

#[test]
fn test_max_candidate_is_constant_across_ratios() {
    let ds = roster_dataset();
    let wb = generate(&ds, 5, 60, Service::Iris).unwrap();

    // max(120, 80) + max(0, 45) + max(408, 350)
    assert_eq!(wb.max_candidate_sum, 573);
    for row in &wb.summary.rows {
        assert_eq!(row.cells[3], CellContent::number(573.0));
    }
}

#[test]
fn test_avg_guard_yields_zero_without_opr() {
    let ds = roster_dataset();
    let wb = generate(&ds, 51, 51, Service::Iris).unwrap();
    let avg = wb.summary.rows[0].cells.last().unwrap().as_formula().unwrap();
    assert_eq!(avg, "=IFERROR(ROUNDUP(D2/G2,0),0)");

    assert_eq!(evaluate(avg, &cells(&[("D2", 573.0), ("G2", 0.0)])).unwrap(), 0.0);
    assert_eq!(evaluate(avg, &cells(&[("D2", 573.0), ("G2", 12.0)])).unwrap(), 48.0);
    assert_eq!(evaluate(avg, &cells(&[("D2", 0.0), ("G2", 0.0)])).unwrap(), 0.0);
}

#[test]
fn test_generation_is_idempotent() {
    let ds = roster_dataset();
    let first = generate(&ds, 51, 61, Service::Iris).unwrap();
    let second = generate(&ds, 51, 61, Service::Iris).unwrap();

    assert_eq!(first.sheet_names(), second.sheet_names());
    assert_eq!(first.summary, second.summary);
    for (a, b) in first.sheets.iter().zip(&second.sheets) {
        assert_eq!(a.headers(), b.headers());
        for index in 0..ds.row_count() {
            assert_eq!(a.row_cells(&ds, index), b.row_cells(&ds, index));
        }
    }
}

#[test]
fn test_service_label_flows_to_both_sheets() {
    let ds = roster_dataset();
    let wb = generate(&ds, 51, 51, Service::Fps).unwrap();
    assert!(wb.summary.headers.iter().any(|h| h == "FPS"));
    assert!(wb.sheets[0].headers().iter().any(|h| h == "FPS"));
    assert!(!wb.summary.headers.iter().any(|h| h == "IRIS"));
}

#[test]
fn test_missing_total_candidate_rejected_for_any_range() {
    let ds = Dataset::with_rows(
        vec!["Jan 1".to_string(), "Jan 2".to_string()],
        vec![vec![CellValue::Number(1.0), CellValue::Number(2.0)]],
    )
    .unwrap();

    for (start, end) in [(1, 1), (51, 61), (10, 37)] {
        let err = generate(&ds, start, end, Service::Iris).unwrap_err();
        assert!(matches!(err, RatioError::MissingColumn(ref c) if c == "Total Candidate"));
    }
}
