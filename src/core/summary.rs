//! Cross-sheet Summary aggregation
//!
//! One row per ratio sheet. Aggregates are whole-column formulas that point at
//! positions taken from the shared [`ColumnPlan`], never at a header lookup.

use super::address::{cell_address, column_range, sheet_reference};
use super::columns::{CandidateColumn, TOTAL_CANDIDATE_HEADER};
use super::formula_chain::{ColumnPlan, DerivedSlot, SheetLayout, HEADER_ROW, OPR_SUFFIX};
use crate::types::{CellContent, Service};

pub const SUMMARY_SHEET_NAME: &str = "Summary";

/// Leading Summary columns before the Opr block
const LEADING_HEADERS: [&str; 4] = ["Range", "Total Center", TOTAL_CANDIDATE_HEADER, "Max Candidate"];

const MAX_CANDIDATE_COLUMN: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub ratio: u32,
    pub cells: Vec<CellContent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummarySheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

/// Run-wide inputs shared by every Summary row
#[derive(Debug, Clone)]
pub struct SummaryContext {
    pub candidates: Vec<CandidateColumn>,
    pub service: Service,
    /// Ratio-independent constant repeated on every row
    pub max_candidate_sum: i64,
    /// 1-based position of "Total Candidate" on every ratio sheet
    pub total_candidate_position: u32,
    pub plan: ColumnPlan,
}

pub struct SummaryAggregator {
    context: SummaryContext,
}

impl SummaryAggregator {
    pub fn new(context: SummaryContext) -> Self {
        Self { context }
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = LEADING_HEADERS.iter().map(|h| h.to_string()).collect();
        headers.extend(
            self.context
                .candidates
                .iter()
                .map(|c| format!("{}{}", c.header, OPR_SUFFIX)),
        );
        headers.extend(
            DerivedSlot::ORDER
                .iter()
                .map(|slot| slot.header(self.context.service)),
        );
        headers.push("Avg".to_string());
        headers
    }

    /// Summary column holding the All-Day Max Opr sum
    fn all_day_max_column(&self) -> u32 {
        LEADING_HEADERS.len() as u32 + 1 + self.context.candidates.len() as u32
    }

    /// Build one Summary row; `row` is its 1-based row on the Summary sheet
    pub fn row(&self, layout: &SheetLayout, row: u32) -> SummaryRow {
        let ctx = &self.context;
        let sheet = &layout.sheet_name;
        let whole_column = |column: u32| sheet_reference(sheet, &column_range(column));
        let sum = |column: u32| CellContent::formula(format!("=SUM({})", whole_column(column)));

        let mut cells = vec![
            CellContent::text(format!("{}-{}", layout.ratio, layout.ratio)),
            CellContent::formula(format!(
                "=COUNT({})",
                whole_column(ctx.total_candidate_position)
            )),
            sum(ctx.total_candidate_position),
            CellContent::number(ctx.max_candidate_sum as f64),
        ];

        cells.extend(ctx.plan.opr_positions().map(&sum));
        cells.extend(
            DerivedSlot::ORDER
                .iter()
                .map(|slot| sum(ctx.plan.slot_position(*slot))),
        );

        cells.push(CellContent::formula(format!(
            "=IFERROR(ROUNDUP({}/{},0),0)",
            cell_address(MAX_CANDIDATE_COLUMN, row),
            cell_address(self.all_day_max_column(), row)
        )));

        SummaryRow {
            ratio: layout.ratio,
            cells,
        }
    }

    /// Summary sheet covering every ratio sheet, in the given order
    pub fn aggregate(&self, layouts: &[SheetLayout]) -> SummarySheet {
        let rows = layouts
            .iter()
            .enumerate()
            .map(|(i, layout)| self.row(layout, HEADER_ROW + 1 + i as u32))
            .collect();

        SummarySheet {
            name: SUMMARY_SHEET_NAME.to_string(),
            headers: self.headers(),
            rows,
        }
    }
}
