//! Whole-run generation pipeline
//!
//! Partition → classify → build one layout per ratio → aggregate. Every check
//! that can fail runs before the first layout is built, so a failed run never
//! yields a partial workbook.

use super::columns::{self, CandidateColumn};
use super::formula_chain::{FormulaChainBuilder, SheetLayout};
use super::ratios;
use super::summary::{SummaryAggregator, SummaryContext, SummarySheet};
use crate::error::RatioResult;
use crate::types::{Dataset, RatioSet, Service};
use tracing::{debug, info};

/// Everything the workbook exporter needs, apart from the input dataset
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWorkbook {
    pub ratios: RatioSet,
    pub service: Service,
    pub candidates: Vec<CandidateColumn>,
    pub max_candidate_sum: i64,
    /// Ratio sheets in ascending ratio order
    pub sheets: Vec<SheetLayout>,
    /// Inserted as the first worksheet
    pub summary: SummarySheet,
}

impl GeneratedWorkbook {
    /// Worksheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        std::iter::once(self.summary.name.clone())
            .chain(self.sheets.iter().map(|s| s.sheet_name.clone()))
            .collect()
    }
}

/// Generate every ratio sheet and the Summary for `start..=end`
pub fn generate(
    dataset: &Dataset,
    start: u32,
    end: u32,
    service: Service,
) -> RatioResult<GeneratedWorkbook> {
    let ratios = ratios::partition(start, end)?;
    let candidates = columns::classify_candidates(dataset.headers())?;
    let builder = FormulaChainBuilder::new(dataset, &candidates, service)?;
    let max_candidate_sum = columns::max_candidate_sum(dataset, &candidates);

    info!(
        ratios = ?ratios.as_slice(),
        candidates = candidates.len(),
        rows = dataset.row_count(),
        %service,
        "generating ratio sheets"
    );

    let sheets: Vec<SheetLayout> = ratios
        .iter()
        .map(|ratio| {
            let layout = builder.build(ratio);
            debug!(
                sheet = %layout.sheet_name,
                columns = layout.plan.total_columns(),
                "built ratio sheet layout"
            );
            layout
        })
        .collect();

    let aggregator = SummaryAggregator::new(SummaryContext {
        candidates: candidates.clone(),
        service,
        max_candidate_sum,
        total_candidate_position: builder.total_candidate_position(),
        plan: builder.plan(),
    });
    let summary = aggregator.aggregate(&sheets);

    Ok(GeneratedWorkbook {
        ratios,
        service,
        candidates,
        max_candidate_sum,
        sheets,
        summary,
    })
}
