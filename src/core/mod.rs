//! Ratio workbook generation core
//!
//! Pure transformations only: nothing here reads files or evaluates formulas.

pub mod address;
pub mod columns;
pub mod formula_chain;
pub mod generator;
pub mod ratios;
pub mod summary;

pub use columns::CandidateColumn;
pub use formula_chain::{
    ColumnPlan, DerivedColumn, DerivedFormula, DerivedSlot, FormulaChainBuilder, SheetLayout,
};
pub use generator::{generate, GeneratedWorkbook};
pub use summary::{SummaryAggregator, SummaryContext, SummaryRow, SummarySheet};
