//! Derived-column formula chain for one ratio sheet
//!
//! Every ratio sheet is the input roster followed by the same derived columns:
//!
//! 1. one `<col> Opr` per candidate column
//! 2. `All-Day Max Opr`
//! 3. `Tab`
//! 4. the service column (`IRIS` / `FPS`)
//! 5. `OTG`
//! 6. `Hologram`
//! 7. `Id Card`
//! 8. `Jacket`
//!
//! Positions come from [`ColumnPlan`], which depends only on the input width
//! and the candidate count. The Summary aggregator uses the same plan, so it
//! never has to search a generated sheet.

use super::address::cell_address;
use super::columns::{self, CandidateColumn};
use crate::error::{RatioError, RatioResult};
use crate::types::{ratio_sheet_name, CellContent, Dataset, Service};

/// Sheet row holding the headers; data starts on the next row
pub const HEADER_ROW: u32 = 1;

/// Suffix appended to a candidate header to name its Opr column
pub const OPR_SUFFIX: &str = " Opr";

pub const ALL_DAY_MAX_OPR_HEADER: &str = "All-Day Max Opr";

//==============================================================================
// Column Plan
//==============================================================================

/// Single-instance derived columns, in the order they follow the Opr block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedSlot {
    AllDayMaxOpr,
    Tab,
    Service,
    Otg,
    Hologram,
    IdCard,
    Jacket,
}

impl DerivedSlot {
    pub const ORDER: [DerivedSlot; 7] = [
        DerivedSlot::AllDayMaxOpr,
        DerivedSlot::Tab,
        DerivedSlot::Service,
        DerivedSlot::Otg,
        DerivedSlot::Hologram,
        DerivedSlot::IdCard,
        DerivedSlot::Jacket,
    ];

    /// Offset of this slot after the last Opr column
    pub fn offset(self) -> u32 {
        match self {
            DerivedSlot::AllDayMaxOpr => 0,
            DerivedSlot::Tab => 1,
            DerivedSlot::Service => 2,
            DerivedSlot::Otg => 3,
            DerivedSlot::Hologram => 4,
            DerivedSlot::IdCard => 5,
            DerivedSlot::Jacket => 6,
        }
    }

    pub fn header(self, service: Service) -> String {
        match self {
            DerivedSlot::AllDayMaxOpr => ALL_DAY_MAX_OPR_HEADER.to_string(),
            DerivedSlot::Tab => "Tab".to_string(),
            DerivedSlot::Service => service.label().to_string(),
            DerivedSlot::Otg => "OTG".to_string(),
            DerivedSlot::Hologram => "Hologram".to_string(),
            DerivedSlot::IdCard => "Id Card".to_string(),
            DerivedSlot::Jacket => "Jacket".to_string(),
        }
    }
}

/// Fixed 1-based positions of every derived column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPlan {
    input_columns: u32,
    candidate_count: u32,
}

impl ColumnPlan {
    pub fn new(input_columns: usize, candidate_count: usize) -> Self {
        Self {
            input_columns: input_columns as u32,
            candidate_count: candidate_count as u32,
        }
    }

    /// Position of the first derived column
    pub fn first_derived(&self) -> u32 {
        self.input_columns + 1
    }

    /// Position of the Opr column for the `index`-th candidate (0-based)
    pub fn opr_position(&self, index: usize) -> u32 {
        self.first_derived() + index as u32
    }

    pub fn opr_positions(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.candidate_count as usize).map(|i| self.opr_position(i))
    }

    pub fn slot_position(&self, slot: DerivedSlot) -> u32 {
        self.first_derived() + self.candidate_count + slot.offset()
    }

    /// Total number of columns on a ratio sheet
    pub fn total_columns(&self) -> u32 {
        self.slot_position(DerivedSlot::Jacket)
    }

    pub fn candidate_count(&self) -> usize {
        self.candidate_count as usize
    }
}

//==============================================================================
// Derived Formulas
//==============================================================================

/// A derived column's formula with its dependency slots filled in.
///
/// All positions refer to columns on the same sheet; references stay on the
/// same row as the formula cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedFormula {
    /// `ROUNDUP(source/ratio,0)`
    Opr { source: u32, ratio: u32 },
    /// `MAX(opr1,opr2,...)`
    AllDayMaxOpr { oprs: Vec<u32> },
    /// Banded adjustment of All-Day Max Opr
    Tab { all_day_max: u32 },
    /// Copy of Tab
    Service { tab: u32 },
    /// Service × 2
    Otg { service: u32 },
    /// `ROUNDUP(total/100,0)+1`
    Hologram { total_candidate: u32 },
    /// All-Day Max Opr + 1
    IdCard { all_day_max: u32 },
    /// Copy of All-Day Max Opr
    Jacket { all_day_max: u32 },
}

impl DerivedFormula {
    /// Columns this formula reads
    pub fn dependencies(&self) -> Vec<u32> {
        match self {
            DerivedFormula::Opr { source, .. } => vec![*source],
            DerivedFormula::AllDayMaxOpr { oprs } => oprs.clone(),
            DerivedFormula::Tab { all_day_max }
            | DerivedFormula::IdCard { all_day_max }
            | DerivedFormula::Jacket { all_day_max } => vec![*all_day_max],
            DerivedFormula::Service { tab } => vec![*tab],
            DerivedFormula::Otg { service } => vec![*service],
            DerivedFormula::Hologram { total_candidate } => vec![*total_candidate],
        }
    }

    /// Formula text for one sheet row
    pub fn render(&self, row: u32) -> String {
        let at = |column: u32| cell_address(column, row);

        match self {
            DerivedFormula::Opr { source, ratio } => {
                format!("=ROUNDUP({}/{},0)", at(*source), ratio)
            }
            DerivedFormula::AllDayMaxOpr { oprs } => {
                let refs: Vec<String> = oprs.iter().map(|c| at(*c)).collect();
                format!("=MAX({})", refs.join(","))
            }
            DerivedFormula::Tab { all_day_max } => {
                let v = at(*all_day_max);
                format!(
                    "=IF({v}=0,0,IF(AND({v}>=8,{v}<16),{v}+2,IF({v}>15,{v}+3,{v}+1)))",
                    v = v
                )
            }
            DerivedFormula::Service { tab } => format!("={}", at(*tab)),
            DerivedFormula::Otg { service } => format!("={}*2", at(*service)),
            DerivedFormula::Hologram { total_candidate } => {
                format!("=ROUNDUP({}/100,0)+1", at(*total_candidate))
            }
            DerivedFormula::IdCard { all_day_max } => format!("={}+1", at(*all_day_max)),
            DerivedFormula::Jacket { all_day_max } => format!("={}", at(*all_day_max)),
        }
    }
}

/// One derived column bound to its sheet position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedColumn {
    pub header: String,
    pub position: u32,
    pub formula: DerivedFormula,
}

//==============================================================================
// Sheet Layout
//==============================================================================

/// Full column layout of one ratio sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub ratio: u32,
    pub sheet_name: String,
    /// Headers of the input columns, at positions `1..=input_headers.len()`
    pub input_headers: Vec<String>,
    pub derived: Vec<DerivedColumn>,
    pub plan: ColumnPlan,
    /// Number of data rows below the header
    pub row_count: usize,
}

impl SheetLayout {
    /// Every header in column order
    pub fn headers(&self) -> Vec<String> {
        self.input_headers
            .iter()
            .cloned()
            .chain(self.derived.iter().map(|d| d.header.clone()))
            .collect()
    }

    /// Sheet row number of the `index`-th data row (0-based)
    pub fn sheet_row(index: usize) -> u32 {
        HEADER_ROW + 1 + index as u32
    }

    pub fn derived_at(&self, position: u32) -> Option<&DerivedColumn> {
        self.derived.iter().find(|d| d.position == position)
    }

    /// Cells of one data row: input literals followed by derived formulas
    pub fn row_cells(&self, dataset: &Dataset, index: usize) -> Vec<CellContent> {
        let row = Self::sheet_row(index);
        let literals = dataset
            .rows()
            .get(index)
            .into_iter()
            .flatten()
            .map(|v| CellContent::Literal(v.clone()));
        let formulas = self
            .derived
            .iter()
            .map(|d| CellContent::Formula(d.formula.render(row)));
        literals.chain(formulas).collect()
    }

    /// True when positions are contiguous after the input columns and every
    /// formula only reads columns placed before it.
    pub fn is_dependency_ordered(&self) -> bool {
        let mut expected = self.input_headers.len() as u32 + 1;
        for column in &self.derived {
            if column.position != expected {
                return false;
            }
            if column
                .formula
                .dependencies()
                .iter()
                .any(|dep| *dep == 0 || *dep >= column.position)
            {
                return false;
            }
            expected += 1;
        }
        true
    }
}

//==============================================================================
// Builder
//==============================================================================

/// Builds ratio sheet layouts for one dataset and service
pub struct FormulaChainBuilder<'a> {
    dataset: &'a Dataset,
    candidates: &'a [CandidateColumn],
    service: Service,
    total_candidate: u32,
    plan: ColumnPlan,
}

impl<'a> FormulaChainBuilder<'a> {
    /// Resolve the columns every sheet depends on.
    ///
    /// Fails before any sheet is built when there are no candidate columns or
    /// the "Total Candidate" column is missing.
    pub fn new(
        dataset: &'a Dataset,
        candidates: &'a [CandidateColumn],
        service: Service,
    ) -> RatioResult<Self> {
        if candidates.is_empty() {
            return Err(RatioError::NoCandidateColumns);
        }
        let total_candidate = columns::find_total_candidate(dataset)? as u32 + 1;

        Ok(Self {
            dataset,
            candidates,
            service,
            total_candidate,
            plan: ColumnPlan::new(dataset.column_count(), candidates.len()),
        })
    }

    pub fn plan(&self) -> ColumnPlan {
        self.plan
    }

    /// 1-based position of the "Total Candidate" input column
    pub fn total_candidate_position(&self) -> u32 {
        self.total_candidate
    }

    /// Derived columns for one ratio, in dependency order
    pub fn derived_columns(&self, ratio: u32) -> Vec<DerivedColumn> {
        let plan = self.plan;
        let mut derived = Vec::with_capacity(self.candidates.len() + DerivedSlot::ORDER.len());

        for (i, candidate) in self.candidates.iter().enumerate() {
            derived.push(DerivedColumn {
                header: format!("{}{}", candidate.header, OPR_SUFFIX),
                position: plan.opr_position(i),
                formula: DerivedFormula::Opr {
                    source: candidate.index as u32 + 1,
                    ratio,
                },
            });
        }

        let all_day_max = plan.slot_position(DerivedSlot::AllDayMaxOpr);
        for slot in DerivedSlot::ORDER {
            let formula = match slot {
                DerivedSlot::AllDayMaxOpr => DerivedFormula::AllDayMaxOpr {
                    oprs: plan.opr_positions().collect(),
                },
                DerivedSlot::Tab => DerivedFormula::Tab { all_day_max },
                DerivedSlot::Service => DerivedFormula::Service {
                    tab: plan.slot_position(DerivedSlot::Tab),
                },
                DerivedSlot::Otg => DerivedFormula::Otg {
                    service: plan.slot_position(DerivedSlot::Service),
                },
                DerivedSlot::Hologram => DerivedFormula::Hologram {
                    total_candidate: self.total_candidate,
                },
                DerivedSlot::IdCard => DerivedFormula::IdCard { all_day_max },
                DerivedSlot::Jacket => DerivedFormula::Jacket { all_day_max },
            };
            derived.push(DerivedColumn {
                header: slot.header(self.service),
                position: plan.slot_position(slot),
                formula,
            });
        }

        derived
    }

    /// Full layout of the `Ratio_<ratio>` sheet
    pub fn build(&self, ratio: u32) -> SheetLayout {
        let layout = SheetLayout {
            ratio,
            sheet_name: ratio_sheet_name(ratio),
            input_headers: self.dataset.headers().to_vec(),
            derived: self.derived_columns(ratio),
            plan: self.plan,
            row_count: self.dataset.row_count(),
        };
        debug_assert!(layout.is_dependency_ordered());
        layout
    }
}
