use crate::error::{RatioError, RatioResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Cell Values
//==============================================================================

/// A scalar read from the input roster
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Empty,
}

impl CellValue {
    /// Numeric view of the cell, used when candidate counts are compared.
    ///
    /// Numeric text is parsed; anything else yields `None` so the caller can
    /// decide how to coerce it.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Content of an output cell.
///
/// Derived values are never evaluated here: they travel as formula text and
/// the spreadsheet engine that opens the workbook computes them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Literal(CellValue),
    /// Formula text including the leading `=`
    Formula(String),
}

impl CellContent {
    pub fn formula(text: impl Into<String>) -> Self {
        CellContent::Formula(text.into())
    }

    pub fn number(value: f64) -> Self {
        CellContent::Literal(CellValue::Number(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        CellContent::Literal(CellValue::Text(value.into()))
    }

    pub fn as_formula(&self) -> Option<&str> {
        match self {
            CellContent::Formula(f) => Some(f),
            CellContent::Literal(_) => None,
        }
    }
}

//==============================================================================
// Dataset
//==============================================================================

/// In-memory roster: ordered headers plus rows aligned to them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a dataset and check every row against the header width
    pub fn with_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> RatioResult<Self> {
        let mut dataset = Self::new(headers);
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> RatioResult<()> {
        if row.len() != self.headers.len() {
            return Err(RatioError::Import(format!(
                "Row {} has {} values, expected {}",
                self.rows.len() + 1,
                row.len(),
                self.headers.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn value(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Find a column by name after trimming and case-folding both sides.
    /// Returns the 0-based index of the first match.
    pub fn find_column_normalized(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers
            .iter()
            .position(|h| normalize_header(h) == wanted)
    }
}

fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase()
}

//==============================================================================
// Service
//==============================================================================

/// Operational service whose quantity mirrors the Tab column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Service {
    #[default]
    #[serde(rename = "IRIS", alias = "iris", alias = "Iris")]
    Iris,
    #[serde(rename = "FPS", alias = "fps", alias = "Fps")]
    Fps,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Iris, Service::Fps];

    /// Header used for the service column
    pub fn label(&self) -> &'static str {
        match self {
            Service::Iris => "IRIS",
            Service::Fps => "FPS",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Service {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Service::ALL
            .into_iter()
            .find(|svc| svc.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                RatioError::Config(format!(
                    "Unknown service '{}' (expected one of: IRIS, FPS)",
                    s
                ))
            })
    }
}

//==============================================================================
// Ratios
//==============================================================================

/// Ascending, duplicate-free ratios that always include both range endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatioSet(Vec<u32>);

impl RatioSet {
    /// Only the partitioner creates ratio sets, so the ordering invariant holds.
    pub(crate) fn from_sorted(ratios: Vec<u32>) -> Self {
        Self(ratios)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Worksheet name for one ratio
pub fn ratio_sheet_name(ratio: u32) -> String {
    format!("Ratio_{}", ratio)
}
