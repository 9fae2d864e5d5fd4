//! Input column classification
//!
//! Candidate columns are per-slot candidate counts: their header contains a
//! month abbreviation and does not contain `Total`. Matching is a plain
//! case-sensitive substring test, with the exclusion applied after the
//! month match.

use crate::error::{RatioError, RatioResult};
use crate::types::Dataset;
use tracing::warn;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Headers containing this token are never candidate columns
pub const EXCLUDED_TOKEN: &str = "Total";

/// Column holding the per-centre candidate total
pub const TOTAL_CANDIDATE_HEADER: &str = "Total Candidate";

/// An input column selected for ratio division
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateColumn {
    pub header: String,
    /// 0-based index into the dataset headers
    pub index: usize,
}

/// Check a single header against the month vocabulary and the exclusion rule
pub fn is_candidate_header(header: &str) -> bool {
    MONTHS.iter().any(|m| header.contains(m)) && !header.contains(EXCLUDED_TOKEN)
}

/// Select candidate columns, preserving header order
pub fn classify_candidates(headers: &[String]) -> RatioResult<Vec<CandidateColumn>> {
    let candidates: Vec<CandidateColumn> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| is_candidate_header(h))
        .map(|(index, header)| CandidateColumn {
            header: header.clone(),
            index,
        })
        .collect();

    if candidates.is_empty() {
        return Err(RatioError::NoCandidateColumns);
    }
    Ok(candidates)
}

/// Locate the "Total Candidate" column (trimmed, case-insensitive)
pub fn find_total_candidate(dataset: &Dataset) -> RatioResult<usize> {
    dataset
        .find_column_normalized(TOTAL_CANDIDATE_HEADER)
        .ok_or_else(|| RatioError::MissingColumn(TOTAL_CANDIDATE_HEADER.to_string()))
}

/// Sum over all rows of the largest candidate count in that row.
///
/// Values that are not numeric count as 0. The total is truncated to an
/// integer. It does not depend on the ratio, so it is computed once per run.
pub fn max_candidate_sum(dataset: &Dataset, candidates: &[CandidateColumn]) -> i64 {
    let mut coerced = 0usize;

    let total: f64 = dataset
        .rows()
        .iter()
        .map(|row| {
            candidates
                .iter()
                .map(|c| match row.get(c.index) {
                    Some(value) => value.as_number().unwrap_or_else(|| {
                        if !value.is_empty() {
                            coerced += 1;
                        }
                        0.0
                    }),
                    None => 0.0,
                })
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .filter(|m| m.is_finite())
        .sum();

    if coerced > 0 {
        warn!(coerced, "non-numeric candidate values counted as 0");
    }

    total.trunc() as i64
}
