//! Ratio range partitioning
//!
//! A range `start-end` is sampled every [`RATIO_STEP`] starting at `start`.
//! `end` is appended when the stepping does not land on it, so both
//! boundaries always get a sheet.

use crate::error::{RatioError, RatioResult};
use crate::types::RatioSet;

/// Distance between consecutive sampled ratios
pub const RATIO_STEP: u32 = 5;

/// Partition `start..=end` into sampled ratios
///
/// Examples:
/// - `(51, 61)` → `[51, 56, 61]`
/// - `(50, 50)` → `[50]`
/// - `(10, 37)` → `[10, 15, 20, 25, 30, 35, 37]`
pub fn partition(start: u32, end: u32) -> RatioResult<RatioSet> {
    if start == 0 {
        return Err(RatioError::InvalidRange(
            "ratio must be a positive integer".to_string(),
        ));
    }
    if start > end {
        return Err(RatioError::InvalidRange(format!(
            "start {} is greater than end {}",
            start, end
        )));
    }

    let mut ratios: Vec<u32> = (start..=end).step_by(RATIO_STEP as usize).collect();
    if ratios.last() != Some(&end) {
        ratios.push(end);
    }

    Ok(RatioSet::from_sorted(ratios))
}

/// Parse range text of the form `51-61`
pub fn parse_range(text: &str) -> RatioResult<(u32, u32)> {
    let malformed = || RatioError::InvalidRange(format!("'{}': Ratio must be like 51-61", text));

    let (start, end) = text.trim().split_once('-').ok_or_else(malformed)?;
    let start = start.trim().parse::<u32>().map_err(|_| malformed())?;
    let end = end.trim().parse::<u32>().map_err(|_| malformed())?;

    Ok((start, end))
}
