//! Job configuration
//!
//! A job can come from a YAML file, from command-line flags, or both. Flags
//! win over the file.
//!
//! ```yaml
//! range: 51-61
//! service: IRIS
//! output: cbse_multiple_ratio
//! sheet: Sheet1
//! ```

use crate::core::ratios::parse_range;
use crate::error::{RatioError, RatioResult};
use crate::types::Service;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_NAME: &str = "cbse_multiple_ratio";
pub const DEFAULT_SHEET: &str = "Sheet1";

/// Partially specified job, as read from a file or flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

impl JobConfig {
    pub fn load(path: &Path) -> RatioResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Fill in anything `overrides` leaves unset from `self`
    pub fn merged_with(self, overrides: JobConfig) -> JobConfig {
        JobConfig {
            range: overrides.range.or(self.range),
            service: overrides.service.or(self.service),
            output: overrides.output.or(self.output),
            sheet: overrides.sheet.or(self.sheet),
        }
    }

    pub fn resolve(self) -> RatioResult<GenerationConfig> {
        let range = self
            .range
            .ok_or_else(|| RatioError::InvalidRange("a ratio range is required".to_string()))?;
        let (start, end) = parse_range(&range)?;

        let output_name = match self.output {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => DEFAULT_OUTPUT_NAME.to_string(),
        };

        Ok(GenerationConfig {
            start,
            end,
            service: self.service.unwrap_or_default(),
            output_name,
            sheet: self.sheet.unwrap_or_else(|| DEFAULT_SHEET.to_string()),
        })
    }
}

/// Fully resolved job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub start: u32,
    pub end: u32,
    pub service: Service,
    pub output_name: String,
    /// Input worksheet holding the roster
    pub sheet: String,
}

impl GenerationConfig {
    /// Output path with the `.xlsx` extension ensured
    pub fn output_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.output_name);
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => path,
            _ => PathBuf::from(format!("{}.xlsx", self.output_name)),
        }
    }
}
