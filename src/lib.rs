//! Ratio Forge - multi-ratio staffing workbooks
//!
//! Converts a roster of per-slot exam-candidate counts into a workbook with
//! one sheet per candidate-to-invigilator ratio and a Summary sheet that
//! aggregates them.
//!
//! # Features
//!
//! - Ratio ranges sampled every 5, both endpoints always included
//! - Month-named candidate column detection
//! - Derived columns (Opr, All-Day Max Opr, Tab, service, OTG, Hologram,
//!   Id Card, Jacket) emitted as Excel formulas, never pre-computed
//! - Cross-sheet Summary with guarded averages
//! - Excel import/export
//!
//! # Example
//!
//! ```no_run
//! use royalbit_ratio_forge::core::generate;
//! use royalbit_ratio_forge::excel::{DatasetImporter, WorkbookExporter};
//! use royalbit_ratio_forge::types::Service;
//! use std::path::Path;
//!
//! let dataset = DatasetImporter::new("roster.xlsx").import()?;
//! let workbook = generate(&dataset, 51, 61, Service::Iris)?;
//!
//! println!("Sheets: {:?}", workbook.sheet_names());
//!
//! WorkbookExporter::new(&dataset, &workbook).export(Path::new("ratios.xlsx"))?;
//! # Ok::<(), royalbit_ratio_forge::error::RatioError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{RatioError, RatioResult};
pub use types::{CellContent, CellValue, Dataset, RatioSet, Service};
