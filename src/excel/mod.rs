//! Excel adapters
//!
//! - Import: roster worksheet (.xlsx) → Dataset
//! - Export: generated layouts → workbook (.xlsx) with Summary first

mod exporter;
mod importer;

pub use exporter::WorkbookExporter;
pub use importer::DatasetImporter;
