//! Roster importer - Excel (.xlsx) → Dataset

use crate::config::DEFAULT_SHEET;
use crate::error::{RatioError, RatioResult};
use crate::types::{CellValue, Dataset};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads one worksheet of an .xlsx file into a [`Dataset`]
pub struct DatasetImporter {
    path: PathBuf,
    sheet: String,
}

impl DatasetImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: DEFAULT_SHEET.to_string(),
        }
    }

    /// Read from `sheet` instead of `Sheet1`
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = sheet.into();
        self
    }

    pub fn import(&self) -> RatioResult<Dataset> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            RatioError::Import(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if !workbook.sheet_names().iter().any(|s| s == &self.sheet) {
            return Err(RatioError::Import(format!(
                "Worksheet '{}' not found (available: {})",
                self.sheet,
                workbook.sheet_names().join(", ")
            )));
        }

        let range = workbook
            .worksheet_range(&self.sheet)
            .map_err(|e| RatioError::Import(format!("Failed to read '{}': {}", self.sheet, e)))?;

        let dataset = Self::range_to_dataset(&range)?;
        debug!(
            sheet = %self.sheet,
            columns = dataset.column_count(),
            rows = dataset.row_count(),
            "imported roster"
        );
        Ok(dataset)
    }

    /// First row is the header row; short rows are padded with empty cells
    fn range_to_dataset(range: &Range<Data>) -> RatioResult<Dataset> {
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| RatioError::Import("Worksheet is empty".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(col, cell)| Self::header_name(cell, col))
            .collect();

        let mut dataset = Dataset::new(headers);
        for row in rows {
            let mut values: Vec<CellValue> = row.iter().map(Self::convert_cell).collect();
            values.resize(dataset.column_count(), CellValue::Empty);
            // Rows that are blank all the way across are not roster entries
            if values.iter().all(CellValue::is_empty) {
                continue;
            }
            dataset.push_row(values)?;
        }
        Ok(dataset)
    }

    fn header_name(cell: &Data, col: usize) -> String {
        match cell {
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => f.to_string(),
            Data::Bool(b) => b.to_string(),
            Data::DateTimeIso(s) => s.clone(),
            _ => format!("Unnamed: {}", col),
        }
    }

    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
            Data::Empty => CellValue::Empty,
        }
    }
}
