//! Workbook exporter - GeneratedWorkbook → Excel (.xlsx)

use crate::core::{GeneratedWorkbook, SheetLayout, SummarySheet};
use crate::error::{RatioError, RatioResult};
use crate::types::{CellContent, CellValue, Dataset};
use rust_xlsxwriter::{Color, Format, FormatAlign, Formula, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

/// Fill colour of the Summary header row
const SUMMARY_HEADER_FILL: u32 = 0x1F4E78;

/// Writes the Summary sheet followed by every ratio sheet
pub struct WorkbookExporter<'a> {
    dataset: &'a Dataset,
    generated: &'a GeneratedWorkbook,
}

impl<'a> WorkbookExporter<'a> {
    pub fn new(dataset: &'a Dataset, generated: &'a GeneratedWorkbook) -> Self {
        Self { dataset, generated }
    }

    /// Export to an .xlsx file
    pub fn export(&self, output_path: &Path) -> RatioResult<()> {
        let mut workbook = self.build()?;
        workbook
            .save(output_path)
            .map_err(|e| RatioError::Export(format!("Failed to save Excel file: {}", e)))?;

        info!(
            path = %output_path.display(),
            sheets = self.generated.sheets.len() + 1,
            "workbook written"
        );
        Ok(())
    }

    /// Export to an in-memory .xlsx buffer
    pub fn export_to_buffer(&self) -> RatioResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| RatioError::Export(format!("Failed to serialize workbook: {}", e)))
    }

    fn build(&self) -> RatioResult<Workbook> {
        let mut workbook = Workbook::new();

        self.write_summary(&mut workbook, &self.generated.summary)?;
        for layout in &self.generated.sheets {
            self.write_ratio_sheet(&mut workbook, layout)?;
        }

        Ok(workbook)
    }

    fn write_summary(&self, workbook: &mut Workbook, summary: &SummarySheet) -> RatioResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&summary.name)
            .map_err(|e| RatioError::Export(format!("Failed to set worksheet name: {}", e)))?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(SUMMARY_HEADER_FILL))
            .set_align(FormatAlign::Center);

        for (col_idx, header) in summary.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, Self::column(col_idx)?, header, &header_format)
                .map_err(|e| RatioError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (row_idx, row) in summary.rows.iter().enumerate() {
            let sheet_row = Self::row(row_idx + 1)?;
            for (col_idx, cell) in row.cells.iter().enumerate() {
                Self::write_cell(worksheet, sheet_row, Self::column(col_idx)?, cell)?;
            }
        }

        Ok(())
    }

    fn write_ratio_sheet(&self, workbook: &mut Workbook, layout: &SheetLayout) -> RatioResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&layout.sheet_name)
            .map_err(|e| RatioError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for (col_idx, header) in layout.headers().iter().enumerate() {
            worksheet
                .write_string(0, Self::column(col_idx)?, header)
                .map_err(|e| RatioError::Export(format!("Failed to write header: {}", e)))?;
        }

        for row_idx in 0..layout.row_count {
            let sheet_row = Self::row(row_idx + 1)?;
            for (col_idx, cell) in layout.row_cells(self.dataset, row_idx).iter().enumerate() {
                Self::write_cell(worksheet, sheet_row, Self::column(col_idx)?, cell)?;
            }
        }

        Ok(())
    }

    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        cell: &CellContent,
    ) -> RatioResult<()> {
        let result = match cell {
            CellContent::Formula(text) => worksheet.write_formula(row, col, Formula::new(text)),
            CellContent::Literal(CellValue::Number(n)) => worksheet.write_number(row, col, *n),
            CellContent::Literal(CellValue::Text(s)) => worksheet.write_string(row, col, s),
            CellContent::Literal(CellValue::Boolean(b)) => worksheet.write_boolean(row, col, *b),
            CellContent::Literal(CellValue::Empty) => return Ok(()),
        };
        result
            .map(|_| ())
            .map_err(|e| RatioError::Export(format!("Failed to write cell ({}, {}): {}", row, col, e)))
    }

    fn row(index: usize) -> RatioResult<u32> {
        u32::try_from(index)
            .map_err(|_| RatioError::Export(format!("Row {} is beyond the worksheet limit", index)))
    }

    fn column(index: usize) -> RatioResult<u16> {
        u16::try_from(index).map_err(|_| {
            RatioError::Export(format!("Column {} is beyond the worksheet limit", index))
        })
    }
}
