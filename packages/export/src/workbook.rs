//! XLSX output via `rust_xlsxwriter`.

use std::path::Path;

use ethics_extract_contribution_models::ContributionRecord;
use rust_xlsxwriter::{Format, Workbook};

use crate::{COLUMNS, ExportError, export_row};

/// Worksheet name used for the single exported sheet.
pub const SHEET_NAME: &str = "Schedule_A1";

/// Excel number format applied to the Date column.
pub const DATE_NUM_FORMAT: &str = "mm/dd/yyyy";

/// Builds a workbook with a bold header row and one row per record.
///
/// Dates are written as real date cells. A date that is not a real
/// calendar day leaves its cell blank.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if a cell cannot be written.
pub fn build_workbook(records: &[ContributionRecord]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    sheet.set_column_width(0, 12)?;

    for (col, title) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, record) in (1u32..).zip(records) {
        if let Some(date) = record.parsed_date() {
            sheet.write_date_with_format(row, 0, &date, &date_format)?;
        }

        for (col, value) in (1u16..).zip(export_row(record).into_iter().skip(1)) {
            sheet.write_string(row, col, value)?;
        }
    }

    sheet.set_freeze_panes(1, 0)?;

    Ok(workbook)
}

/// Writes `records` to a new workbook at `path`.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be built or saved.
pub fn write_xlsx(records: &[ContributionRecord], path: &Path) -> Result<(), ExportError> {
    let mut workbook = build_workbook(records)?;
    workbook.save(path)?;
    Ok(())
}
