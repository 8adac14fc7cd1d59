use super::ExportError;
use crate::model::professor::{ProfessorRecord, COLUMN_LABELS};
use log::info;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

/// Worksheet name used by exports.
pub const EXPORT_SHEET_NAME: &str = "Professors";

const COLUMN_WIDTH: f64 = 28.0;

/// Writes `records` to an XLSX file at `path`, in the given order.
pub fn write_xlsx(path: impl AsRef<Path>, records: &[ProfessorRecord]) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = build_workbook(records)?;
    workbook.save(path)?;
    info!(
        "event=export_xlsx module=sheet status=ok mode=file rows={}",
        records.len()
    );
    Ok(())
}

/// Renders `records` as XLSX bytes for download-style callers.
pub fn xlsx_bytes(records: &[ProfessorRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(records)?;
    let bytes = workbook.save_to_buffer()?;
    info!(
        "event=export_xlsx module=sheet status=ok mode=buffer rows={} bytes={}",
        records.len(),
        bytes.len()
    );
    Ok(bytes)
}

fn build_workbook(records: &[ProfessorRecord]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, label) in (0u16..).zip(COLUMN_LABELS) {
        worksheet.write_string_with_format(0, col, label, &header_format)?;
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }
    for (row, record) in (1u32..).zip(records) {
        for (col, cell) in (0u16..).zip(record.cells()) {
            worksheet.write_string(row, col, cell)?;
        }
    }

    Ok(workbook)
}
