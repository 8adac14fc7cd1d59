use super::{ImportError, SheetFormat};
use crate::store::merge::RawRow;
use calamine::{open_workbook_auto, Reader};
use log::{error, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// Reads an import file into raw rows, picking the parser by extension.
///
/// # Side effects
/// - Emits `import_read` logging events with format, row count and duration.
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<RawRow>, ImportError> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let format = SheetFormat::from_path(path)?;
    info!("event=import_read module=sheet status=start format={format:?}");

    let result = match format {
        SheetFormat::Csv => File::open(path)
            .map_err(ImportError::from)
            .and_then(read_csv_rows),
        SheetFormat::Workbook => read_workbook_rows(path),
    };

    match &result {
        Ok(rows) => info!(
            "event=import_read module=sheet status=ok format={format:?} rows={} duration_ms={}",
            rows.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=import_read module=sheet status=error format={format:?} duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Parses CSV text with a header row. Ragged rows are tolerated.
pub fn read_csv_rows<R: Read>(input: R) -> Result<Vec<RawRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();
    let headers = headers.iter().collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let values = record.iter().collect::<Vec<_>>();
        rows.push(RawRow::from_cells(&headers, &values));
    }
    Ok(rows)
}

/// Parses the first worksheet of an XLSX/XLS/ODS workbook.
///
/// The first non-empty row of the sheet is the header.
pub fn read_workbook_rows(path: impl AsRef<Path>) -> Result<Vec<RawRow>, ImportError> {
    let mut workbook = open_workbook_auto(path.as_ref())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyWorkbook)??;

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(cells) => cells.iter().map(ToString::to_string).collect::<Vec<_>>(),
        None => return Err(ImportError::EmptyWorkbook),
    };

    Ok(sheet_rows
        .map(|cells| {
            let values = cells.iter().map(ToString::to_string).collect::<Vec<_>>();
            RawRow::from_cells(&headers, &values)
        })
        .collect())
}
