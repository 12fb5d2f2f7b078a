use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use std::borrow::Cow;
use std::path::Path;
use thiserror::Error;

use crate::dashboard::filter::DateRange;
use crate::database::Lead;

/// Column order of the exported sheet
pub const EXPORT_HEADERS: [&str; 6] = ["ID", "Name", "Phone", "Email", "Model", "Date"];

/// Longest text a single xlsx cell accepts
pub const MAX_CELL_CHARS: usize = 32_767;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export.")]
    NoData,

    #[error("No data found for selected date range.")]
    EmptyRange,

    #[error("spreadsheet error: {0}")]
    Workbook(#[from] XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One exported line. `id` restarts at 1 within the exported set and is
/// unrelated to the on-screen row numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub id: usize,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub model: String,
    pub date: String,
}

/// Filter the full lead list by `range` and shape the export rows
pub fn build_export(leads: &[Lead], range: &DateRange) -> Result<Vec<ExportRow>, ExportError> {
    if leads.is_empty() {
        return Err(ExportError::NoData);
    }

    let rows: Vec<ExportRow> = leads
        .iter()
        .filter(|lead| range.contains(&lead.created_at))
        .enumerate()
        .map(|(index, lead)| ExportRow {
            id: index + 1,
            name: lead.name.clone(),
            phone: lead.mobile.clone(),
            email: lead.email.clone(),
            model: lead.model.clone(),
            date: lead.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    if rows.is_empty() {
        return Err(ExportError::EmptyRange);
    }
    Ok(rows)
}

/// Render rows into a single-sheet workbook held in memory
pub fn write_workbook(rows: &[ExportRow], sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut workbook = fill_workbook(rows, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

/// Render rows into a single-sheet workbook on disk
pub fn save_workbook(rows: &[ExportRow], sheet_name: &str, path: &Path) -> Result<(), ExportError> {
    let mut workbook = fill_workbook(rows, sheet_name)?;
    workbook.save(path)?;
    Ok(())
}

fn fill_workbook(rows: &[ExportRow], sheet_name: &str) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let header_format = Format::new().set_bold();
    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    let mut widths: Vec<usize> = EXPORT_HEADERS.iter().map(|h| h.len()).collect();

    for (index, row) in rows.iter().enumerate() {
        let line = (index + 1) as u32;
        worksheet.write_number(line, 0, row.id as f64)?;

        let texts = [&row.name, &row.phone, &row.email, &row.model, &row.date];
        for (offset, text) in texts.iter().enumerate() {
            let col = offset + 1;
            let text = cell_text(text);
            worksheet.write_string(line, col as u16, text.as_ref())?;
            widths[col] = widths[col].max(text.chars().count());
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64 + 2.0)?;
    }

    Ok(workbook)
}

/// Cut text down to what a cell can hold
fn cell_text(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            tracing::warn!("Truncating a {}-byte export cell", text.len());
            Cow::Owned(text[..cut].to_string())
        }
        None => Cow::Borrowed(text),
    }
}
