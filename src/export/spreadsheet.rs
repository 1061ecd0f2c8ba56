//! XLSX export of the visible rows.

use rust_xlsxwriter::Workbook;

use crate::error::{WorklistError, WorklistResult};
use crate::types::{FilterSet, VisibleRows};

use super::filename::export_file_name;
use super::{ExportArtifact, ExportOptions};

/// Write the header row and every visible row, verbatim as strings, into a single sheet.
///
/// Fails with [`WorklistError::EmptyExport`] if no rows are visible.
pub fn export_spreadsheet(
    view: &VisibleRows<'_>,
    filters: &FilterSet,
    options: &ExportOptions,
) -> WorklistResult<ExportArtifact> {
    if view.is_empty() {
        return Err(WorklistError::EmptyExport);
    }
    let filename = export_file_name(&options.base_name, filters, "xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(options.sheet_name.as_str())?;

    for (c, header) in view.headers.iter().enumerate() {
        sheet.write_string(0, col_num(c)?, header.as_str())?;
    }
    for (r, row) in view.rows.iter().enumerate() {
        let r = row_num(r + 1)?;
        for (c, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            sheet.write_string(r, col_num(c)?, cell.as_str())?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    log::debug!("wrote {filename}: {} rows", view.len());
    Ok(ExportArtifact { filename, bytes })
}

fn col_num(c: usize) -> WorklistResult<u16> {
    u16::try_from(c).map_err(|_| WorklistError::operation(format!("column {c} exceeds sheet width")))
}

fn row_num(r: usize) -> WorklistResult<u32> {
    u32::try_from(r).map_err(|_| WorklistError::operation(format!("row {r} exceeds sheet height")))
}

#[cfg(test)]
mod tests {
    use super::export_spreadsheet;
    use crate::error::ErrorKind;
    use crate::export::ExportOptions;
    use crate::types::{FilterSet, VisibleRows};

    #[test]
    fn empty_view_produces_no_workbook() {
        let headers = vec!["Customer".to_string()];
        let view = VisibleRows {
            headers: &headers,
            rows: Vec::new(),
        };
        let err = export_spreadsheet(&view, &FilterSet::new(), &ExportOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyExport);
    }

    #[test]
    fn workbook_bytes_are_a_zip_container() {
        let headers = vec!["Customer".to_string(), "Qty".to_string()];
        let row = vec!["Acme".to_string(), "3".to_string()];
        let view = VisibleRows {
            headers: &headers,
            rows: vec![row.as_slice()],
        };
        let out = export_spreadsheet(&view, &FilterSet::new(), &ExportOptions::default()).unwrap();
        assert_eq!(out.filename, "Cased_POD_AllOrders.xlsx");
        assert_eq!(&out.bytes[..2], b"PK");
    }
}
