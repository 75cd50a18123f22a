//! Spreadsheet readers. Every format is flattened into [`Sheet`]s in the
//! order the file stores them.

pub mod delimited;
pub mod excel;

use crate::error::AdminError;
use crate::types::sheet::Sheet;
use std::path::Path;

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read every sheet of the spreadsheet at `path`, picking the reader by
/// file extension.
pub fn read_sheets(path: &Path) -> Result<Vec<Sheet>, AdminError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("csv") => Ok(vec![delimited::read_csv(path)?]),
        Some(e) if EXCEL_EXTENSIONS.contains(&e) => excel::read_workbook(path),
        _ => Err(AdminError::UnsupportedSpreadsheet(path.to_path_buf())),
    }
}
