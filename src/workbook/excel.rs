use crate::error::AdminError;
use crate::types::sheet::{CellValue, Sheet};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::TimeDelta;
use std::path::Path;
use tracing::{debug, warn};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Load all worksheets of an Excel/ODS workbook.
pub fn read_workbook(path: &Path) -> Result<Vec<Sheet>, AdminError> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let grid: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(|cell| cell_value(&name, cell)).collect())
            .collect();
        debug!(sheet = %name, rows = grid.len(), "read worksheet");
        sheets.push(Sheet::from_grid(name, grid));
    }
    Ok(sheets)
}

pub(crate) fn cell_value(sheet: &str, cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::from_text(s.as_str()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::from_f64(*f),
        Data::Bool(b) => CellValue::Integer(i64::from(*b)),
        Data::DateTime(dt) if dt.is_duration() => match dt.as_duration() {
            Some(d) => CellValue::Text(format_duration(d)),
            None => CellValue::from_f64(dt.as_f64()),
        },
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::Text(naive.format(DATETIME_FORMAT).to_string()),
            None => CellValue::from_f64(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s.as_str()),
        Data::Error(e) => {
            warn!(sheet = %sheet, error = ?e, "spreadsheet error cell imported as NULL");
            CellValue::Null
        }
    }
}

/// Elapsed time as `[-]H:MM:SS`, hours unbounded like Excel's `[h]:mm:ss`.
fn format_duration(d: TimeDelta) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let secs = total.unsigned_abs();
    format!("{sign}{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}
