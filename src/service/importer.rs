use crate::config::INVENTORY_TABLE;
use crate::db::models::{InventoryRecord, SHEET_COLUMNS};
use crate::db::sqlite::Database;
use crate::error::AdminError;
use crate::types::sheet::{CellValue, Sheet};
use crate::workbook;
use std::path::Path;
use tracing::{info, warn};

/// Rows written per sheet, in import order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub sheets: Vec<SheetSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub name: String,
    pub rows_inserted: usize,
}

impl ImportReport {
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows_inserted).sum()
    }
}

/// Read the spreadsheet at `path` and append every row of every sheet to
/// `inventory`.
pub async fn import_file(db: &mut Database, path: &Path) -> Result<ImportReport, AdminError> {
    let sheets = workbook::read_sheets(path)?;
    info!(path = %path.display(), sheets = sheets.len(), "loaded spreadsheet");
    import_sheets(db, sheets, |_| {}).await
}

/// Import already-parsed sheets. `on_sheet` fires for every sheet, blank
/// ones included, before anything of it is written.
///
/// Each sheet is one transaction. A constraint failure at row k keeps rows
/// 1..k-1 of that sheet and stops the run; later sheets are left untouched.
pub async fn import_sheets<F>(
    db: &mut Database,
    sheets: Vec<Sheet>,
    mut on_sheet: F,
) -> Result<ImportReport, AdminError>
where
    F: FnMut(&str),
{
    if db.table_columns(INVENTORY_TABLE).await?.is_empty() {
        return Err(AdminError::NotFound(INVENTORY_TABLE.to_string()));
    }

    let mut report = ImportReport::default();
    for sheet in sheets {
        on_sheet(&sheet.name);
        if sheet.is_blank() {
            info!(sheet = %sheet.name, "skipping empty sheet");
            continue;
        }

        let records = map_sheet(&sheet)?;
        let outcome = db.insert_inventory_batch(&records).await?;
        info!(sheet = %sheet.name, rows = outcome.inserted, "committed sheet");

        if let Some((row, err)) = outcome.failure {
            warn!(sheet = %sheet.name, row, error = %err, "insert failed; stopping import");
            return Err(match err {
                AdminError::ConstraintViolation { message, .. } => {
                    AdminError::ConstraintViolation {
                        context: format!("sheet '{}', row {row}", sheet.name),
                        message,
                    }
                }
                other => other,
            });
        }

        report.sheets.push(SheetSummary {
            name: sheet.name,
            rows_inserted: outcome.inserted,
        });
    }
    Ok(report)
}

/// Map a sheet's data rows onto inventory records by exact header match.
pub fn map_sheet(sheet: &Sheet) -> Result<Vec<InventoryRecord>, AdminError> {
    let mut positions = [0usize; SHEET_COLUMNS.len()];
    for (slot, (header, _)) in positions.iter_mut().zip(SHEET_COLUMNS) {
        *slot = sheet
            .column_index(header)
            .ok_or_else(|| AdminError::MissingColumn {
                sheet: sheet.name.clone(),
                column: header.to_string(),
            })?;
    }

    Ok(sheet
        .rows
        .iter()
        .map(|row| {
            let values = positions.map(|idx| row.get(idx).cloned().unwrap_or(CellValue::Null));
            InventoryRecord::from(values)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn header() -> Vec<CellValue> {
        SHEET_COLUMNS.iter().map(|(h, _)| text(h)).collect()
    }

    #[test]
    fn maps_columns_regardless_of_sheet_order() {
        let mut hdr = header();
        hdr.reverse();
        hdr.push(text("Notes"));
        let row: Vec<CellValue> = vec![
            text("IT"),
            text("Active"),
            text("11"),
            text("XPS"),
            text("Dell"),
            text("SN-1"),
            text("Laptop"),
            CellValue::Integer(1001),
            text("ignored"),
        ];
        let sheet = Sheet {
            name: "Laptops".into(),
            header: hdr,
            rows: vec![row],
        };

        let records = map_sheet(&sheet).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].asset_no, CellValue::Integer(1001));
        assert_eq!(records[0].manufacturer, text("Dell"));
        assert_eq!(records[0].department, text("IT"));
    }

    #[test]
    fn short_rows_pad_with_null() {
        let sheet = Sheet {
            name: "S".into(),
            header: header(),
            rows: vec![vec![text("A-1"), text("Laptop")]],
        };
        let records = map_sheet(&sheet).unwrap();
        assert_eq!(records[0].asset_type, text("Laptop"));
        assert_eq!(records[0].serial_no, CellValue::Null);
        assert_eq!(records[0].department, CellValue::Null);
    }

    #[test]
    fn missing_header_names_first_absent_column() {
        let mut hdr = header();
        hdr.retain(|c| *c != text("Model") && *c != text("Status"));
        let sheet = Sheet {
            name: "Printers".into(),
            header: hdr,
            rows: Vec::new(),
        };
        match map_sheet(&sheet) {
            Err(AdminError::MissingColumn { sheet, column }) => {
                assert_eq!(sheet, "Printers");
                assert_eq!(column, "Model");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn report_totals_rows() {
        let report = ImportReport {
            sheets: vec![
                SheetSummary {
                    name: "a".into(),
                    rows_inserted: 2,
                },
                SheetSummary {
                    name: "b".into(),
                    rows_inserted: 3,
                },
            ],
        };
        assert_eq!(report.total_rows(), 5);
    }
}
