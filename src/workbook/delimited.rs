use crate::error::AdminError;
use crate::types::sheet::{CellValue, Sheet};
use std::path::Path;

/// A CSV file is a single sheet named after the file stem.
pub fn read_csv(path: &Path) -> Result<Sheet, AdminError> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("csv")
        .to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(CellValue::from_text).collect());
    }
    Ok(Sheet::from_grid(name, grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_header_and_rows_as_text() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Asset No,Asset Type,Serial No").unwrap();
        writeln!(file, "A-1,Laptop,SN1").unwrap();
        writeln!(file, "A-2,,SN2").unwrap();
        writeln!(file, "A-3").unwrap();
        file.flush().unwrap();

        let sheet = read_csv(file.path()).unwrap();
        assert_eq!(sheet.column_index("Serial No"), Some(2));
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[0][1], CellValue::Text("Laptop".into()));
        assert_eq!(sheet.rows[1][1], CellValue::Null);
        assert_eq!(sheet.rows[2].len(), 1);
        assert!(
            file.path()
                .file_stem()
                .is_some_and(|stem| stem.to_str() == Some(sheet.name.as_str()))
        );
    }
}
