/// A single spreadsheet cell after normalisation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl CellValue {
    /// Whole-valued floats collapse to integers, the way spreadsheet readers
    /// usually infer numeric columns.
    pub fn from_f64(f: f64) -> Self {
        if !f.is_finite() {
            return CellValue::Null;
        }
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            CellValue::Integer(f as i64)
        } else {
            CellValue::Real(f)
        }
    }

    /// Empty strings are treated as blank cells.
    pub fn from_text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(s)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Header text for matching against required column names.
    pub fn as_header(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Real(f) => Some(f.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

/// One named grid from a workbook: a header row followed by data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Splits the first row off as the header.
    pub fn from_grid(name: impl Into<String>, grid: Vec<Vec<CellValue>>) -> Self {
        let mut rows = grid.into_iter();
        let header = rows.next().unwrap_or_default();
        Self {
            name: name.into(),
            header,
            rows: rows.collect(),
        }
    }

    /// A sheet with no header row at all.
    pub fn is_blank(&self) -> bool {
        self.header.iter().all(CellValue::is_null) && self.rows.is_empty()
    }

    /// Index of the header cell whose text equals `name` exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|cell| cell.as_header().as_deref() == Some(name))
    }
}
