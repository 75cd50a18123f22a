pub mod sheet;

pub use sheet::{CellValue, Sheet};
