use crate::types::sheet::CellValue;

/// Spreadsheet headers, in the order their values are bound, paired with the
/// `inventory` column each one feeds.
pub const SHEET_COLUMNS: [(&str, &str); 8] = [
    ("Asset No", "asset_no"),
    ("Asset Type", "asset_type"),
    ("Serial No", "serial_no"),
    ("Manufacturer", "manufacturer"),
    ("Model", "model"),
    ("Version", "version"),
    ("Status", "status"),
    ("Department", "department"),
];

/// Columns filled in later by processes outside this tool; always NULL on import.
pub const DEFERRED_COLUMNS: [&str; 4] = ["os_info", "replacement_of", "received_at", "replaced_by"];

/// Columns an admin-capable users table has to provide.
pub const USER_COLUMNS: [&str; 4] = ["id", "username", "password", "role"];

/// Role flag for administrators.
pub const ADMIN_ROLE: i64 = 1;

/// One row of `pragma_table_info`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    /// 1-based position within the primary key, 0 when not part of it.
    pub pk: i64,
}

/// A row headed for `inventory`. The deferred columns are not stored here;
/// they are bound as NULL at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    pub asset_no: CellValue,
    pub asset_type: CellValue,
    pub serial_no: CellValue,
    pub manufacturer: CellValue,
    pub model: CellValue,
    pub version: CellValue,
    pub status: CellValue,
    pub department: CellValue,
}

impl InventoryRecord {
    /// Values in `SHEET_COLUMNS` order.
    pub fn values(&self) -> [&CellValue; 8] {
        [
            &self.asset_no,
            &self.asset_type,
            &self.serial_no,
            &self.manufacturer,
            &self.model,
            &self.version,
            &self.status,
            &self.department,
        ]
    }
}

impl From<[CellValue; 8]> for InventoryRecord {
    fn from(v: [CellValue; 8]) -> Self {
        let [
            asset_no,
            asset_type,
            serial_no,
            manufacturer,
            model,
            version,
            status,
            department,
        ] = v;
        Self {
            asset_no,
            asset_type,
            serial_no,
            manufacturer,
            model,
            version,
            status,
            department,
        }
    }
}

/// A user row as read back for promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub role: Option<i64>,
}

impl DbUser {
    pub fn is_admin(&self) -> bool {
        self.role == Some(ADMIN_ROLE)
    }
}
