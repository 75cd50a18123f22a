//! SQL DDL for initializing the admin database.

use crate::db::ident::Identifier;

/// `inventory`: the eight sheet-sourced columns are NOT NULL, the four
/// deferred columns stay nullable.
pub const INVENTORY_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS inventory (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_no TEXT NOT NULL,
    asset_type TEXT NOT NULL,
    serial_no TEXT NOT NULL,
    manufacturer TEXT NOT NULL,
    model TEXT NOT NULL,
    version TEXT NOT NULL,
    status TEXT NOT NULL,
    department TEXT NOT NULL,
    os_info TEXT NULL,
    replacement_of TEXT NULL,
    received_at TEXT NULL,
    replaced_by TEXT NULL
)
"#;

/// Users table DDL. The name is chosen at runtime, so it goes through
/// [`Identifier`] before landing in the statement.
pub fn users_init(table: &Identifier) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    role INTEGER NOT NULL DEFAULT 0
)
"#,
        table.quoted()
    )
}
