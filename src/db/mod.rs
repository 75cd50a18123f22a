//! Database module: the scoped connection plus everything it reads and writes.
//!
//! Layout:
//! - `ident.rs`: allow-listed table names
//! - `models.rs`: row structs and fixed column sets
//! - `schema.rs`: SQL DDL for `init`
//! - `sqlite.rs`: the `Database` handle and its queries

pub mod ident;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use ident::Identifier;
pub use models::{ColumnInfo, DbUser, InventoryRecord};
pub use sqlite::{BatchOutcome, Database};
