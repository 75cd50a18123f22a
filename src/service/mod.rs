//! The admin tools. Each one takes an open [`Database`](crate::db::Database)
//! and explicit arguments; prompting stays in the CLI layer.

pub mod credentials;
pub mod importer;
pub mod inspector;
pub mod provisioner;

pub use credentials::{PasswordEncoder, encoder_for};
pub use importer::{ImportReport, SheetSummary, import_file, import_sheets};
pub use inspector::{dump_table, list_columns, to_pretty_json};
pub use provisioner::{PromoteOutcome, create_admin, promote_user, validate_user_table};
