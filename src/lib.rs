pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod types;
pub mod workbook;

pub use config::Config;
pub use db::Database;
pub use error::AdminError;
