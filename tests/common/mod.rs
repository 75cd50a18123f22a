// Shared fixtures for the integration tests.
#![allow(dead_code)]

use inventory_admin::db::models::SHEET_COLUMNS;
use inventory_admin::db::{Database, Identifier};
use inventory_admin::types::{CellValue, Sheet};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// A database file inside a temp dir that lives as long as the fixture.
pub struct TestDb {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestDb {
    /// Empty database file, no tables.
    pub async fn empty() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("inventory.db");
        Database::open_or_create(&path, TIMEOUT)
            .await
            .expect("failed to create database")
            .close()
            .await
            .expect("failed to close database");
        Self { _dir: dir, path }
    }

    /// Database with `inventory` and `users` created by `init`.
    pub async fn initialized() -> Self {
        let fixture = Self::empty().await;
        let mut db = fixture.open().await;
        db.init_schema(&Identifier::parse("users").unwrap())
            .await
            .expect("failed to init schema");
        db.close().await.unwrap();
        fixture
    }

    pub async fn open(&self) -> Database {
        Database::open(&self.path, TIMEOUT)
            .await
            .expect("failed to open database")
    }

    /// Independent connection for setup and assertions.
    pub async fn raw(&self) -> SqliteConnection {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .connect()
            .await
            .expect("failed to open raw connection")
    }

    pub async fn exec(&self, sql: &str) {
        let mut conn = self.raw().await;
        sqlx::raw_sql(sql)
            .execute(&mut conn)
            .await
            .expect("setup statement failed");
    }

    pub async fn count(&self, sql: &str) -> i64 {
        let mut conn = self.raw().await;
        let row = sqlx::query(sql)
            .fetch_one(&mut conn)
            .await
            .expect("count query failed");
        row.get::<i64, _>(0)
    }

    pub fn path_arg(&self) -> String {
        path_str(&self.path)
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

pub fn text(s: &str) -> CellValue {
    CellValue::from_text(s)
}

pub fn inventory_header() -> Vec<CellValue> {
    SHEET_COLUMNS.iter().map(|(h, _)| text(h)).collect()
}

/// A row for the standard header; `prefix` tags the asset number so rows
/// can be traced back to their sheet.
pub fn asset_row(prefix: &str, n: usize) -> Vec<CellValue> {
    vec![
        text(&format!("{prefix}-{n}")),
        text("Laptop"),
        text(&format!("SN-{prefix}-{n}")),
        text("Dell"),
        text("Latitude 5440"),
        text("Win11"),
        text("Active"),
        text("IT"),
    ]
}

pub fn inventory_sheet(name: &str, prefix: &str, rows: usize) -> Sheet {
    Sheet {
        name: name.to_string(),
        header: inventory_header(),
        rows: (1..=rows).map(|n| asset_row(prefix, n)).collect(),
    }
}

/// Run the CLI with `args` (program name excluded) and scripted stdin.
pub async fn run_cli(
    args: &[&str],
    stdin: &str,
) -> (Result<(), inventory_admin::AdminError>, String) {
    use clap::Parser;
    use inventory_admin::cli::{self, Cli, Console};

    let cli = Cli::parse_from(std::iter::once("inventory-admin").chain(args.iter().copied()));
    let cfg = inventory_admin::Config::default();
    let mut console = Console::new(std::io::Cursor::new(stdin.to_string()), Vec::new());
    let result = cli::run(cli, &cfg, &mut console).await;
    let output = String::from_utf8(console.into_output()).expect("output was not utf-8");
    (result, output)
}
