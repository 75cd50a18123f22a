//! Command-line surface: argument parsing, prompting for anything not given,
//! and narration of each tool's result.

pub mod prompt;

use crate::config::{Config, DEFAULT_USERS_TABLE, INVENTORY_TABLE};
use crate::db::{Database, Identifier};
use crate::error::AdminError;
use crate::service::{self, PromoteOutcome};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub use prompt::Console;

const DB_PROMPT: &str = "Enter the path to your SQLite database: ";
const TABLE_PROMPT: &str = "Enter the table name: ";

/// Administration tools for the inventory database
#[derive(Debug, Parser)]
#[command(name = "inventory-admin", version)]
#[command(about = "Load, inspect and administer the SQLite inventory database", long_about = None)]
pub struct Cli {
    /// Path to the SQLite database (falls back to INVADM_DATABASE_PATH, then a prompt)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Append every row of every sheet in a spreadsheet to the inventory table
    Import {
        /// Spreadsheet file (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Check a users table and insert an administrator into it
    CreateAdmin {
        #[arg(short, long)]
        table: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Print a table's column names in declaration order
    ListColumns {
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Print every row of a table as a JSON array
    Dump {
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Give an existing user the administrator role
    Promote {
        #[arg(short, long)]
        table: Option<String>,
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Create the inventory and users tables if they are missing
    Init {
        /// Name of the users table to create
        #[arg(long)]
        users_table: Option<String>,
    },
}

/// Run one tool to completion. The database connection is released on every
/// path out of here.
pub async fn run<R: BufRead, W: Write>(
    cli: Cli,
    cfg: &Config,
    console: &mut Console<R, W>,
) -> Result<(), AdminError> {
    let db_path = PathBuf::from(console.resolve(
        cli.database.or_else(|| cfg.database_path.clone()).map(path_string),
        DB_PROMPT,
    )?);

    // Only init may create the database file.
    let mut db = match cli.command {
        Commands::Init { .. } => Database::open_or_create(&db_path, cfg.busy_timeout()).await?,
        _ => Database::open(&db_path, cfg.busy_timeout()).await?,
    };
    let result = dispatch(cli.command, cfg, &db_path, &mut db, console).await;
    finish(db, result).await
}

async fn finish<T>(db: Database, result: Result<T, AdminError>) -> Result<T, AdminError> {
    let closed = db.close().await;
    let value = result?;
    closed?;
    Ok(value)
}

async fn dispatch<R: BufRead, W: Write>(
    command: Commands,
    cfg: &Config,
    db_path: &Path,
    db: &mut Database,
    console: &mut Console<R, W>,
) -> Result<(), AdminError> {
    match command {
        Commands::Import { file } => {
            let file = console.resolve(
                file.map(path_string),
                "Enter the path to your Excel file: ",
            )?;
            import(db, console, PathBuf::from(file)).await
        }
        Commands::CreateAdmin {
            table,
            username,
            password,
        } => {
            let table = console.resolve(table.or_else(|| cfg.users_table.clone()), TABLE_PROMPT)?;
            create_admin(db, cfg, console, &table, username, password).await
        }
        Commands::ListColumns { table } => {
            let table = Identifier::parse(&console.resolve(table, TABLE_PROMPT)?)?;
            let columns = service::list_columns(db, &table).await?;
            if columns.is_empty() {
                console.say(format_args!("Table '{table}' does not exist in the database."))?;
            } else {
                console.say(format_args!("Columns in table '{table}':"))?;
                for column in &columns {
                    console.say(&column.name)?;
                }
            }
            Ok(())
        }
        Commands::Dump { table } => {
            let table = Identifier::parse(&console.resolve(
                table,
                "Enter the name of the table you want to fetch data from: ",
            )?)?;
            let rows = service::dump_table(db, &table).await?;
            console.say(service::to_pretty_json(&rows)?)?;
            Ok(())
        }
        Commands::Promote { table, username } => {
            let table = Identifier::parse(
                &console.resolve(table.or_else(|| cfg.users_table.clone()), TABLE_PROMPT)?,
            )?;
            service::validate_user_table(db, &table).await?;
            let username = console.resolve(username, "Enter the username to promote: ")?;
            match service::promote_user(db, &table, &username).await? {
                PromoteOutcome::Promoted => {
                    console.say(format_args!("User '{username}' promoted to admin."))?
                }
                PromoteOutcome::AlreadyAdmin => {
                    console.say(format_args!("User '{username}' is already an admin."))?
                }
            }
            Ok(())
        }
        Commands::Init { users_table } => {
            let table = Identifier::parse(
                &users_table
                    .or_else(|| cfg.users_table.clone())
                    .unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string()),
            )?;
            db.init_schema(&table).await?;
            console.say(format_args!(
                "Initialized tables '{INVENTORY_TABLE}' and '{table}' in {}",
                db_path.display()
            ))?;
            Ok(())
        }
    }
}

async fn import<R: BufRead, W: Write>(
    db: &mut Database,
    console: &mut Console<R, W>,
    file: PathBuf,
) -> Result<(), AdminError> {
    let sheets = crate::workbook::read_sheets(&file)?;

    let mut narration = Ok(());
    let report = service::import_sheets(db, sheets, |name| {
        if narration.is_ok() {
            narration = console.say(format_args!("Inserting data from sheet: {name}"));
        }
    })
    .await?;
    narration?;

    console.say(format_args!(
        "Data insertion completed. {} row(s) from {} sheet(s).",
        report.total_rows(),
        report.sheets.len()
    ))?;
    Ok(())
}

async fn create_admin<R: BufRead, W: Write>(
    db: &mut Database,
    cfg: &Config,
    console: &mut Console<R, W>,
    table: &str,
    username: Option<String>,
    password: Option<String>,
) -> Result<(), AdminError> {
    let invalid = |console: &mut Console<R, W>| {
        console.say(format_args!(
            "Cannot create admin user because the table '{table}' is not valid."
        ))
    };

    let ident = match Identifier::parse(table) {
        Ok(ident) => ident,
        Err(e) => {
            invalid(console)?;
            return Err(e);
        }
    };
    let columns = match service::validate_user_table(db, &ident).await {
        Ok(columns) => columns,
        Err(e) => {
            invalid(console)?;
            return Err(e);
        }
    };

    console.say(format_args!("Columns in table '{ident}':"))?;
    for column in &columns {
        console.say(format_args!("- {}", column.name))?;
    }

    let username = console.resolve(username, "Enter the username for the admin: ")?;
    let password = match password {
        Some(p) => p,
        None => console.ask("Enter the password for the admin: ")?,
    };

    let encoder = service::encoder_for(cfg.password_scheme);
    match service::create_admin(db, &ident, &username, &password, encoder.as_ref()).await {
        Ok(_) => console.say(format_args!("Admin user '{username}' created successfully!"))?,
        Err(e) if e.is_duplicate_user() => console.say(format_args!("Error: {e}"))?,
        Err(e) => return Err(e),
    }
    Ok(())
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}
