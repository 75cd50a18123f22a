use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AdminError {
    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Table '{0}' does not exist in the database.")]
    NotFound(String),

    #[error("Table '{table}' does not have the expected columns (missing: {})", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },

    #[error("user '{0}' already exists")]
    DuplicateUser(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("constraint violation ({context}): {message}")]
    ConstraintViolation { context: String, message: String },

    #[error("cannot open database '{}': {source}", .path.display())]
    ConnectionFailure {
        path: PathBuf,
        #[source]
        source: SqlxError,
    },

    #[error("invalid table name '{0}'")]
    InvalidIdentifier(String),

    #[error("unsupported spreadsheet format: {}", .0.display())]
    UnsupportedSpreadsheet(PathBuf),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<figment::Error> for AdminError {
    fn from(e: figment::Error) -> Self {
        AdminError::Config(Box::new(e))
    }
}

impl AdminError {
    /// Maps a driver error raised by an INSERT/UPDATE onto the taxonomy.
    /// Non-constraint failures stay `Database`.
    pub fn from_write(err: SqlxError, context: impl Into<String>) -> Self {
        match constraint_message(&err) {
            Some(message) => AdminError::ConstraintViolation {
                context: context.into(),
                message,
            },
            None => AdminError::Database(err),
        }
    }

    /// Same as [`AdminError::from_write`], but a uniqueness failure on the
    /// `username` column becomes `DuplicateUser`.
    pub fn from_user_write(err: SqlxError, table: &str, username: &str) -> Self {
        if let SqlxError::Database(db) = &err
            && matches!(db.kind(), ErrorKind::UniqueViolation)
            && db.message().ends_with(".username")
        {
            return AdminError::DuplicateUser(username.to_string());
        }
        Self::from_write(err, format!("insert into {table}"))
    }

    pub fn is_duplicate_user(&self) -> bool {
        matches!(self, AdminError::DuplicateUser(_))
    }
}

fn constraint_message(err: &SqlxError) -> Option<String> {
    let SqlxError::Database(db) = err else {
        return None;
    };
    let constraint = match db.kind() {
        ErrorKind::UniqueViolation
        | ErrorKind::ForeignKeyViolation
        | ErrorKind::NotNullViolation
        | ErrorKind::CheckViolation => true,
        _ => db.message().contains("constraint failed"),
    };
    constraint.then(|| db.message().to_string())
}
