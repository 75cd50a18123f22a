use crate::config::INVENTORY_TABLE;
use crate::db::ident::Identifier;
use crate::db::models::{
    ADMIN_ROLE, ColumnInfo, DEFERRED_COLUMNS, DbUser, InventoryRecord, SHEET_COLUMNS,
};
use crate::db::schema::{INVENTORY_INIT, users_init};
use crate::error::AdminError;
use crate::types::sheet::CellValue;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row, Sqlite};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Outcome of writing one sheet's rows inside a single transaction.
#[derive(Debug)]
pub struct BatchOutcome {
    pub inserted: usize,
    /// 1-based index of the row that failed, with the error it raised.
    pub failure: Option<(usize, AdminError)>,
}

/// The one connection a tool run owns. Dropping it closes the connection, so
/// early returns release it as well; [`Database::close`] is the clean path.
pub struct Database {
    conn: SqliteConnection,
}

impl Database {
    /// Open an existing database file.
    pub async fn open(path: &Path, busy_timeout: Duration) -> Result<Self, AdminError> {
        Self::connect(path, busy_timeout, false).await
    }

    /// Open the database file, creating it when absent.
    pub async fn open_or_create(path: &Path, busy_timeout: Duration) -> Result<Self, AdminError> {
        Self::connect(path, busy_timeout, true).await
    }

    async fn connect(
        path: &Path,
        busy_timeout: Duration,
        create_if_missing: bool,
    ) -> Result<Self, AdminError> {
        let conn = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create_if_missing)
            .busy_timeout(busy_timeout)
            .connect()
            .await
            .map_err(|source| AdminError::ConnectionFailure {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    pub async fn close(self) -> Result<(), AdminError> {
        self.conn.close().await?;
        Ok(())
    }

    /// Create `inventory` and the users table when they are missing.
    pub async fn init_schema(&mut self, users_table: &Identifier) -> Result<(), AdminError> {
        let mut tx = self.conn.begin().await?;
        sqlx::query(INVENTORY_INIT).execute(&mut *tx).await?;
        sqlx::query(&users_init(users_table))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Column descriptors in declaration order. Empty when the table does not
    /// exist. The name is bound, never interpolated.
    pub async fn table_columns(&mut self, table: &str) -> Result<Vec<ColumnInfo>, AdminError> {
        let rows = sqlx::query(
            r#"SELECT cid, name, type, "notnull", dflt_value, pk
               FROM pragma_table_info(?1) ORDER BY cid"#,
        )
        .bind(table)
        .fetch_all(&mut self.conn)
        .await?;
        rows.into_iter().map(Self::row_to_column).collect()
    }

    /// Insert every record of one sheet in a single transaction.
    ///
    /// On the first failing row the rows before it are committed and the
    /// failure is handed back; later rows are not attempted.
    pub async fn insert_inventory_batch(
        &mut self,
        records: &[InventoryRecord],
    ) -> Result<BatchOutcome, AdminError> {
        let sql = inventory_insert_sql();
        let mut tx = self.conn.begin().await?;
        let mut inserted = 0;

        for (idx, record) in records.iter().enumerate() {
            let mut query = sqlx::query(&sql);
            for value in record.values() {
                query = bind_cell(query, value);
            }
            for _ in DEFERRED_COLUMNS {
                query = query.bind(None::<String>);
            }

            if let Err(e) = query.execute(&mut *tx).await {
                tx.commit().await?;
                let row = idx + 1;
                return Ok(BatchOutcome {
                    inserted,
                    failure: Some((row, AdminError::from_write(e, format!("row {row}")))),
                });
            }
            inserted += 1;
        }

        tx.commit().await?;
        Ok(BatchOutcome {
            inserted,
            failure: None,
        })
    }

    /// Insert a user row with the given role. Returns the new row id.
    pub async fn insert_user(
        &mut self,
        table: &Identifier,
        username: &str,
        password: &str,
        role: i64,
    ) -> Result<i64, AdminError> {
        let sql = format!(
            "INSERT INTO {} (username, password, role) VALUES (?, ?, ?)",
            table.quoted()
        );
        let result = sqlx::query(&sql)
            .bind(username)
            .bind(password)
            .bind(role)
            .execute(&mut self.conn)
            .await
            .map_err(|e| AdminError::from_user_write(e, table.as_str(), username))?;
        Ok(result.last_insert_rowid())
    }

    pub async fn find_user(
        &mut self,
        table: &Identifier,
        username: &str,
    ) -> Result<Option<DbUser>, AdminError> {
        let sql = format!(
            "SELECT id, username, CAST(role AS INTEGER) AS role FROM {} WHERE username = ?",
            table.quoted()
        );
        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&mut self.conn)
            .await?;
        match row {
            Some(r) => Ok(Some(DbUser {
                id: r.try_get("id")?,
                username: r.try_get("username")?,
                role: r.try_get("role")?,
            })),
            None => Ok(None),
        }
    }

    /// Set the administrator role. Returns the number of rows changed.
    pub async fn set_admin_role(
        &mut self,
        table: &Identifier,
        username: &str,
    ) -> Result<u64, AdminError> {
        let sql = format!("UPDATE {} SET role = ? WHERE username = ?", table.quoted());
        let result = sqlx::query(&sql)
            .bind(ADMIN_ROLE)
            .bind(username)
            .execute(&mut self.conn)
            .await
            .map_err(|e| AdminError::from_write(e, format!("update {table}")))?;
        Ok(result.rows_affected())
    }

    /// Every row of `table`, in storage scan order.
    pub async fn fetch_all_rows(&mut self, table: &Identifier) -> Result<Vec<SqliteRow>, AdminError> {
        let sql = format!("SELECT * FROM {}", table.quoted());
        debug!(%sql, "scanning table");
        Ok(sqlx::query(&sql).fetch_all(&mut self.conn).await?)
    }

    fn row_to_column(row: SqliteRow) -> Result<ColumnInfo, AdminError> {
        let cid: i64 = row.try_get("cid")?;
        let name: String = row.try_get("name")?;
        let decl_type: String = row.try_get("type")?;
        let not_null: i64 = row.try_get("notnull")?;
        let default_value: Option<String> = row.try_get("dflt_value")?;
        let pk: i64 = row.try_get("pk")?;

        Ok(ColumnInfo {
            cid,
            name,
            decl_type,
            not_null: not_null != 0,
            default_value,
            pk,
        })
    }
}

fn inventory_insert_sql() -> String {
    let columns: Vec<&str> = SHEET_COLUMNS
        .iter()
        .map(|(_, column)| *column)
        .chain(DEFERRED_COLUMNS)
        .collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {INVENTORY_TABLE} ({}) VALUES ({placeholders})",
        columns.join(", ")
    )
}

fn bind_cell<'q>(query: SqliteQuery<'q>, value: &CellValue) -> SqliteQuery<'q> {
    match value {
        CellValue::Null => query.bind(None::<String>),
        CellValue::Integer(i) => query.bind(*i),
        CellValue::Real(f) => query.bind(*f),
        CellValue::Text(s) => query.bind(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_statement_lists_all_twelve_columns() {
        let sql = inventory_insert_sql();
        assert!(sql.starts_with("INSERT INTO inventory (asset_no, asset_type, serial_no"));
        assert!(sql.contains("department, os_info, replacement_of, received_at, replaced_by)"));
        assert_eq!(sql.matches('?').count(), 12);
    }
}
