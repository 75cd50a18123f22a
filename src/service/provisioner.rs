use crate::db::ident::Identifier;
use crate::db::models::{ADMIN_ROLE, ColumnInfo, USER_COLUMNS};
use crate::db::sqlite::Database;
use crate::error::AdminError;
use crate::service::credentials::PasswordEncoder;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoteOutcome {
    Promoted,
    AlreadyAdmin,
}

/// Check that `table` exists and carries `id`, `username`, `password` and
/// `role`. Only names are compared; types and order are ignored.
pub async fn validate_user_table(
    db: &mut Database,
    table: &Identifier,
) -> Result<Vec<ColumnInfo>, AdminError> {
    let columns = db.table_columns(table.as_str()).await?;
    if columns.is_empty() {
        return Err(AdminError::NotFound(table.to_string()));
    }

    let missing: Vec<String> = USER_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c.name == **required))
        .map(|s| s.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AdminError::SchemaMismatch {
            table: table.to_string(),
            missing,
        });
    }
    Ok(columns)
}

/// Insert an administrator into a table already checked by
/// [`validate_user_table`]. Returns the new row id.
pub async fn create_admin(
    db: &mut Database,
    table: &Identifier,
    username: &str,
    password: &str,
    encoder: &dyn PasswordEncoder,
) -> Result<i64, AdminError> {
    let stored = encoder.encode(password)?;
    let id = db.insert_user(table, username, &stored, ADMIN_ROLE).await?;
    info!(table = %table, username, id, "admin user created");
    Ok(id)
}

/// Raise an existing user to the administrator role.
pub async fn promote_user(
    db: &mut Database,
    table: &Identifier,
    username: &str,
) -> Result<PromoteOutcome, AdminError> {
    let user = db
        .find_user(table, username)
        .await?
        .ok_or_else(|| AdminError::UserNotFound(username.to_string()))?;
    if user.is_admin() {
        return Ok(PromoteOutcome::AlreadyAdmin);
    }

    match db.set_admin_role(table, username).await? {
        0 => Err(AdminError::UserNotFound(username.to_string())),
        _ => {
            info!(table = %table, username, id = user.id, "user promoted to admin");
            Ok(PromoteOutcome::Promoted)
        }
    }
}
