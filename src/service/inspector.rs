use crate::db::ident::Identifier;
use crate::db::models::ColumnInfo;
use crate::db::sqlite::Database;
use crate::error::AdminError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};
use tracing::debug;

/// Ordered column descriptors; empty when the table does not exist.
pub async fn list_columns(
    db: &mut Database,
    table: &Identifier,
) -> Result<Vec<ColumnInfo>, AdminError> {
    db.table_columns(table.as_str()).await
}

/// Every row of `table` as a JSON object keyed by column name, keys in
/// declaration order.
pub async fn dump_table(db: &mut Database, table: &Identifier) -> Result<Vec<Value>, AdminError> {
    let columns = db.table_columns(table.as_str()).await?;
    if columns.is_empty() {
        return Err(AdminError::NotFound(table.to_string()));
    }

    let rows = db.fetch_all_rows(table).await?;
    debug!(table = %table, rows = rows.len(), "fetched rows");
    rows.iter().map(row_to_object).collect()
}

/// Pretty-print with a four-space indent.
pub fn to_pretty_json(rows: &[Value]) -> Result<String, AdminError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    rows.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn row_to_object(row: &SqliteRow) -> Result<Value, AdminError> {
    let mut object = Map::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        let name = sqlx::Column::name(column).to_string();
        object.insert(name, column_value(row, idx)?);
    }
    Ok(Value::Object(object))
}

/// Decode by the stored value's own type, not the declared column type.
fn column_value(row: &SqliteRow, idx: usize) -> Result<Value, AdminError> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage = raw.type_info().name().to_string();

    let value = match storage.as_str() {
        "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(idx)?),
        "REAL" => serde_json::Number::from_f64(row.try_get_unchecked::<f64, _>(idx)?)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => Value::String(BASE64.encode(row.try_get_unchecked::<Vec<u8>, _>(idx)?)),
        _ => Value::String(row.try_get_unchecked::<String, _>(idx)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_dump_is_an_empty_array() {
        assert_eq!(to_pretty_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn pretty_output_uses_four_space_indent() {
        let rows = vec![json!({"id": 1, "username": "alice"})];
        let out = to_pretty_json(&rows).unwrap();
        assert_eq!(
            out,
            "[\n    {\n        \"id\": 1,\n        \"username\": \"alice\"\n    }\n]"
        );
    }
}
