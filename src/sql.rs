//! Safe SQL builder: identifiers come from entity descriptors only, values are
//! always bind parameters.

use crate::entity::EntityDef;
use crate::forms::FormValues;

/// Quote identifier for PostgreSQL (safe: only from descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// SQL text plus field-value parameters in bind order.
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

/// Column list for SELECT/RETURNING: pk first, then editable fields in
/// descriptor order.
fn column_list(entity: &EntityDef) -> String {
    let mut cols = vec![quoted("id")];
    cols.extend(entity.fields.iter().map(|f| quoted(f.name)));
    cols.join(", ")
}

/// SELECT all rows ORDER BY primary key, so list order is stable.
pub fn select_list(entity: &EntityDef) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list(entity),
        quoted(entity.table),
        quoted("id")
    )
}

/// SELECT one row by primary key. Caller binds the id as $1.
pub fn select_by_id(entity: &EntityDef) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list(entity),
        quoted(entity.table),
        quoted("id")
    )
}

/// INSERT with every editable field as a parameter, RETURNING the full row.
/// Missing values bind as empty strings (validation runs before the store).
pub fn insert(entity: &EntityDef, values: &FormValues) -> QueryBuf {
    let mut cols = Vec::with_capacity(entity.fields.len());
    let mut placeholders = Vec::with_capacity(entity.fields.len());
    let mut params = Vec::with_capacity(entity.fields.len());
    for (i, f) in entity.fields.iter().enumerate() {
        cols.push(quoted(f.name));
        placeholders.push(format!("${}", i + 1));
        params.push(values.get(f.name).cloned().unwrap_or_default());
    }
    QueryBuf {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(entity.table),
            cols.join(", "),
            placeholders.join(", "),
            column_list(entity)
        ),
        params,
    }
}

/// UPDATE by id: every editable field is overwritten (wholesale replace, no
/// partial patch). The id binds as the final parameter, after `params`.
pub fn update(entity: &EntityDef, values: &FormValues) -> QueryBuf {
    let mut sets = Vec::with_capacity(entity.fields.len());
    let mut params = Vec::with_capacity(entity.fields.len());
    for (i, f) in entity.fields.iter().enumerate() {
        sets.push(format!("{} = ${}", quoted(f.name), i + 1));
        params.push(values.get(f.name).cloned().unwrap_or_default());
    }
    let id_param = params.len() + 1;
    QueryBuf {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            quoted(entity.table),
            sets.join(", "),
            quoted("id"),
            id_param,
            column_list(entity)
        ),
        params,
    }
}

/// DELETE by id. Caller binds the id as $1.
pub fn delete(entity: &EntityDef) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1",
        quoted(entity.table),
        quoted("id")
    )
}

/// CREATE TABLE IF NOT EXISTS from the descriptor. Optional fields default to
/// the empty string so every editable column reads as text.
pub fn create_table(entity: &EntityDef) -> String {
    let mut cols = vec![format!("{} BIGSERIAL PRIMARY KEY", quoted("id"))];
    for f in entity.fields {
        if f.required {
            cols.push(format!("{} TEXT NOT NULL", quoted(f.name)));
        } else {
            cols.push(format!("{} TEXT NOT NULL DEFAULT ''", quoted(f.name)));
        }
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(entity.table),
        cols.join(", ")
    )
}
