//! Record storage: the `RecordStore` contract, the PostgreSQL implementation,
//! and schema bootstrap.

use crate::entity::EntityDef;
use crate::error::AppError;
use crate::forms::FormValues;
use crate::sql;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{ConnectOptions, PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;

/// One persisted row: assigned primary key plus editable field values keyed by
/// field name.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: i64,
    pub values: HashMap<String, String>,
}

impl Record {
    /// Field value by name; absent fields read as empty.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }
}

/// CRUD contract every backing store honors. The entity descriptor is passed
/// explicitly so one store handle serves any registered entity; the handle
/// itself is injected through [`crate::state::AppState`], never ambient.
///
/// Each operation is a single all-or-nothing write or read. No transactions,
/// no locking: last write wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records in primary-key order (stable across calls).
    async fn list(&self, entity: &EntityDef) -> Result<Vec<Record>, AppError>;

    /// One record by primary key, or `None` when the id is absent.
    async fn get(&self, entity: &EntityDef, id: i64) -> Result<Option<Record>, AppError>;

    /// Persist a new record; the store assigns the id. Returns the created row.
    async fn create(&self, entity: &EntityDef, values: &FormValues) -> Result<Record, AppError>;

    /// Overwrite all editable fields of the record (no partial patch).
    /// `None` when the id is absent.
    async fn update(
        &self,
        entity: &EntityDef,
        id: i64,
        values: &FormValues,
    ) -> Result<Option<Record>, AppError>;

    /// Hard delete. `false` when the id is absent.
    async fn delete(&self, entity: &EntityDef, id: i64) -> Result<bool, AppError>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// CREATE TABLE IF NOT EXISTS for every descriptor. Run once at startup.
    pub async fn ensure_tables(&self, entities: &[&EntityDef]) -> Result<(), AppError> {
        for entity in entities {
            let ddl = sql::create_table(entity);
            tracing::debug!(sql = %ddl, "ensure table");
            sqlx::query(&ddl).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn row_to_record(entity: &EntityDef, row: &PgRow) -> Result<Record, AppError> {
    let id: i64 = row.try_get("id")?;
    let mut values = HashMap::with_capacity(entity.fields.len());
    for f in entity.fields {
        values.insert(f.name.to_string(), row.try_get::<String, _>(f.name)?);
    }
    Ok(Record { id, values })
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list(&self, entity: &EntityDef) -> Result<Vec<Record>, AppError> {
        let q = sql::select_list(entity);
        tracing::debug!(sql = %q, "query");
        let rows = sqlx::query(&q).fetch_all(&self.pool).await?;
        rows.iter().map(|r| row_to_record(entity, r)).collect()
    }

    async fn get(&self, entity: &EntityDef, id: i64) -> Result<Option<Record>, AppError> {
        let q = sql::select_by_id(entity);
        tracing::debug!(sql = %q, id, "query");
        let row = sqlx::query(&q).bind(id).fetch_optional(&self.pool).await?;
        row.map(|r| row_to_record(entity, &r)).transpose()
    }

    async fn create(&self, entity: &EntityDef, values: &FormValues) -> Result<Record, AppError> {
        let q = sql::insert(entity, values);
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p);
        }
        let row = query.fetch_one(&self.pool).await?;
        row_to_record(entity, &row)
    }

    async fn update(
        &self,
        entity: &EntityDef,
        id: i64,
        values: &FormValues,
    ) -> Result<Option<Record>, AppError> {
        let q = sql::update(entity, values);
        tracing::debug!(sql = %q.sql, id, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p);
        }
        let row = query.bind(id).fetch_optional(&self.pool).await?;
        row.map(|r| row_to_record(entity, &r)).transpose()
    }

    async fn delete(&self, entity: &EntityDef, id: i64) -> Result<bool, AppError> {
        let q = sql::delete(entity);
        tracing::debug!(sql = %q, id, "query");
        let done = sqlx::query(&q).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to
/// the default `postgres` database to run CREATE DATABASE. Call before creating
/// the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_name_parsed_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost:5432/registrar").unwrap();
        assert_eq!(admin, "postgres://localhost:5432/postgres");
        assert_eq!(name, "registrar");
    }

    #[test]
    fn db_name_ignores_query_string() {
        let (_, name) =
            parse_db_name_from_url("postgres://localhost/registrar?sslmode=disable").unwrap();
        assert_eq!(name, "registrar");
    }
}
