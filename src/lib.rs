//! Registrar: student records admin over PostgreSQL.
//!
//! An entity descriptor ([`entity::EntityDef`]) declares a table and its
//! editable text fields; SQL, DDL, form validation, HTML views, and the five
//! CRUD routes (list, detail, new, edit, delete) are all derived from it.

pub mod config;
pub mod entity;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod view;

#[cfg(feature = "testkit")]
pub mod testkit;

pub use config::Config;
pub use entity::{EntityDef, FieldDef, STUDENT};
pub use error::AppError;
pub use routes::{app_router, common_routes, entity_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, PgStore, Record, RecordStore};
