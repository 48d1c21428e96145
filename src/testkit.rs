//! In-memory [`RecordStore`] for hermetic tests. Same normalization as the
//! PostgreSQL store: only editable fields persist, missing values become empty
//! strings, ids are assigned monotonically and never reused.

use crate::entity::EntityDef;
use crate::error::AppError;
use crate::forms::FormValues;
use crate::store::{Record, RecordStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<MemInner>,
}

#[derive(Default)]
struct MemInner {
    next_id: i64,
    rows: BTreeMap<i64, FormValues>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn normalized(entity: &EntityDef, values: &FormValues) -> FormValues {
    entity
        .fields
        .iter()
        .map(|f| {
            (
                f.name.to_string(),
                values.get(f.name).cloned().unwrap_or_default(),
            )
        })
        .collect()
}

#[async_trait]
impl RecordStore for MemStore {
    async fn list(&self, _entity: &EntityDef) -> Result<Vec<Record>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .map(|(&id, values)| Record {
                id,
                values: values.clone(),
            })
            .collect())
    }

    async fn get(&self, _entity: &EntityDef, id: i64) -> Result<Option<Record>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.get(&id).map(|values| Record {
            id,
            values: values.clone(),
        }))
    }

    async fn create(&self, entity: &EntityDef, values: &FormValues) -> Result<Record, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        let values = normalized(entity, values);
        inner.rows.insert(id, values.clone());
        Ok(Record { id, values })
    }

    async fn update(
        &self,
        entity: &EntityDef,
        id: i64,
        values: &FormValues,
    ) -> Result<Option<Record>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.rows.contains_key(&id) {
            return Ok(None);
        }
        let values = normalized(entity, values);
        inner.rows.insert(id, values.clone());
        Ok(Some(Record { id, values }))
    }

    async fn delete(&self, _entity: &EntityDef, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.rows.remove(&id).is_some())
    }
}
