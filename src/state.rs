//! Shared application state threaded through every handler.

use crate::entity::EntityDef;
use crate::store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Injected store handle; swapped for the in-memory store in tests.
    pub store: Arc<dyn RecordStore>,
    /// The entity this router administers.
    pub entity: &'static EntityDef,
}
