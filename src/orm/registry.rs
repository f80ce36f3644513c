//! Per-type identity maps.
//!
//! Every entity type owns one `static` [`Registry`]. It maps ids to the single
//! live instance for that id, tracks the highest id seen, and remembers which
//! store the type is bound to. The whole state sits behind one mutex so id
//! allocation and insertion happen in a single critical section.

use super::error::{OrmError, Result};
use super::model::{Handle, Model};
use crate::db::db::Store;
use parking_lot::{const_mutex, Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;

struct RegistryState<E> {
    store: Option<Store>,
    objects: BTreeMap<i64, Handle<E>>,
    max_id: i64,
}

pub struct Registry<E> {
    state: Mutex<RegistryState<E>>,
}

impl<E> Registry<E> {
    pub const fn new() -> Self {
        Self {
            state: const_mutex(RegistryState {
                store: None,
                objects: BTreeMap::new(),
                max_id: 0,
            }),
        }
    }
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Model> Registry<E> {
    pub fn get(&self, id: i64) -> Option<Handle<E>> {
        self.state.lock().objects.get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.state.lock().objects.contains_key(&id)
    }

    /// Every live instance, ordered by id.
    pub fn all(&self) -> Vec<Handle<E>> {
        self.state.lock().objects.values().cloned().collect()
    }

    /// Live instances paired with their ids, so callers can skip an entity
    /// they already hold locked.
    pub fn entries(&self) -> Vec<(i64, Handle<E>)> {
        self.state
            .lock()
            .objects
            .iter()
            .map(|(id, handle)| (*id, Arc::clone(handle)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().objects.is_empty()
    }

    pub fn max_id(&self) -> i64 {
        self.state.lock().max_id
    }

    /// The store this type persists to.
    pub fn store(&self) -> Result<Store> {
        self.state.lock().store.clone().ok_or(OrmError::StoreNotOpen(E::TABLE))
    }

    pub fn store_name(&self) -> Option<String> {
        self.state.lock().store.as_ref().map(|s| s.name.clone())
    }

    /// Bind to `store` and drop every loaded instance.
    pub fn bind(&self, store: Store) {
        let mut state = self.state.lock();
        state.store = Some(store);
        state.objects.clear();
        state.max_id = 0;
    }

    /// Point at a renamed store without touching loaded instances.
    pub fn rebind(&self, store: Store) {
        self.state.lock().store = Some(store);
    }

    /// Unbind and drop every loaded instance.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.store = None;
        state.objects.clear();
        state.max_id = 0;
    }

    /// Register an instance under its own id, raising `max_id` if needed.
    /// Refused when the id is already live.
    pub fn register(&self, entity: E) -> Result<Handle<E>> {
        let id = entity.id();
        let mut state = self.state.lock();
        if state.objects.contains_key(&id) {
            return Err(OrmError::DuplicateId { table: E::TABLE, id });
        }
        let handle = Arc::new(RwLock::new(entity));
        state.objects.insert(id, Arc::clone(&handle));
        state.max_id = state.max_id.max(id);
        Ok(handle)
    }

    /// Make sure ids up to `id` are never handed out again.
    pub fn reserve_up_to(&self, id: i64) {
        let mut state = self.state.lock();
        state.max_id = state.max_id.max(id);
    }

    /// Allocate `max_id + 1`, build the instance for it and register it,
    /// all under one lock.
    pub fn insert_new<F>(&self, build: F) -> Result<Handle<E>>
    where
        F: FnOnce(i64) -> Result<E>,
    {
        let mut state = self.state.lock();
        let id = state.max_id + 1;
        let handle = Arc::new(RwLock::new(build(id)?));
        state.objects.insert(id, Arc::clone(&handle));
        state.max_id = id;
        Ok(handle)
    }

    /// Remove `id` from the map. `max_id` is left alone so ids are not reused.
    pub fn evict(&self, id: i64) -> Option<Handle<E>> {
        self.state.lock().objects.remove(&id)
    }
}
