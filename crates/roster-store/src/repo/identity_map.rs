//! Identity map keyed by row id

use std::collections::HashMap;
use std::rc::Rc;

use roster_core::Shared;

/// One live instance per persisted row
///
/// Not thread-safe (no Arc/RwLock); owned by a single-threaded `Session`.
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: HashMap<i64, Shared<T>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IdentityMap<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Get the cached handle for `id`
    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Check whether `handle` is the instance cached under `id`
    pub fn holds(&self, id: i64, handle: &Shared<T>) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|cached| Rc::ptr_eq(cached, handle))
    }

    /// Register `handle` as the live instance for `id`, replacing any entry
    pub fn register(&mut self, id: i64, handle: Shared<T>) {
        self.entries.insert(id, handle);
    }

    /// Evict the entry for `id`
    pub fn remove(&mut self, id: i64) -> Option<Shared<T>> {
        self.entries.remove(&id)
    }

    /// Cached ids in ascending order
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
