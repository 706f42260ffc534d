//! Memoizing table of output targets
//!
//! A target is constructed the first time its key is requested and the same
//! instance is handed out for the rest of the pass. Entries are never
//! removed. The cache is single-threaded; a generation pass owns it.

use indexmap::IndexMap;

use crate::error::OutputError;
use crate::key::TargetKey;

/// Lazily populated mapping from [`TargetKey`] to a target object
#[derive(Debug)]
pub struct TargetCache<V> {
    entries: IndexMap<TargetKey, V>,
}

impl<V> Default for TargetCache<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> TargetCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the target for `key`, building it with `factory` on a miss
    ///
    /// A failing factory leaves the cache untouched.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        key: &TargetKey,
        factory: F,
    ) -> Result<&mut V, OutputError>
    where
        F: FnOnce(&TargetKey) -> Result<V, OutputError>,
    {
        let index = match self.entries.get_index_of(key) {
            Some(index) => index,
            None => {
                let value = factory(key)?;
                tracing::debug!(key = %key, "created output target");
                self.entries.insert_full(key.clone(), value).0
            }
        };
        // Index was either found or just inserted.
        Ok(&mut self.entries[index])
    }

    /// Get the target for `key`, building it with an infallible factory
    pub fn get_or_insert_with<F>(&mut self, key: &TargetKey, factory: F) -> &mut V
    where
        F: FnOnce(&TargetKey) -> V,
    {
        if !self.entries.contains_key(key) {
            tracing::debug!(key = %key, "created output target");
        }
        self.entries
            .entry(key.clone())
            .or_insert_with(|| factory(key))
    }

    pub fn get(&self, key: &TargetKey) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &TargetKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &TargetKey> {
        self.entries.keys()
    }

    /// Targets in insertion order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }
}
