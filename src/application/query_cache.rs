// src/application/query_cache.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::domain::{PageResult, QueryKey};

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<QueryKey, Arc<PageResult>>,
    /// Bumped on every invalidation so in-flight results can tell they are outdated.
    generation: u64,
}

/// Shared page cache keyed by (page, search).
///
/// Cloning yields another handle to the same cache. Every operation replaces a
/// whole entry or drops entries wholesale, so readers never see partial pages.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    state: Arc<Mutex<CacheState>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &QueryKey) -> Option<Arc<PageResult>> {
        self.lock().entries.get(key).cloned()
    }

    pub fn insert(&self, key: QueryKey, page: PageResult) -> Arc<PageResult> {
        let page = Arc::new(page);
        self.lock().entries.insert(key, Arc::clone(&page));
        page
    }

    /// Store `page` only if no invalidation happened since `generation` was read.
    pub fn insert_if_current(
        &self,
        generation: u64,
        key: QueryKey,
        page: Arc<PageResult>,
    ) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            debug!(?key, "Skipping cache write for result fetched before invalidation");
            return false;
        }
        state.entries.insert(key, page);
        true
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Drop every entry whose key matches `predicate`; returns how many were removed.
    pub fn invalidate<F>(&self, predicate: F) -> usize
    where
        F: Fn(&QueryKey) -> bool,
    {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|key, _| !predicate(key));
        state.generation += 1;
        let removed = before - state.entries.len();
        debug!(removed, generation = state.generation, "Invalidated cached pages");
        removed
    }

    pub fn invalidate_all(&self) -> usize {
        self.invalidate(|_| true)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
