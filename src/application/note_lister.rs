// src/application/note_lister.rs
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::application::{NoteRepository, QueryCache};
use crate::domain::{DomainError, ListQuery, PageResult};

/// One-shot page lookup backed by the shared cache.
pub struct NoteLister<R: NoteRepository> {
    repository: Arc<R>,
    cache: QueryCache,
}

impl<R: NoteRepository> NoteLister<R> {
    pub fn new(repository: Arc<R>, cache: QueryCache) -> Self {
        Self { repository, cache }
    }

    /// List one page of notes, optionally filtered by a search term
    ///
    /// # Arguments
    /// * `page` - 1-based page number, values below 1 are treated as 1
    /// * `per_page` - Page size requested from the service
    /// * `search` - Search text; blank text lists everything
    #[instrument(level = "debug", skip(self))]
    pub async fn list_notes(
        &self,
        page: u32,
        per_page: u32,
        search: &str,
    ) -> Result<Arc<PageResult>, DomainError> {
        let query = ListQuery::new(page, per_page, search);
        let key = query.key();

        if let Some(cached) = self.cache.get(&key) {
            debug!(?key, "Serving page from cache");
            return Ok(cached);
        }

        let result = self.repository.list_notes(&query).await?;
        Ok(self.cache.insert(key, result))
    }
}
