// src/application/note_creator.rs
use std::sync::Arc;
use tracing::{info, instrument};

use crate::application::{NoteRepository, QueryCache};
use crate::domain::{DomainError, Note, NoteCreationData};

pub struct NoteCreator<R: NoteRepository> {
    repository: Arc<R>,
    cache: QueryCache,
}

impl<R: NoteRepository> NoteCreator<R> {
    pub fn new(repository: Arc<R>, cache: QueryCache) -> Self {
        Self { repository, cache }
    }

    /// Create a note and drop every cached page, since any of them may now be shifted
    #[instrument(level = "debug", skip(self), fields(title = %data.title, tag = %data.tag))]
    pub async fn create_note(&self, data: NoteCreationData) -> Result<Note, DomainError> {
        let data = data.validated()?;
        let note = self.repository.create_note(&data).await?;

        let invalidated = self.cache.invalidate_all();
        info!(note_id = %note.id, invalidated, "Created note");
        Ok(note)
    }
}
