// src/application/note_deleter.rs
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::application::{NoteRepository, QueryCache};
use crate::domain::{DomainError, Note};

/// Permission to delete one note, handed out while no other delete for the same id runs.
#[derive(Debug)]
pub struct DeleteTicket {
    id: String,
}

impl DeleteTicket {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Issue the request; the ticket travels with the result back to [`NoteDeleter::finish`].
    pub async fn run<R: NoteRepository>(
        self,
        repository: Arc<R>,
    ) -> (DeleteTicket, Result<Note, DomainError>) {
        let result = repository.delete_note(&self.id).await;
        (self, result)
    }
}

pub struct NoteDeleter<R: NoteRepository> {
    repository: Arc<R>,
    cache: QueryCache,
    pending: HashSet<String>,
}

impl<R: NoteRepository> NoteDeleter<R> {
    pub fn new(repository: Arc<R>, cache: QueryCache) -> Self {
        Self {
            repository,
            cache,
            pending: HashSet::new(),
        }
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Reserve `id` for deletion; `None` while a delete for it is still in flight.
    pub fn begin(&mut self, id: &str) -> Option<DeleteTicket> {
        if !self.pending.insert(id.to_string()) {
            debug!(note_id = id, "Delete already in flight, ignoring");
            return None;
        }
        Some(DeleteTicket { id: id.to_string() })
    }

    /// Release the reservation and, on success, drop every cached page
    pub fn finish(
        &mut self,
        ticket: DeleteTicket,
        result: Result<Note, DomainError>,
    ) -> Result<Note, DomainError> {
        self.pending.remove(&ticket.id);
        match result {
            Ok(note) => {
                let invalidated = self.cache.invalidate_all();
                info!(note_id = %note.id, invalidated, "Deleted note");
                Ok(note)
            }
            Err(err) => {
                warn!(note_id = %ticket.id, error = %err, "Failed to delete note");
                Err(err)
            }
        }
    }

    /// Delete a note and return it as confirmation
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_note(&mut self, id: &str) -> Result<Note, DomainError> {
        let ticket = self.begin(id).ok_or_else(|| {
            DomainError::Validation(format!("Delete already in progress for note {id}"))
        })?;
        let (ticket, result) = ticket.run(Arc::clone(&self.repository)).await;
        self.finish(ticket, result)
    }
}
