// src/application/repository.rs
use async_trait::async_trait;

use crate::domain::{DomainError, ListQuery, Note, NoteCreationData, PageResult};

/// Remote note storage.
///
/// Implementations hold no per-request state and are shared behind an `Arc`
/// between the coordinator and spawned fetch tasks.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Fetch one page of notes. Pages past the end yield an empty list.
    async fn list_notes(&self, query: &ListQuery) -> Result<PageResult, DomainError>;

    async fn create_note(&self, data: &NoteCreationData) -> Result<Note, DomainError>;

    /// Delete a note and return it as confirmation
    async fn delete_note(&self, id: &str) -> Result<Note, DomainError>;
}
