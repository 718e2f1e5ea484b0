// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteRepository;
use crate::domain::{
    DomainError, ListQuery, Note, NoteCreationData, NoteListItem, NoteTag, PageResult, Pagination,
};

/// Build a note with fixed owner and current timestamps
pub fn sample_note(id: &str, title: &str, tag: NoteTag) -> Note {
    let now = Utc::now();
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: format!("Content of {title}"),
        tag,
        created_at: now,
        updated_at: now,
        owner: "test-owner".to_string(),
    }
}

#[derive(Default)]
struct MockState {
    notes: Vec<Note>,
    list_calls: Vec<ListQuery>,
    delete_calls: Vec<String>,
    next_id: usize,
}

/// In-memory repository for testing use cases that depend on NoteRepository
///
/// Notes live in insertion order; listing filters by title/content and slices
/// pages the way the remote service does, so deletes and creates shift pages
/// exactly like the real thing.
///
/// # Examples
///
/// ```
/// use notehub::util::testing::{sample_note, MockNoteRepository};
/// use notehub::domain::NoteTag;
///
/// let mock = MockNoteRepository::builder()
///     .with_note(sample_note("n1", "Groceries", NoteTag::Shopping))
///     .with_generated_notes(24)
///     .build();
/// assert_eq!(mock.note_count(), 25);
/// ```
pub struct MockNoteRepository {
    state: Mutex<MockState>,
    list_failure: Option<DomainError>,
    create_failure: Option<DomainError>,
    delete_failures: HashMap<String, DomainError>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn note_count(&self) -> usize {
        self.lock().notes.len()
    }

    /// Every list query received, in call order
    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.lock().list_calls.clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.lock().delete_calls.clone()
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn list_notes(&self, query: &ListQuery) -> Result<PageResult, DomainError> {
        let mut state = self.lock();
        state.list_calls.push(query.clone());

        if let Some(err) = &self.list_failure {
            return Err(err.clone());
        }

        let needle = query.search.as_deref().map(str::to_lowercase);
        let matching: Vec<&Note> = state
            .notes
            .iter()
            .filter(|note| match &needle {
                None => true,
                Some(needle) => {
                    note.title.to_lowercase().contains(needle)
                        || note.content.to_lowercase().contains(needle)
                }
            })
            .collect();

        let total = matching.len() as u64;
        let offset = (query.page.saturating_sub(1) as usize).saturating_mul(query.per_page as usize);
        let notes = matching
            .into_iter()
            .skip(offset)
            .take(query.per_page as usize)
            .cloned()
            .map(NoteListItem::from)
            .collect();

        Ok(PageResult {
            notes,
            pagination: Pagination::from_total(query.page, query.per_page, total),
        })
    }

    async fn create_note(&self, data: &NoteCreationData) -> Result<Note, DomainError> {
        if let Some(err) = &self.create_failure {
            return Err(err.clone());
        }

        let mut state = self.lock();
        state.next_id += 1;
        let mut note = sample_note(&format!("created-{}", state.next_id), &data.title, data.tag);
        note.content = data.content.clone();
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<Note, DomainError> {
        let mut state = self.lock();
        state.delete_calls.push(id.to_string());

        if let Some(err) = self.delete_failures.get(id) {
            return Err(err.clone());
        }

        let position = state
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        Ok(state.notes.remove(position))
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: Vec<Note>,
    list_failure: Option<DomainError>,
    create_failure: Option<DomainError>,
    delete_failures: HashMap<String, DomainError>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            list_failure: None,
            create_failure: None,
            delete_failures: HashMap::new(),
        }
    }

    /// Add a note that list_notes can return and delete_note can remove
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Add `count` notes with ids `note-1..=note-count`, cycling through all tags
    pub fn with_generated_notes(mut self, count: usize) -> Self {
        let start = self.notes.len();
        for n in 1..=count {
            let tag = NoteTag::ALL[(start + n) % NoteTag::ALL.len()];
            self.notes
                .push(sample_note(&format!("note-{n}"), &format!("Note {n}"), tag));
        }
        self
    }

    /// Make every list_notes call fail with `err`
    pub fn with_list_failure(mut self, err: DomainError) -> Self {
        self.list_failure = Some(err);
        self
    }

    pub fn with_create_failure(mut self, err: DomainError) -> Self {
        self.create_failure = Some(err);
        self
    }

    /// Configure delete_note to fail with `err` for a specific ID
    pub fn with_delete_failure(mut self, id: &str, err: DomainError) -> Self {
        self.delete_failures.insert(id.to_string(), err);
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            state: Mutex::new(MockState {
                notes: self.notes,
                ..MockState::default()
            }),
            list_failure: self.list_failure,
            create_failure: self.create_failure,
            delete_failures: self.delete_failures,
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "rustls"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
