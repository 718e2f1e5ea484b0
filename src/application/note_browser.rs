// src/application/note_browser.rs
//
// List/search/paginate coordination. The browser owns the page number and the
// search text, derives the fetch key from (page, debounced search), and only
// lets a fetch result through when it still belongs to the current key.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use crate::application::debounce::Debouncer;
use crate::application::note_deleter::DeleteTicket;
use crate::application::{NoteCreator, NoteDeleter, NoteRepository, QueryCache};
use crate::constants::{DEFAULT_DEBOUNCE_MS, DEFAULT_PER_PAGE};
use crate::domain::{DomainError, ListQuery, Note, NoteCreationData, PageResult, QueryKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserOptions {
    pub per_page: u32,
    pub debounce: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

/// What the list view shows.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Last applied page. Kept while a newer key is loading.
    pub data: Option<Arc<PageResult>>,
    pub shown_key: Option<QueryKey>,
    pub loading: bool,
    pub error: Option<DomainError>,
    /// One-off message from a create or delete, shown until dismissed.
    pub notice: Option<String>,
}

/// A planned list request for one key.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    key: QueryKey,
    query: ListQuery,
    request_id: u64,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub async fn run<R: NoteRepository>(
        self,
        repository: Arc<R>,
    ) -> (FetchTicket, Result<PageResult, DomainError>) {
        let result = repository.list_notes(&self.query).await;
        (self, result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Discarded,
}

pub struct NoteBrowser<R: NoteRepository> {
    repository: Arc<R>,
    cache: QueryCache,
    deleter: NoteDeleter<R>,
    per_page: u32,
    page: u32,
    search_input: String,
    debounced_search: String,
    debouncer: Debouncer<String>,
    next_request_id: u64,
    latest_request: HashMap<QueryKey, u64>,
    state: ListState,
}

impl<R: NoteRepository> NoteBrowser<R> {
    pub fn new(repository: Arc<R>, cache: QueryCache, options: BrowserOptions) -> Self {
        Self {
            deleter: NoteDeleter::new(Arc::clone(&repository), cache.clone()),
            repository,
            cache,
            per_page: options.per_page.max(1),
            page: 1,
            search_input: String::new(),
            debounced_search: String::new(),
            debouncer: Debouncer::new(options.debounce),
            next_request_id: 0,
            latest_request: HashMap::new(),
            state: ListState::default(),
        }
    }

    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey::new(self.page, self.debounced_search.trim())
    }

    /// Highest page reported by the last successful fetch.
    pub fn last_page(&self) -> u32 {
        self.state
            .data
            .as_ref()
            .map_or(1, |data| data.pagination.last_page())
    }

    pub fn is_delete_pending(&self, id: &str) -> bool {
        self.deleter.is_pending(id)
    }

    // ---- search ----

    /// Record an edit of the search field. The fetch key follows only once the
    /// text has been stable for the debounce period.
    pub fn set_search_input(&mut self, text: &str, now: Instant) {
        self.search_input = text.to_string();
        self.debouncer.push(self.search_input.clone(), now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Apply the debounced search if its quiet period is over; true when the key changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(value) => self.apply_debounced_search(value),
            None => false,
        }
    }

    pub fn flush_search(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(value) => self.apply_debounced_search(value),
            None => false,
        }
    }

    fn apply_debounced_search(&mut self, value: String) -> bool {
        if value.trim() == self.debounced_search.trim() {
            self.debounced_search = value;
            return false;
        }
        debug!(search = %value, previous_page = self.page, "Search settled, back to page 1");
        self.debounced_search = value;
        self.page = 1;
        true
    }

    // ---- pagination ----

    /// Move to `page`, clamped to the known page range; true when the key changed.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.last_page());
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1))
    }

    // ---- fetching ----

    /// Plan a fetch for the current key.
    ///
    /// A cached page is applied right away and yields `None`. Otherwise the
    /// request is registered as the newest one for its key and the previous
    /// data stays visible while it runs.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let key = self.query_key();

        if let Some(cached) = self.cache.get(&key) {
            debug!(?key, "Applying cached page");
            self.show(key, cached);
            return None;
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.latest_request.insert(key.clone(), request_id);
        self.state.loading = true;

        debug!(?key, request_id, "Fetching page");
        Some(FetchTicket {
            query: key.to_query(self.per_page),
            key,
            request_id,
            generation: self.cache.generation(),
        })
    }

    /// Hand back a finished fetch. Results for keys the user has moved away
    /// from, or superseded by a newer request for the same key, are dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageResult, DomainError>,
    ) -> FetchOutcome {
        let is_latest = self.latest_request.get(&ticket.key) == Some(&ticket.request_id);
        if is_latest {
            self.latest_request.remove(&ticket.key);
        }
        let is_current = is_latest && ticket.key == self.query_key();

        match result {
            Ok(page) => {
                let page = Arc::new(page);
                self.cache
                    .insert_if_current(ticket.generation, ticket.key.clone(), Arc::clone(&page));
                if !is_current {
                    debug!(key = ?ticket.key, request_id = ticket.request_id, "Discarding stale page");
                    return FetchOutcome::Discarded;
                }
                self.show(ticket.key, page);
                FetchOutcome::Applied
            }
            Err(err) => {
                if !is_current {
                    debug!(key = ?ticket.key, error = %err, "Discarding stale fetch error");
                    return FetchOutcome::Discarded;
                }
                info!(key = ?ticket.key, error = %err, "Failed to load notes");
                self.state.loading = false;
                self.state.error = Some(err);
                FetchOutcome::Applied
            }
        }
    }

    fn show(&mut self, key: QueryKey, page: Arc<PageResult>) {
        self.state.data = Some(page);
        self.state.shown_key = Some(key);
        self.state.loading = false;
        self.state.error = None;
    }

    /// Fetch the current key and apply the result, one request at a time.
    #[instrument(level = "debug", skip(self), fields(page = self.page, search = %self.debounced_search))]
    pub async fn refresh(&mut self) -> FetchOutcome {
        match self.begin_fetch() {
            Some(ticket) => {
                let (ticket, result) = ticket.run(Arc::clone(&self.repository)).await;
                self.complete_fetch(ticket, result)
            }
            None => FetchOutcome::Applied,
        }
    }

    /// Drop the cached current page so the next fetch goes to the service.
    pub fn invalidate_current(&mut self) {
        let key = self.query_key();
        self.cache.invalidate(|candidate| *candidate == key);
    }

    // ---- mutations ----

    /// Reserve a delete for `id`; `None` while one is already in flight.
    pub fn begin_delete(&mut self, id: &str) -> Option<DeleteTicket> {
        self.deleter.begin(id)
    }

    /// Settle a delete. On success every cached page is gone and the caller
    /// should fetch again; on failure the list stays as it is.
    pub fn finish_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<Note, DomainError>,
    ) -> Result<Note, DomainError> {
        let outcome = self.deleter.finish(ticket, result);
        self.state.notice = Some(match &outcome {
            Ok(note) => format!("Deleted \"{}\"", note.title),
            Err(err) => format!("Failed to delete note: {err}"),
        });
        outcome
    }

    /// Delete a note, then reload the current page if it succeeded
    pub async fn delete_note(&mut self, id: &str) -> Result<Note, DomainError> {
        let ticket = self.begin_delete(id).ok_or_else(|| {
            DomainError::Validation(format!("Delete already in progress for note {id}"))
        })?;
        let (ticket, result) = ticket.run(Arc::clone(&self.repository)).await;
        let note = self.finish_delete(ticket, result)?;
        self.refresh().await;
        Ok(note)
    }

    /// A creator sharing this browser's repository and cache, for running a
    /// create off the input loop.
    pub fn creator(&self) -> NoteCreator<R> {
        NoteCreator::new(Arc::clone(&self.repository), self.cache.clone())
    }

    /// Settle a create. The creator already dropped the cached pages.
    pub fn finish_create(&mut self, result: Result<Note, DomainError>) -> Result<Note, DomainError> {
        self.state.notice = Some(match &result {
            Ok(note) => format!("Created \"{}\"", note.title),
            Err(err) => format!("Failed to create note: {err}"),
        });
        result
    }

    /// Create a note, then reload the current page if it succeeded
    pub async fn create_note(&mut self, data: NoteCreationData) -> Result<Note, DomainError> {
        let result = self.creator().create_note(data).await;
        let note = self.finish_create(result)?;
        self.refresh().await;
        Ok(note)
    }

    pub fn dismiss_notice(&mut self) -> Option<String> {
        self.state.notice.take()
    }
}
