// src/application/mod.rs
pub mod debounce;
pub mod note_browser;
pub mod note_creator;
pub mod note_deleter;
pub mod note_lister;
pub mod query_cache;
pub mod repository;

pub use debounce::Debouncer;
pub use note_browser::{BrowserOptions, FetchOutcome, FetchTicket, ListState, NoteBrowser};
pub use note_creator::NoteCreator;
pub use note_deleter::{DeleteTicket, NoteDeleter};
pub use note_lister::NoteLister;
pub use query_cache::QueryCache;
pub use repository::NoteRepository;
