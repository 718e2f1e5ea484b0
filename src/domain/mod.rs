// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod page;

pub use error::DomainError;
pub use note::{Note, NoteCreationData, NoteListItem, NoteTag};
pub use page::{total_pages, ListQuery, PageResult, Pagination, QueryKey};
