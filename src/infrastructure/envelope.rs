// src/infrastructure/envelope.rs
//
// The notes endpoint has been seen answering with two different list shapes:
//
//   { "notes": [...], "totalPages": 3 }
//   { "data": [...], "meta": { "page": 1, "perPage": 12, "pages": 3, "total": 30 } }
//
// Both are folded into one PageResult here so nothing above the client cares.
use serde::Deserialize;
use tracing::warn;

use crate::domain::{total_pages, DomainError, ListQuery, NoteListItem, PageResult, Pagination};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotesEnvelope {
    Expanded {
        data: Vec<NoteListItem>,
        meta: PageMeta,
    },
    Flat {
        notes: Vec<NoteListItem>,
        #[serde(rename = "totalPages")]
        total_pages: u32,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    page: u32,
    per_page: u32,
    pages: u32,
    total: u64,
}

/// Decode a list response body, taking page and size from `query` when the
/// body does not report them.
pub fn normalize_list_body(body: &[u8], query: &ListQuery) -> Result<PageResult, DomainError> {
    let envelope: NotesEnvelope = serde_json::from_slice(body)
        .map_err(|e| DomainError::Server(format!("Unrecognized notes envelope: {e}")))?;

    Ok(match envelope {
        NotesEnvelope::Flat { notes, total_pages } => PageResult {
            notes,
            pagination: Pagination {
                page: query.page,
                per_page: query.per_page,
                total_pages,
                total: None,
            },
        },
        NotesEnvelope::Expanded { data, meta } => {
            let expected = total_pages(meta.total, meta.per_page);
            if expected != meta.pages {
                warn!(
                    reported = meta.pages,
                    expected,
                    total = meta.total,
                    per_page = meta.per_page,
                    "Page count in envelope does not match total"
                );
            }
            PageResult {
                notes: data,
                pagination: Pagination {
                    page: meta.page,
                    per_page: meta.per_page,
                    total_pages: meta.pages,
                    total: Some(meta.total),
                },
            }
        }
    })
}
