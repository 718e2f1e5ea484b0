// src/domain/page.rs
use serde::Serialize;

use crate::domain::NoteListItem;

/// Number of pages needed to hold `total` items (0 when there are none).
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if total == 0 || per_page == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    /// Not every envelope reports the item count.
    pub total: Option<u64>,
}

impl Pagination {
    pub fn from_total(page: u32, per_page: u32, total: u64) -> Self {
        Self {
            page,
            per_page,
            total_pages: total_pages(total, per_page),
            total: Some(total),
        }
    }

    /// Highest page a caller may navigate to; an empty result still has page 1.
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub notes: Vec<NoteListItem>,
    pub pagination: Pagination,
}

impl PageResult {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Parameters of a single list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

impl ListQuery {
    /// Blank search text means "no filter" and is never sent.
    pub fn new(page: u32, per_page: u32, search: &str) -> Self {
        let search = search.trim();
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    pub fn key(&self) -> QueryKey {
        QueryKey {
            page: self.page,
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

/// Identity of a cached page: (page, debounced search).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub search: String,
}

impl QueryKey {
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            search: search.into(),
        }
    }

    pub fn to_query(&self, per_page: u32) -> ListQuery {
        ListQuery::new(self.page, per_page, &self.search)
    }
}
