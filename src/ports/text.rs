// src/ports/text.rs
use std::fmt::Write;

use crate::application::{NoteBrowser, NoteRepository};
use crate::constants::CONTENT_PREVIEW_CHARS;
use crate::domain::{Note, NoteListItem, PageResult, Pagination};
use crate::util::text::preview;

pub const LOADING_LINE: &str = "Loading notes...";
pub const EMPTY_LINE: &str = "No notes found. Try adjusting your search.";

/// Plain-text rendering of notes and list state.
#[derive(Debug, Clone)]
pub struct TextPresenter {
    preview_chars: usize,
}

impl TextPresenter {
    pub fn new() -> Self {
        Self {
            preview_chars: CONTENT_PREVIEW_CHARS,
        }
    }

    pub fn with_preview_chars(preview_chars: usize) -> Self {
        Self { preview_chars }
    }

    fn write_item(&self, out: &mut String, item: &NoteListItem, deleting: bool) {
        let marker = if deleting { "deleting..." } else { "delete: d <id>" };
        let _ = writeln!(out, "[{}] {}  (id: {}, {marker})", item.tag, item.title, item.id);
        let body = preview(&item.content, self.preview_chars);
        if !body.is_empty() {
            let _ = writeln!(out, "    {body}");
        }
    }

    fn write_pagination(&self, out: &mut String, pagination: &Pagination) {
        if pagination.total_pages <= 1 {
            return;
        }
        let _ = write!(out, "Page {} of {}", pagination.page, pagination.total_pages);
        if let Some(total) = pagination.total {
            let _ = write!(out, " ({total} notes)");
        }
        out.push('\n');
    }

    /// One page as printed by `notehub list`
    pub fn render_page(&self, page: &PageResult) -> String {
        let mut out = String::new();
        if page.is_empty() {
            let _ = writeln!(out, "{EMPTY_LINE}");
        }
        for item in &page.notes {
            self.write_item(&mut out, item, false);
        }
        self.write_pagination(&mut out, &page.pagination);
        out
    }

    /// The whole list view of a browse session.
    ///
    /// Previous data stays on screen while a new page loads; a load error
    /// replaces the list.
    pub fn render_browser<R: NoteRepository>(&self, browser: &NoteBrowser<R>) -> String {
        let state = browser.state();
        let mut out = String::new();

        let search = browser.search_input().trim();
        if search.is_empty() {
            let _ = writeln!(out, "== Notes ==");
        } else {
            let _ = writeln!(out, "== Notes matching \"{search}\" ==");
        }

        if state.loading {
            let _ = writeln!(out, "{LOADING_LINE}");
        }

        if let Some(err) = &state.error {
            let _ = writeln!(out, "Failed to load notes: {err}");
        } else if let Some(data) = &state.data {
            if data.is_empty() && !state.loading {
                let _ = writeln!(out, "{EMPTY_LINE}");
            }
            for item in &data.notes {
                self.write_item(&mut out, item, browser.is_delete_pending(&item.id));
            }
            self.write_pagination(&mut out, &data.pagination);
        }

        if let Some(notice) = &state.notice {
            let _ = writeln!(out, "! {notice}");
        }
        out
    }

    /// A single note, as confirmed by create or delete
    pub fn render_note(&self, note: &Note) -> String {
        format!(
            "[{tag}] {title}\n    {content}\n    id: {id}, owner: {owner}, created: {created}, updated: {updated}\n",
            tag = note.tag,
            title = note.title,
            content = preview(&note.content, self.preview_chars),
            id = note.id,
            owner = note.owner,
            created = note.created_at.format("%Y-%m-%d %H:%M"),
            updated = note.updated_at.format("%Y-%m-%d %H:%M"),
        )
    }
}

impl Default for TextPresenter {
    fn default() -> Self {
        Self::new()
    }
}
