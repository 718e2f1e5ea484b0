// src/constants.rs
//
// Application-wide defaults. Each can be overridden from the config file or
// the command line unless noted otherwise.

/// Base URL of the public NoteHub API.
pub const DEFAULT_BASE_URL: &str = "https://notehub-public.goit.study/api";

/// Environment variable holding the bearer token.
pub const TOKEN_ENV_VAR: &str = "NOTEHUB_TOKEN";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV_VAR: &str = "NOTEHUB_BASE_URL";

/// Notes requested per page.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Quiet period before a search edit turns into a request.
///
/// Used in: `application/note_browser.rs`, `infrastructure/config.rs`
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Accepted range for the search quiet period; configured values are clamped into it.
pub const MIN_DEBOUNCE_MS: u64 = 300;
pub const MAX_DEBOUNCE_MS: u64 = 500;

/// HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Characters of note content shown per list entry.
///
/// Used in: `ports/text.rs`
pub const CONTENT_PREVIEW_CHARS: usize = 80;
