// src/infrastructure/notehub.rs
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::application::NoteRepository;
use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::domain::{DomainError, ListQuery, Note, NoteCreationData, PageResult};
use crate::infrastructure::envelope::normalize_list_body;

/// Connection settings for [`NoteHubClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// HTTP implementation of [`NoteRepository`] for the NoteHub API.
#[derive(Debug, Clone)]
pub struct NoteHubClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl NoteHubClient {
    /// Build a client. Fails when no token is configured or the base URL is unusable.
    pub fn new(settings: &ClientSettings) -> Result<Self, DomainError> {
        let token = settings
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                DomainError::Config(
                    "No API token configured. Set NOTEHUB_TOKEN, pass --token, or add token to the [api] section of the config file".to_string(),
                )
            })?
            .to_string();

        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            DomainError::Config(format!("Invalid base URL '{}': {e}", settings.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::Config(format!(
                "Base URL '{}' cannot carry a path",
                settings.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to create HTTP client: {e}")))?;

        debug!(base_url = %base_url, "Created NoteHub client");
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Append path segments to the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn check_status(
        operation: Operation,
        response: Response,
    ) -> Result<Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status(operation, status, body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&body)
            .map_err(|e| DomainError::Server(format!("Unexpected response body: {e}")))
    }
}

#[async_trait]
impl NoteRepository for NoteHubClient {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self, query: &ListQuery) -> Result<PageResult, DomainError> {
        let mut request = self
            .client
            .get(self.endpoint(&["notes"]))
            .bearer_auth(&self.token)
            .query(&[("page", query.page), ("perPage", query.per_page)]);
        if let Some(search) = &query.search {
            request = request.query(&[("search", search)]);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let response = Self::check_status(Operation::List, response).await?;
        let body = response.bytes().await.map_err(map_transport_error)?;

        let page = normalize_list_body(&body, query)?;
        debug!(
            count = page.notes.len(),
            total_pages = page.pagination.total_pages,
            "Fetched notes"
        );
        Ok(page)
    }

    #[instrument(level = "debug", skip(self, data), fields(title = %data.title))]
    async fn create_note(&self, data: &NoteCreationData) -> Result<Note, DomainError> {
        let response = self
            .client
            .post(self.endpoint(&["notes"]))
            .bearer_auth(&self.token)
            .json(data)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = Self::check_status(Operation::Create, response).await?;

        let note: Note = Self::decode(response).await?;
        info!(note_id = %note.id, "Note created remotely");
        Ok(note)
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &str) -> Result<Note, DomainError> {
        let response = self
            .client
            .delete(self.endpoint(&["notes", id]))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = match Self::check_status(Operation::Delete, response).await {
            Err(DomainError::NotFound(_)) => return Err(DomainError::NotFound(id.to_string())),
            other => other?,
        };

        let note: Note = Self::decode(response).await?;
        info!(note_id = %note.id, "Note deleted remotely");
        Ok(note)
    }
}

fn map_transport_error(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::Network(format!("Request timed out: {err}"))
    } else {
        DomainError::Network(err.to_string())
    }
}

/// Request kinds whose failures map to different error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Create,
    Delete,
}

/// Validation errors only exist for create and not-found only for delete;
/// any other rejection is a server error.
fn map_status(operation: Operation, status: StatusCode, body: String) -> DomainError {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{status}: {}", body.trim())
    };
    match (operation, status) {
        (_, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => DomainError::Auth(detail),
        (Operation::Create, StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY) => {
            DomainError::Validation(detail)
        }
        (Operation::Delete, StatusCode::NOT_FOUND) => DomainError::NotFound(detail),
        _ => DomainError::Server(detail),
    }
}
