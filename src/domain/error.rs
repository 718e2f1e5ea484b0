// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication rejected: {0}")]
    Auth(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Note not found: {0}")]
    NotFound(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
