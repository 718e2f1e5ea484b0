// src/infrastructure/mod.rs
pub mod config;
pub mod envelope;
pub mod notehub;

pub use config::Config;
pub use notehub::{ClientSettings, NoteHubClient};
