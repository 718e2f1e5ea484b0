// src/ports/mod.rs
pub mod browse;
pub mod text;

pub use browse::{run_session, BrowseCommand};
pub use text::TextPresenter;
