use anyhow::{Context, Result};
use notehub::infrastructure::{ClientSettings, NoteHubClient};
use std::path::PathBuf;
use std::time::Duration;

pub const TEST_TOKEN: &str = "test-token";

/// Read a JSON fixture from `tests/fixtures`
pub fn fixture(name: &str) -> Result<String> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))
}

/// Client pointed at a mock server, authenticated with [`TEST_TOKEN`]
pub fn client_for(base_url: &str) -> Result<NoteHubClient> {
    let settings = ClientSettings {
        base_url: base_url.to_string(),
        token: Some(TEST_TOKEN.to_string()),
        timeout: Duration::from_secs(5),
    };
    Ok(NoteHubClient::new(&settings)?)
}

/// Known ids from the JSON fixtures
#[allow(dead_code)]
pub mod fixture_notes {
    pub const WEEKLY_PLANNING: &str = "65f1a0c2e4b0a1b2c3d4e5f6";
    pub const GROCERIES: &str = "65f1a0c2e4b0a1b2c3d4e5f7";
    pub const DENTIST: &str = "65f1a0c2e4b0a1b2c3d4e5f8";
    pub const PLUMBER: &str = "65f1a0c2e4b0a1b2c3d4e5f9";
}
