// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::{NoteBrowser, NoteCreator, NoteDeleter, NoteLister, QueryCache};
use crate::cli::args::{Args, Command};
use crate::domain::NoteCreationData;
use crate::infrastructure::{Config, NoteHubClient};
use crate::ports::TextPresenter;

pub async fn run(args: Args) -> Result<()> {
    debug!(command = ?args.command, config = ?args.config, "Starting notehub");

    // Initialize infrastructure
    let config = Config::load_or_default(args.config.as_deref())?;
    let settings = config.client_settings(args.base_url.as_deref(), args.token.as_deref());
    let repository = Arc::new(NoteHubClient::new(&settings)?);
    let cache = QueryCache::new();
    let presenter = TextPresenter::new();

    match args.command {
        Command::List {
            page,
            per_page,
            search,
            json,
        } => {
            let per_page = per_page.unwrap_or(config.list.per_page);
            let lister = NoteLister::new(repository, cache);

            info!(page, per_page, ?search, "Listing notes");
            let result = lister
                .list_notes(page, per_page, search.as_deref().unwrap_or(""))
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&*result)?);
            } else {
                print!("{}", presenter.render_page(&result));
            }
        }
        Command::Create {
            title,
            content,
            tag,
            json,
        } => {
            let creator = NoteCreator::new(repository, cache);
            let note = creator
                .create_note(NoteCreationData::new(title, content, tag))
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&note)?);
            } else {
                print!("{}", presenter.render_note(&note));
            }
        }
        Command::Delete { id, json } => {
            let mut deleter = NoteDeleter::new(repository, cache);
            info!(note_id = %id, "Deleting note");
            let note = deleter.delete_note(&id).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&note)?);
            } else {
                print!("Deleted:\n{}", presenter.render_note(&note));
            }
        }
        Command::Browse { per_page } => {
            let options = config.browser_options(per_page);
            let mut browser = NoteBrowser::new(repository, cache, options);

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            println!("{}", ports::browse::HELP);
            ports::run_session(&mut browser, stdin, &mut stdout)
                .await
                .context("Browse session failed")?;
        }
    }

    Ok(())
}
