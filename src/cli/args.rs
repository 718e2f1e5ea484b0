// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{BASE_URL_ENV_VAR, TOKEN_ENV_VAR};
use crate::domain::NoteTag;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Base URL of the NoteHub API (optional)
    #[arg(long, value_name = "URL", env = BASE_URL_ENV_VAR, global = true)]
    pub base_url: Option<String>,

    /// Bearer token for the API (optional if set in the config file)
    #[arg(long, value_name = "TOKEN", env = TOKEN_ENV_VAR, hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (list, create, delete, or browse)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List one page of notes
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Notes per page (defaults to the config file value)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        per_page: Option<u32>,

        /// Only list notes matching this text
        #[arg(short, long, value_name = "SEARCH")]
        search: Option<String>,

        /// Output the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Create {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        content: String,

        #[arg(long, value_enum, ignore_case = true)]
        tag: NoteTag,

        /// Output the created note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note by ID
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        id: String,

        /// Output the deleted note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse notes interactively with search and paging
    Browse {
        /// Notes per page (defaults to the config file value)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        per_page: Option<u32>,
    },
}
