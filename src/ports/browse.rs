// src/ports/browse.rs
//
// Interactive browse session: line commands in, rendered list out. Everything
// runs on one task; network calls are spawned into a JoinSet and their results
// come back through the same select loop as input and debounce deadlines.
use anyhow::{Context, Result};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::application::{DeleteTicket, FetchTicket, NoteBrowser, NoteRepository};
use crate::domain::{DomainError, Note, NoteCreationData, NoteTag, PageResult};
use crate::ports::text::TextPresenter;

pub const HELP: &str = "Commands: s <text> (search), n (next), p (prev), g <page>, d <id> (delete), \
add <tag> <title> | <content>, r (refresh), q (quit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    NextPage,
    PrevPage,
    GoToPage(u32),
    Delete(String),
    Add(NoteCreationData),
    Refresh,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };

        match word {
            "s" | "search" => Ok(Self::Search(rest.to_string())),
            "n" | "next" => Ok(Self::NextPage),
            "p" | "prev" => Ok(Self::PrevPage),
            "g" | "page" => rest
                .trim()
                .parse::<u32>()
                .map(Self::GoToPage)
                .map_err(|_| format!("Not a page number: '{}'", rest.trim())),
            "d" | "delete" => match rest.trim() {
                "" => Err("Missing note id".to_string()),
                id => Ok(Self::Delete(id.to_string())),
            },
            "add" => parse_add(rest).map(Self::Add),
            "r" | "refresh" => Ok(Self::Refresh),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            "" => Err("Empty command".to_string()),
            other => Err(format!("Unknown command '{other}'")),
        }
    }
}

/// `<tag> <title> | <content>`
fn parse_add(rest: &str) -> Result<NoteCreationData, String> {
    let rest = rest.trim();
    let (tag, rest) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| "Usage: add <tag> <title> | <content>".to_string())?;
    let tag: NoteTag = tag.parse().map_err(|e: DomainError| e.to_string())?;
    let (title, content) = rest.split_once('|').unwrap_or((rest, ""));

    NoteCreationData::new(title, content.trim(), tag)
        .validated()
        .map_err(|e| e.to_string())
}

/// What the loop does after a line of input.
enum Flow {
    Render,
    Quiet,
    Quit,
}

enum TaskOutput {
    Fetch(FetchTicket, Result<PageResult, DomainError>),
    Delete(DeleteTicket, Result<Note, DomainError>),
    Create(Result<Note, DomainError>),
}

struct Session<'a, R: NoteRepository + 'static, W: Write> {
    browser: &'a mut NoteBrowser<R>,
    presenter: TextPresenter,
    tasks: JoinSet<TaskOutput>,
    out: &'a mut W,
}

impl<R: NoteRepository + 'static, W: Write> Session<'_, R, W> {
    fn spawn_fetch(&mut self) {
        if let Some(ticket) = self.browser.begin_fetch() {
            let repository = self.browser.repository();
            self.tasks.spawn(async move {
                let (ticket, result) = ticket.run(repository).await;
                TaskOutput::Fetch(ticket, result)
            });
        }
    }

    fn render(&mut self) -> Result<()> {
        let view = self.presenter.render_browser(&*self.browser);
        self.out
            .write_all(view.as_bytes())
            .and_then(|_| self.out.flush())
            .context("Failed to write list view")
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}").context("Failed to write message")
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = match line.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(err) => {
                self.say(&format!("{err}. {HELP}"))?;
                return Ok(Flow::Quiet);
            }
        };
        debug!(?command, "Browse command");
        self.browser.dismiss_notice();

        match command {
            BrowseCommand::Search(text) => {
                // the list follows once the debounce settles
                self.browser.set_search_input(&text, Instant::now());
                return Ok(Flow::Quiet);
            }
            BrowseCommand::NextPage => {
                if self.browser.next_page() {
                    self.spawn_fetch();
                }
            }
            BrowseCommand::PrevPage => {
                if self.browser.prev_page() {
                    self.spawn_fetch();
                }
            }
            BrowseCommand::GoToPage(page) => {
                if self.browser.go_to_page(page) {
                    self.spawn_fetch();
                }
            }
            BrowseCommand::Refresh => {
                self.browser.invalidate_current();
                self.spawn_fetch();
            }
            BrowseCommand::Delete(id) => match self.browser.begin_delete(&id) {
                Some(ticket) => {
                    let repository = self.browser.repository();
                    self.tasks.spawn(async move {
                        let (ticket, result) = ticket.run(repository).await;
                        TaskOutput::Delete(ticket, result)
                    });
                }
                None => {
                    self.say(&format!("Note {id} is already being deleted"))?;
                    return Ok(Flow::Quiet);
                }
            },
            BrowseCommand::Add(data) => {
                let creator = self.browser.creator();
                self.tasks
                    .spawn(async move { TaskOutput::Create(creator.create_note(data).await) });
            }
            BrowseCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Render)
    }

    fn handle_output(&mut self, output: TaskOutput) {
        match output {
            TaskOutput::Fetch(ticket, result) => {
                self.browser.complete_fetch(ticket, result);
            }
            TaskOutput::Delete(ticket, result) => {
                if self.browser.finish_delete(ticket, result).is_ok() {
                    self.spawn_fetch();
                }
            }
            TaskOutput::Create(result) => {
                if self.browser.finish_create(result).is_ok() {
                    self.spawn_fetch();
                }
            }
        }
    }
}

/// Drive `browser` from `input` until it ends or the user quits, rendering
/// the list view to `out` after every visible change.
///
/// When input ends, a pending search is applied at once and all in-flight
/// requests are awaited before returning.
pub async fn run_session<R, I, W>(browser: &mut NoteBrowser<R>, input: I, out: &mut W) -> Result<()>
where
    R: NoteRepository + 'static,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session {
        browser,
        presenter: TextPresenter::new(),
        tasks: JoinSet::new(),
        out,
    };
    let mut lines = input.lines();
    let mut input_open = true;

    session.spawn_fetch();
    session.render()?;

    loop {
        if !input_open {
            if session.browser.flush_search() {
                session.spawn_fetch();
            }
            if session.tasks.is_empty() {
                break;
            }
        }

        let deadline = session.browser.search_deadline();
        let changed = tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read input")? {
                    Some(line) => match session.handle_line(&line)? {
                        Flow::Render => true,
                        Flow::Quiet => false,
                        Flow::Quit => {
                            input_open = false;
                            false
                        }
                    },
                    None => {
                        input_open = false;
                        false
                    }
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if session.browser.poll_search(Instant::now()) {
                    session.spawn_fetch();
                    true
                } else {
                    false
                }
            }
            Some(joined) = session.tasks.join_next() => {
                match joined {
                    Ok(output) => session.handle_output(output),
                    Err(err) => warn!(error = %err, "Background request task failed"),
                }
                true
            }
            else => break,
        };

        if changed {
            session.render()?;
        }
    }

    session.render()?;
    Ok(())
}
