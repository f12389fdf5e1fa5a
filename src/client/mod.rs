//! Line-oriented terminal chat client.
//!
//! Reads commands and messages from stdin, keeps the session in memory and
//! re-renders the chat area whenever the conversation store changes. Sends
//! run in the background so the prompt stays usable while a reply is pending.

pub mod commands;

pub use commands::{Command, parse};

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::backend;
use crate::domain::config::{ClientConfig, UiStrings};
use crate::domain::errors::ChatError;
use crate::session::{ChatSession, IgnoreReason, SendPipeline};
use crate::view::{Viewport, render_chat, render_header, render_sidebar};

/// Terminal presentation state.
struct Ui {
    viewport: Viewport,
    preview_chars: usize,
}

impl Ui {
    fn new(config: &ClientConfig) -> Self {
        Self {
            viewport: Viewport::new(config.viewport_lines),
            preview_chars: config.preview_chars,
        }
    }

    fn render(&mut self, session: &ChatSession) -> io::Result<()> {
        let active = session.store().active();
        self.viewport.sync(active.id(), active.messages().len());
        self.draw(session)
    }

    fn draw(&self, session: &ChatSession) -> io::Result<()> {
        let lines = render_chat(session);
        let mut out = io::stdout().lock();
        writeln!(out)?;
        writeln!(out, "{}", render_header(session))?;
        for line in self.viewport.visible(&lines) {
            writeln!(out, "{line}")?;
        }
        if !self.viewport.is_following() {
            writeln!(out, "-- more below (/down) --")?;
        }
        out.flush()
    }

    fn sidebar(&self, session: &ChatSession) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for row in render_sidebar(session.store(), self.preview_chars, session.strings()) {
            writeln!(out, "{row}")?;
        }
        out.flush()
    }

    fn notice(text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "! {text}")?;
        out.flush()
    }

    fn help() -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", commands::HELP)?;
        out.flush()
    }

    /// Execute a command. Store mutations are rendered by the change
    /// subscription, everything else renders here.
    async fn apply(&mut self, command: Command, pipeline: &SendPipeline) -> io::Result<()> {
        match command {
            Command::Send(text) => match pipeline.start(&text).await {
                Ok(pending) => {
                    let pipeline = pipeline.clone();
                    tokio::spawn(async move {
                        let outcome = pipeline.finish(pending).await;
                        debug!("Send finished: {:?}", outcome);
                    });
                    Ok(())
                }
                Err(IgnoreReason::Pending) => Self::notice("still waiting for the previous reply"),
                Err(IgnoreReason::EmptyInput) => Ok(()),
            },
            Command::New(name) => {
                let mut session = pipeline.session().lock().await;
                let name = name.unwrap_or_else(|| session.store().next_default_name());
                session.store_mut().create_conversation(name);
                Ok(())
            }
            Command::List => {
                let session = pipeline.session().lock().await;
                self.sidebar(&session)
            }
            Command::Switch(index) => {
                let mut session = pipeline.session().lock().await;
                let target = session.store().id_at(index - 1);
                match target {
                    Some(id) => report(session.store_mut().set_active(id), session.strings()),
                    None => Self::notice(&format!("no conversation #{index}")),
                }
            }
            Command::Rename { index, name } => {
                let mut session = pipeline.session().lock().await;
                let Some(id) = session.store().id_at(index - 1) else {
                    return Self::notice(&format!("no conversation #{index}"));
                };
                let result = session.begin_rename(id).and_then(|()| {
                    session.set_rename_buffer(name);
                    session.commit_rename()
                });
                report(result, session.strings())
            }
            Command::Delete(index) => {
                let mut session = pipeline.session().lock().await;
                let target = session.store().id_at(index - 1);
                match target {
                    Some(id) => {
                        let result = session.store_mut().delete_conversation(id);
                        report(result, session.strings())
                    }
                    None => Self::notice(&format!("no conversation #{index}")),
                }
            }
            Command::Persona(persona) => {
                let mut session = pipeline.session().lock().await;
                session.set_persona(persona);
                self.draw(&session)
            }
            Command::ScrollUp(lines) => {
                let session = pipeline.session().lock().await;
                let total = render_chat(&session).len();
                self.viewport.scroll_up(lines, total);
                self.draw(&session)
            }
            Command::ScrollDown(lines) => {
                let session = pipeline.session().lock().await;
                self.viewport.scroll_down(lines);
                self.draw(&session)
            }
            Command::Help => Self::help(),
            Command::Quit => Ok(()),
        }
    }
}

/// Surface store errors as notices; `LastConversation` uses its fixed text.
fn report(result: Result<(), ChatError>, strings: &UiStrings) -> io::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(ChatError::LastConversation) => Ui::notice(&strings.last_conversation),
        Err(err) => Ui::notice(&err.to_string()),
    }
}

/// Run the interactive client until `/quit`, end of input or Ctrl+C.
///
/// # Errors
/// Returns an error if the backend cannot be created or the terminal fails.
pub async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let backend = backend::from_config(&config).context("failed to create chat backend")?;
    info!("Using {} backend", backend.name());

    let session = Arc::new(Mutex::new(ChatSession::new(&config)));
    let mut revisions = session.lock().await.store().subscribe();
    let pipeline = SendPipeline::new(Arc::clone(&session), backend);

    let mut ui = Ui::new(&config);
    Ui::help()?;
    ui.render(&*session.lock().await)?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => ui.apply(command, &pipeline).await?,
                    Err(usage) => Ui::notice(&usage)?,
                }
            }
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = session.lock().await;
                ui.render(&session)?;
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    info!("Client session closed");
    Ok(())
}
