//! Parsing of terminal client input lines.

use crate::domain::message::Persona;

/// Usage text printed by `/help`.
pub const HELP: &str = "\
Commands:
  /new [name]           start a new conversation
  /list                 show all conversations
  /switch <n>           make conversation n active
  /rename <n> <name>    rename conversation n
  /delete <n>           delete conversation n
  /persona <name|none>  student, professor, friend, boss
  /up [lines] /down [lines]  scroll the chat
  /help                 this text
  /quit                 leave
Anything else is sent as a message.";

/// One parsed input line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Send a message to the active conversation.
    Send(String),
    /// Create a conversation, optionally named.
    New(Option<String>),
    /// Print the sidebar.
    List,
    /// Activate conversation at this 1-based position.
    Switch(usize),
    /// Rename conversation at this 1-based position.
    Rename {
        /// 1-based position.
        index: usize,
        /// New name.
        name: String,
    },
    /// Delete conversation at this 1-based position.
    Delete(usize),
    /// Select or clear the persona tag.
    Persona(Option<Persona>),
    /// Scroll towards older lines.
    ScrollUp(usize),
    /// Scroll towards newer lines.
    ScrollDown(usize),
    /// Print usage.
    Help,
    /// Leave the client.
    Quit,
}

/// Lines scrolled by `/up` and `/down` without an argument.
const DEFAULT_SCROLL: usize = 5;

/// Parse one input line.
///
/// # Errors
/// Returns a usage message for malformed commands.
pub fn parse(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Ok(Command::Send(line.to_string()));
    };

    let (name, args) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(n, a)| (n, a.trim()));

    match name {
        "new" => Ok(Command::New((!args.is_empty()).then(|| args.to_string()))),
        "list" | "ls" => Ok(Command::List),
        "switch" | "sw" => parse_index(args, "/switch <n>").map(Command::Switch),
        "delete" | "del" => parse_index(args, "/delete <n>").map(Command::Delete),
        "rename" => {
            let (index, new_name) = args
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: /rename <n> <name>".to_string())?;
            Ok(Command::Rename {
                index: parse_index(index, "/rename <n> <name>")?,
                name: new_name.trim().to_string(),
            })
        }
        "persona" => match args {
            "" | "none" => Ok(Command::Persona(None)),
            other => other
                .parse::<Persona>()
                .map(|p| Command::Persona(Some(p)))
                .map_err(|p| format!("unknown persona `{p}`")),
        },
        "up" => parse_amount(args).map(Command::ScrollUp),
        "down" => parse_amount(args).map(Command::ScrollDown),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command `/{other}`, try /help")),
    }
}

fn parse_index(raw: &str, usage: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("usage: {usage}")),
    }
}

fn parse_amount(raw: &str) -> Result<usize, String> {
    if raw.is_empty() {
        return Ok(DEFAULT_SCROLL);
    }
    raw.parse::<usize>()
        .map_err(|_| "scroll amount must be a number".to_string())
}
