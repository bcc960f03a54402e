//! Operator console.
//!
//! Stands in for the host when the server runs on its own: typed lines become
//! presence and chat events, and `staffmanager` runs the admin command with
//! every permission.
//!
//! ```text
//! join <staff>
//! quit <staff>
//! chat <staff> <text...>
//! staffmanager [list|purge]
//! help
//! stop | exit
//! ```

use std::{collections::HashMap, sync::Arc};

use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;
use tokio::{
    sync::{Notify, mpsc},
    task::JoinHandle,
};

use crate::domain::{SessionId, StaffId};

use super::{
    command::{AdminCommandHandler, ConsoleSender},
    events::ActivityEventListener,
};

const PROMPT: &str = "staffwatch> ";

const HELP: &str = "\
Commands:
  join <staff>               staff member connects
  quit <staff>               staff member disconnects
  chat <staff> <text...>     staff member sends a chat message
  staffmanager [list|purge]  run the admin command
  help                       show this help
  stop | exit                save and shut down";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Join(String),
    Quit(String),
    Chat { staff: String, text: String },
    StaffManager(Vec<String>),
    Help,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleParseError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    UnknownCommand(String),
    #[error("Missing {argument}. Usage: {usage}")]
    MissingArgument {
        argument: &'static str,
        usage: &'static str,
    },
}

/// Split off the first whitespace-separated word
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim_start())),
        None => Some((input, "")),
    }
}

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse_console_line(line: &str) -> Result<Option<ConsoleCommand>, ConsoleParseError> {
    let Some((keyword, rest)) = next_word(line) else {
        return Ok(None);
    };

    let missing = |argument, usage| ConsoleParseError::MissingArgument { argument, usage };

    let command = match keyword.to_lowercase().as_str() {
        "join" => {
            let (staff, _) = next_word(rest).ok_or(missing("staff name", "join <staff>"))?;
            ConsoleCommand::Join(staff.to_string())
        }
        "quit" => {
            let (staff, _) = next_word(rest).ok_or(missing("staff name", "quit <staff>"))?;
            ConsoleCommand::Quit(staff.to_string())
        }
        "chat" => {
            let usage = "chat <staff> <text...>";
            let (staff, text) = next_word(rest).ok_or(missing("staff name", usage))?;
            let text = text.trim_end();
            if text.is_empty() {
                return Err(missing("message text", usage));
            }
            ConsoleCommand::Chat {
                staff: staff.to_string(),
                text: text.to_string(),
            }
        }
        "staffmanager" | "/staffmanager" => {
            ConsoleCommand::StaffManager(rest.split_whitespace().map(str::to_string).collect())
        }
        "help" | "?" => ConsoleCommand::Help,
        "stop" | "exit" => ConsoleCommand::Stop,
        other => return Err(ConsoleParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

/// What the console loop does after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Reply(String),
    Silent,
    Stop,
}

pub struct Console {
    listener: Arc<ActivityEventListener>,
    admin: Arc<AdminCommandHandler>,
    /// staff name → session id while connected
    sessions: HashMap<String, SessionId>,
}

impl Console {
    pub fn new(listener: Arc<ActivityEventListener>, admin: Arc<AdminCommandHandler>) -> Self {
        Self {
            listener,
            admin,
            sessions: HashMap::new(),
        }
    }

    pub async fn handle_line(&mut self, line: &str) -> LineOutcome {
        let command = match parse_console_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return LineOutcome::Silent,
            Err(e) => return LineOutcome::Reply(e.to_string()),
        };

        match command {
            ConsoleCommand::Join(name) => {
                let staff = match StaffId::new(name.clone()) {
                    Ok(staff) => staff,
                    Err(e) => return LineOutcome::Reply(e.to_string()),
                };
                let session = self
                    .sessions
                    .entry(name)
                    .or_insert_with(SessionId::generate)
                    .clone();
                self.listener.on_presence_begin(session, staff.clone()).await;
                LineOutcome::Reply(format!("{} joined", staff))
            }
            ConsoleCommand::Quit(name) => {
                let staff = match StaffId::new(name.clone()) {
                    Ok(staff) => staff,
                    Err(e) => return LineOutcome::Reply(e.to_string()),
                };
                let session = self
                    .sessions
                    .remove(&name)
                    .unwrap_or_else(SessionId::generate);
                self.listener.on_presence_end(session, staff.clone()).await;
                LineOutcome::Reply(format!("{} left", staff))
            }
            ConsoleCommand::Chat { staff, text } => {
                let staff = match StaffId::new(staff) {
                    Ok(staff) => staff,
                    Err(e) => return LineOutcome::Reply(e.to_string()),
                };
                self.listener.on_message(staff, text).await;
                LineOutcome::Silent
            }
            ConsoleCommand::StaffManager(args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                LineOutcome::Reply(self.admin.execute(&ConsoleSender, &args).await)
            }
            ConsoleCommand::Help => LineOutcome::Reply(HELP.to_string()),
            ConsoleCommand::Stop => LineOutcome::Stop,
        }
    }
}

/// Handle of the running console loop
pub struct ConsoleTask {
    handle: JoinHandle<()>,
}

impl ConsoleTask {
    /// Stop handling lines and wait until the loop has exited
    ///
    /// Call before closing sessions and saving at shutdown, so no event typed
    /// afterwards can open a session or flush the roster behind the final save.
    pub async fn shutdown(self) {
        self.handle.abort();
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                tracing::error!("Console task failed: {}", e);
            }
        }
    }
}

/// Run the console until `stop`, `exit`, Ctrl+C or Ctrl+D, then notify `stop`
pub fn spawn_console(console: Console, stop: Arc<Notify>) -> ConsoleTask {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    // rustyline blocks, so it gets its own thread
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    run_console_loop(console, input_rx, stop)
}

/// Handle lines from `input_rx` until it closes or a `stop` line arrives
fn run_console_loop(
    mut console: Console,
    mut input_rx: mpsc::UnboundedReceiver<String>,
    stop: Arc<Notify>,
) -> ConsoleTask {
    let handle = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            match console.handle_line(&line).await {
                LineOutcome::Reply(reply) => println!("{}", reply),
                LineOutcome::Silent => {}
                LineOutcome::Stop => break,
            }
        }
        stop.notify_one();
    });

    ConsoleTask { handle }
}
