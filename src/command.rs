// Command language: one frame operation per line, for scripting and the CLI.

use std::fmt;

use crate::frame::{FrameError, FrameId, FrameTreeManager, LocalViewState, SplitDirection};

/// A parsed frame command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Split {
        direction: SplitDirection,
        target: Option<FrameId>,
    },
    Close(FrameId),
    Activate(FrameId),
    Next,
    Prev,
    Reset,
    SetType { id: FrameId, pane_type: String },
    Full(FrameId),
    Unfull,
    Tree,
    Active,
    Leaves,
    Help,
}

/// A single entry in the command reference.
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
}

/// Return the reference for every command.
pub fn command_registry() -> Vec<CommandHelp> {
    vec![
        CommandHelp {
            usage: "split <row|col> [id]",
            description: "Split a frame (default: the active one)",
        },
        CommandHelp {
            usage: "close <id>",
            description: "Close a frame, promoting its sibling",
        },
        CommandHelp {
            usage: "activate <id>",
            description: "Make a frame active",
        },
        CommandHelp {
            usage: "next",
            description: "Activate the next frame",
        },
        CommandHelp {
            usage: "prev",
            description: "Activate the previous frame",
        },
        CommandHelp {
            usage: "reset",
            description: "Replace the layout with a single frame",
        },
        CommandHelp {
            usage: "type <id> <pane_type>",
            description: "Change what a frame renders",
        },
        CommandHelp {
            usage: "full <id>",
            description: "Show one frame alone",
        },
        CommandHelp {
            usage: "unfull",
            description: "Show all frames again",
        },
        CommandHelp {
            usage: "tree",
            description: "Print the layout as JSON",
        },
        CommandHelp {
            usage: "active",
            description: "Print the active frame id",
        },
        CommandHelp {
            usage: "leaves",
            description: "Print frame ids in order",
        },
        CommandHelp {
            usage: "help",
            description: "Print this reference",
        },
    ]
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("invalid split direction '{0}', expected row or col")]
    InvalidDirection(String),
    #[error("{command}: unexpected argument '{argument}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = match line.split_once('#') {
        Some((code, _)) => code,
        None => line,
    };
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name {
        "split" => {
            let direction = required(&mut words, "split", "direction")?;
            let direction = SplitDirection::parse(direction)
                .ok_or_else(|| CommandError::InvalidDirection(direction.to_string()))?;
            let target = words.next().map(FrameId::from);
            finish(&mut words, "split")?;
            Command::Split { direction, target }
        }
        "close" => {
            let id = required(&mut words, "close", "frame id")?;
            finish(&mut words, "close")?;
            Command::Close(FrameId::from(id))
        }
        "activate" => {
            let id = required(&mut words, "activate", "frame id")?;
            finish(&mut words, "activate")?;
            Command::Activate(FrameId::from(id))
        }
        "type" => {
            let id = required(&mut words, "type", "frame id")?;
            let pane_type = required(&mut words, "type", "pane type")?;
            finish(&mut words, "type")?;
            Command::SetType {
                id: FrameId::from(id),
                pane_type: pane_type.to_string(),
            }
        }
        "full" => {
            let id = required(&mut words, "full", "frame id")?;
            finish(&mut words, "full")?;
            Command::Full(FrameId::from(id))
        }
        "next" => bare(&mut words, "next", Command::Next)?,
        "prev" => bare(&mut words, "prev", Command::Prev)?,
        "reset" => bare(&mut words, "reset", Command::Reset)?,
        "unfull" => bare(&mut words, "unfull", Command::Unfull)?,
        "tree" => bare(&mut words, "tree", Command::Tree)?,
        "active" => bare(&mut words, "active", Command::Active)?,
        "leaves" => bare(&mut words, "leaves", Command::Leaves)?,
        "help" => bare(&mut words, "help", Command::Help)?,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    words
        .next()
        .ok_or(CommandError::MissingArgument { command, argument })
}

fn finish<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<(), CommandError> {
    match words.next() {
        Some(extra) => Err(CommandError::UnexpectedArgument {
            command,
            argument: extra.to_string(),
        }),
        None => Ok(()),
    }
}

fn bare<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    parsed: Command,
) -> Result<Command, CommandError> {
    finish(words, command)?;
    Ok(parsed)
}

/// What a command produced, for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The command changed the layout without naming a frame.
    Done,
    /// A frame id: the new frame, the new active frame, or the new root.
    Frame(FrameId),
    Leaves { ids: Vec<FrameId>, active: FrameId },
    Tree(LocalViewState),
    Help,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Done => f.write_str("ok"),
            Outcome::Frame(id) => write!(f, "{id}"),
            Outcome::Leaves { ids, active } => {
                let rendered: Vec<String> = ids
                    .iter()
                    .map(|id| {
                        if id == active {
                            format!("*{id}")
                        } else {
                            id.to_string()
                        }
                    })
                    .collect();
                f.write_str(&rendered.join(" "))
            }
            Outcome::Tree(state) => {
                let json = serde_json::to_string_pretty(state).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Outcome::Help => {
                let registry = command_registry();
                let width = registry.iter().map(|c| c.usage.len()).max().unwrap_or(0);
                for (i, entry) in registry.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{:width$}  {}", entry.usage, entry.description)?;
                }
                Ok(())
            }
        }
    }
}

/// Run `command` against `frames`.
pub fn apply(command: &Command, frames: &mut FrameTreeManager) -> Result<Outcome, FrameError> {
    let outcome = match command {
        Command::Split { direction, target } => {
            Outcome::Frame(frames.split_frame(*direction, target.as_ref())?)
        }
        Command::Close(id) => Outcome::Frame(frames.close_frame(id)?),
        Command::Activate(id) => {
            frames.set_active_id(id)?;
            Outcome::Done
        }
        Command::Next => Outcome::Frame(frames.activate_next()),
        Command::Prev => Outcome::Frame(frames.activate_previous()),
        Command::Reset => Outcome::Frame(frames.reset_frame_tree()),
        Command::SetType { id, pane_type } => {
            frames.set_frame_type(id, pane_type.clone())?;
            Outcome::Done
        }
        Command::Full(id) => {
            frames.set_frame_full(Some(id))?;
            Outcome::Done
        }
        Command::Unfull => {
            frames.set_frame_full(None)?;
            Outcome::Done
        }
        Command::Tree => Outcome::Tree(frames.snapshot()),
        Command::Active => Outcome::Frame(frames.active_id().clone()),
        Command::Leaves => Outcome::Leaves {
            ids: frames.leaf_ids(),
            active: frames.active_id().clone(),
        },
        Command::Help => Outcome::Help,
    };
    Ok(outcome)
}

/// Parse and run one input line, returning the reply to print. Blank and
/// comment lines get no reply; a rejected line replies `error: <message>`
/// so every command line gets exactly one reply.
pub fn run_line(line: &str, frames: &mut FrameTreeManager) -> Option<String> {
    let result = match parse_command(line) {
        Ok(None) => return None,
        Ok(Some(command)) => apply(&command, frames).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    let reply = match result {
        Ok(outcome) => outcome.to_string(),
        Err(message) => {
            log::warn!("Rejected command {:?}: {message}", line.trim());
            format!("error: {message}")
        }
    };
    Some(reply)
}
