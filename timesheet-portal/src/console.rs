//! Line commands of the interactive binary, each standing in for a gesture on the widget.

use thiserror::Error;

use crate::controller::Gesture;
use crate::domain::models::LineId;

pub const HELP: &str = "\
commands:
  add                  add a line and open it
  edit <id>            open a line for editing
  set <field> <value>  change a field of the open line
  submit               save the open line
  cancel               close the open line without saving
  rm <id>              remove a line
  reload               fetch the table again
  show                 print the widget
  help                 print this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Gesture(Gesture),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` is not a line id")]
    InvalidLineId(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "add" => Command::Gesture(Gesture::HeadingClicked),
        "edit" => Command::Gesture(Gesture::RowClicked {
            line_id: line_id("edit", rest)?,
            in_edit_row: false,
        }),
        "set" => {
            let (name, value) = rest
                .split_once(char::is_whitespace)
                .map(|(name, value)| (name, value.trim()))
                .unwrap_or((rest, ""));
            if name.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "set",
                    argument: "a field name",
                });
            }
            Command::Gesture(Gesture::FieldChanged {
                name: name.to_string(),
                value: value.to_string(),
            })
        }
        "submit" => Command::Gesture(Gesture::SubmitClicked),
        "cancel" => Command::Gesture(Gesture::CancelClicked),
        "rm" | "remove" => Command::Gesture(Gesture::RemoveClicked {
            line_id: line_id("rm", rest)?,
        }),
        "reload" => Command::Gesture(Gesture::RefreshRequested),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn line_id(command: &'static str, arg: &str) -> Result<LineId, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a line id",
        });
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidLineId(arg.to_string()))
}
