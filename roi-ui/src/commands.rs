//! Line commands for the interactive session.
//!
//! | Command                         | Effect                                    |
//! |---------------------------------|-------------------------------------------|
//! | `set <field> [value]`           | Set a scalar input; no value clears it    |
//! | `mode <byClients\|byWSE>`       | Switch WSE sizing mode                    |
//! | `tier <index> <field> [value]`  | Edit `label`, `amount` or `pct` of a tier |
//! | `add`                           | Append a default tier                     |
//! | `remove <index>`                | Remove a tier                             |
//! | `load <path>`                   | Replace the book from a CSV file          |
//! | `reset`                         | Restore every input to its default        |
//! | `show`                          | Print the results                         |
//! | `export`                        | Write the results document                |
//! | `log <level>`                   | Change the log filter                     |
//! | `help`                          | List commands                             |
//! | `quit`                          | Leave the session                         |
//!
//! Tier indices are zero-based. Values keep their internal spaces, so
//! `tier 0 label Group Health` sets the label to `Group Health`.

use std::path::PathBuf;

use thiserror::Error;

use roi_core::{InputField, InputMode, TierField};

pub const HELP: &str = "\
commands:
  set <field> [value]           set a scalar input (no value clears it)
  mode <byClients|byWSE>        switch WSE sizing mode
  tier <index> <field> [value]  edit a tier's label, amount or pct
  add                           append a default tier
  remove <index>                remove a tier
  load <path>                   replace the book from a CSV file
  reset                         restore every input to its default
  show                          print the results
  export                        write the results document
  log <level>                   change the log filter
  help                          show this list
  quit                          leave the session
fields: clients avgWsePerClient totalWseDirect avgAnnualWage mgmtFeePerWse
        conversionRate masterPlanPct commissionPct bookPortionPct";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: InputField, raw: String },
    Mode(InputMode),
    Tier {
        index: usize,
        field: TierField,
        raw: String,
    },
    Add,
    Remove(usize),
    Load(PathBuf),
    Reset,
    Show,
    Export,
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown mode '{0}' (expected byClients or byWSE)")]
    UnknownMode(String),

    #[error("unknown tier field '{0}' (expected label, amount or pct)")]
    UnknownTierField(String),

    #[error("'{0}' is not a tier index")]
    InvalidIndex(String),
}

/// Splits off the first whitespace-delimited word; the rest is trimmed.
fn next_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim())),
        None => Some((s, "")),
    }
}

fn require<'a>(
    args: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<(&'a str, &'a str), CommandParseError> {
    next_word(args).ok_or(CommandParseError::MissingArgument { command, argument })
}

fn parse_index(s: &str) -> Result<usize, CommandParseError> {
    s.parse()
        .map_err(|_| CommandParseError::InvalidIndex(s.to_string()))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let (name, args) = next_word(line).ok_or(CommandParseError::Empty)?;

        match name.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, raw) = require(args, "set", "field")?;
                let field = InputField::parse(field)
                    .ok_or_else(|| CommandParseError::UnknownField(field.to_string()))?;
                Ok(Self::Set {
                    field,
                    raw: raw.to_string(),
                })
            }
            "mode" => {
                let (mode, _) = require(args, "mode", "mode")?;
                InputMode::parse(mode)
                    .map(Self::Mode)
                    .ok_or_else(|| CommandParseError::UnknownMode(mode.to_string()))
            }
            "tier" => {
                let (index, rest) = require(args, "tier", "index")?;
                let index = parse_index(index)?;
                let (field, raw) = require(rest, "tier", "field")?;
                let field = TierField::parse(field)
                    .ok_or_else(|| CommandParseError::UnknownTierField(field.to_string()))?;
                Ok(Self::Tier {
                    index,
                    field,
                    raw: raw.to_string(),
                })
            }
            "add" => Ok(Self::Add),
            "remove" => {
                let (index, _) = require(args, "remove", "index")?;
                parse_index(index).map(Self::Remove)
            }
            "load" => {
                if args.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "load",
                        argument: "path",
                    });
                }
                Ok(Self::Load(PathBuf::from(args)))
            }
            "reset" => Ok(Self::Reset),
            "show" => Ok(Self::Show),
            "export" => Ok(Self::Export),
            "log" => {
                let (level, _) = require(args, "log", "level")?;
                Ok(Self::Log(level.to_string()))
            }
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandParseError::UnknownCommand(name.to_string())),
        }
    }
}
