//! Line commands understood by the terminal front end.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use shared::domain::ClipId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tap,
    Undo,
    Hold,
    OpenLimit,
    SubmitLimit(String),
    CloseLimit,
    ClearLimit,
    OpenSettings,
    Vibration(bool),
    Sound(bool),
    Clip(ClipId),
    Pick(Option<PathBuf>),
    Save,
    Dismiss,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  tap | +            increment
  undo | -           decrement (never below zero)
  hold               long press: reset to zero
  limit [n]          open the limit form, or submit n
  close-limit        close the limit form
  nolimit            remove the limit
  settings           open settings
  vibration on|off   edit draft
  sound on|off       edit draft
  clip <id>          choose a built-in clip
  pick [path]        pick a custom clip (no path = cancel)
  save | dismiss     close settings
  show               print state
  help | quit";

pub fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        bail!("empty command");
    };
    let rest = parts.collect::<Vec<_>>().join(" ");
    let arg = (!rest.is_empty()).then_some(rest);

    let command = match (head.to_ascii_lowercase().as_str(), arg) {
        ("tap" | "+", None) => Command::Tap,
        ("undo" | "-", None) => Command::Undo,
        ("hold" | "reset", None) => Command::Hold,
        ("limit", None) => Command::OpenLimit,
        ("limit", Some(value)) => Command::SubmitLimit(value),
        ("close-limit", None) => Command::CloseLimit,
        ("nolimit", None) => Command::ClearLimit,
        ("settings", None) => Command::OpenSettings,
        ("vibration", Some(value)) => Command::Vibration(parse_switch(&value)?),
        ("sound", Some(value)) => Command::Sound(parse_switch(&value)?),
        ("clip", Some(value)) => Command::Clip(ClipId::new(value)),
        ("pick", path) => Command::Pick(path.map(PathBuf::from)),
        ("save", None) => Command::Save,
        ("dismiss" | "cancel", None) => Command::Dismiss,
        ("show", None) => Command::Show,
        ("help" | "?", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        (other, _) => bail!("unrecognized command '{other}' (try 'help')"),
    };
    Ok(command)
}

fn parse_switch(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(anyhow!("expected on/off, got '{other}'")),
    }
}
