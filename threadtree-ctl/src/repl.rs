use std::io::{BufRead, Write};

use anyhow::Context;
use threadtree_client::{render, Key, Session, Style};

use crate::command::{Command, HELP};

pub struct Settings {
    pub style: Style,

    /// Only render the comments on `show`
    pub quiet: bool,
}

/// Read commands from `input` until it is exhausted or `quit` is typed
pub fn run(
    session: &mut Session,
    settings: &Settings,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if !settings.quiet {
        write!(out, "{}", render::render(session, settings.style))?;
    }
    for line in input.lines() {
        let line = line.context("reading command")?;
        let changed = match session.focus() {
            // A focused reply box takes the whole line, only `cancel` and `quit` escape it
            Some(id) => match Command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(Command::Cancel)) => execute(session, settings, Command::Cancel, out)?,
                _ => {
                    session.type_reply(id, line);
                    if !session.handle_key(id, Key::Confirm) {
                        writeln!(out, "reply to #{id} was not posted")?;
                    }
                    true
                }
            },
            None => match Command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(cmd)) => execute(session, settings, cmd, out)?,
                Ok(None) if line.trim().is_empty() => false,
                Ok(None) => {
                    writeln!(out, "unknown command, type `help` for the list")?;
                    false
                }
                Err(e) => {
                    writeln!(out, "error: {e:#}")?;
                    false
                }
            },
        };
        if changed && !settings.quiet {
            write!(out, "{}", render::render(session, settings.style))?;
        }
    }
    out.flush().context("flushing output")
}

/// Returns whether what is displayed changed
fn execute(
    session: &mut Session,
    settings: &Settings,
    cmd: Command,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match cmd {
        Command::Comment(text) => {
            session.root_draft = text;
            if !session.submit_root_draft() {
                session.root_draft.clear();
                writeln!(out, "comments cannot be empty")?;
                return Ok(false);
            }
        }
        Command::Reply { id, text } => {
            if !session.forest().contains(&id) {
                writeln!(out, "there is no comment #{id}")?;
                return Ok(false);
            }
            session.open_reply(id);
            if let Some(text) = text {
                session.type_reply(id, text);
                if !session.handle_key(id, Key::Confirm) {
                    writeln!(out, "replies cannot be empty")?;
                }
            }
        }
        Command::Edit { id, text } => {
            if !session.forest().contains(&id) {
                writeln!(out, "there is no comment #{id}")?;
                return Ok(false);
            }
            session.start_edit(id);
            session.type_edit(id, text);
            if !session.save_edit(id) {
                writeln!(out, "comments cannot be empty")?;
                return Ok(false);
            }
        }
        Command::Delete(id) => {
            if !session.submit_delete(id) {
                writeln!(out, "there is no comment #{id}")?;
                return Ok(false);
            }
        }
        Command::Cancel => match session.focus() {
            Some(id) => {
                session.handle_key(id, Key::Cancel);
            }
            None => {
                writeln!(out, "no reply box is open")?;
                return Ok(false);
            }
        },
        Command::Show => {
            write!(out, "{}", render::render(session, settings.style))?;
            return Ok(false);
        }
        Command::Json => {
            let json = serde_json::to_string_pretty(session.forest().roots())
                .context("serializing comments")?;
            writeln!(out, "{json}")?;
            return Ok(false);
        }
        Command::Help => {
            write!(out, "{HELP}")?;
            return Ok(false);
        }
        Command::Quit => (),
    }
    Ok(true)
}
