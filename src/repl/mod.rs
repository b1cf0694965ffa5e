//! REPL Module
//!
//! Reads commands line by line, dispatches them to a [`Session`] and prints
//! their output.

pub mod commands;
pub mod session;

use std::io::Write;

use crossterm::style::{Color, Stylize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::error::{PokedexError, Result};

pub use commands::{Command, CommandInfo, COMMANDS};
pub use session::{Flow, Pagination, Session};

pub const PROMPT: &str = "Pokedex > ";

/// Color of the prompt and the cached-data notice.
pub const ACCENT: Color = Color::Rgb {
    r: 140,
    g: 160,
    b: 250,
};

/// Trims, lowercases and splits a line into words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Runs the read-eval-print loop until `exit` or end of input.
///
/// Command failures are printed and the loop carries on; only I/O errors on
/// `input` or `out` end it early.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT.with(ACCENT))?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            session.execute(Command::Exit, out).await?;
            return Ok(());
        };

        let command = match Command::parse(&clean_input(&line)) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(PokedexError::UnknownCommand(_)) => {
                writeln!(out, "Unknown command")?;
                continue;
            }
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        match session.execute(command, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(PokedexError::Io(err)) => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "Command failed");
                writeln!(out, "Error: {}", err)?;
            }
        }
    }
}
