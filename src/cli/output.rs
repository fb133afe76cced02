//! Terminal output for the command line tool.

use crate::packager::Reporter;
use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Writes narration to stdout and problems to stderr.
///
/// `quiet` suppresses everything but errors; `verbose` enables detail lines.
/// Colors are used only when the stream is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn stdout() -> StandardStream {
    StandardStream::stdout(color_choice(io::stdout().is_terminal()))
}

fn stderr() -> StandardStream {
    StandardStream::stderr(color_choice(io::stderr().is_terminal()))
}

/// Writes `label` in `color`, then `message` uncolored.
fn write_labeled(
    stream: &mut StandardStream,
    color: Color,
    label: &str,
    message: &str,
) -> io::Result<()> {
    stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stream, "{label}")?;
    stream.reset()?;
    writeln!(stream, " {message}")
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Progress line, shown unless quiet.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(stdout(), "{message}")
    }

    /// Detail line, shown only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        let mut out = stdout();
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(out, "  {message}")?;
        out.reset()?;
        writeln!(out)
    }

    /// Success line, shown unless quiet.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write_labeled(&mut stdout(), Color::Green, "✓", message)
    }

    /// Error line, always shown.
    pub fn error(&self, message: &str) -> io::Result<()> {
        write_labeled(&mut stderr(), Color::Red, "Error:", message)
    }

    /// Hint line following an error, always shown.
    pub fn hint(&self, message: &str) -> io::Result<()> {
        write_labeled(&mut stderr(), Color::Yellow, "  hint:", message)
    }
}

impl Reporter for OutputManager {
    fn log(&self, message: &str) {
        // A closed stdout must not abort packaging.
        let _ = self.progress(message);
    }
}
