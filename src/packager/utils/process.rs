//! External command execution.
//!
//! Every package-manager and generator invocation goes through
//! [`CommandRunner`]. The runner does not know which tool it runs.

use crate::packager::{
    builder::tool_detection::locate_tool,
    error::{Error, Result},
};
use async_trait::async_trait;
use std::path::Path;

/// Joins a command and its arguments into one command line.
pub fn command_line(command: &str, args: &[&str]) -> String {
    std::iter::once(command)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs external commands to completion in a working directory.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `command args...` in `cwd` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Fails if the command cannot be started or exits unsuccessfully.
    async fn run(&self, command: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// Runs commands as child processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, command: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let line = command_line(command, args);
        log::debug!("Running `{}` in {}", line, cwd.display());

        let program = locate_tool(command).map_err(|error| Error::CommandFailed {
            command: line.clone(),
            error,
        })?;

        let status = tokio::process::Command::new(&program)
            .args(args)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: line.clone(),
                error,
            })?;

        if !status.success() {
            return Err(Error::CommandExit {
                command: line,
                code: status.code(),
            });
        }

        Ok(())
    }
}
