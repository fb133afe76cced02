//! Top-level error types for the command line tool.

use thiserror::Error;

/// Result type alias for top-level operations
pub type Result<T> = std::result::Result<T, PluginError>;

/// Main error type for the command line tool
#[derive(Error, Debug)]
pub enum PluginError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaging errors
    #[error("Packaging error: {0}")]
    Packager(#[from] crate::packager::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl PluginError {
    /// Hint printed after the error message.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            PluginError::Packager(crate::packager::Error::UnsupportedArchitecture(_)) => {
                Some("Set provider.architecture to arm64 or x86_64")
            }
            PluginError::Packager(
                crate::packager::Error::CommandExit { .. } | crate::packager::Error::CommandFailed { .. },
            ) => Some("Fix the failing command and run packaging again; partial output is overwritten"),
            _ => None,
        }
    }
}
