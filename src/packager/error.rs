//! Error types for packaging operations.
//!
//! Every failure in this module is fatal for the current run: nothing is
//! retried and nothing is suppressed. The variants only exist so the last
//! message printed tells the user which step and which path failed.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the packager.
#[derive(Debug, DeriveError)]
pub enum Error {
    /// Free-form failure raised through [`bail!`](crate::bail) or [`Context`].
    #[error("{0}")]
    GenericError(String),

    /// Filesystem operation failed on a known path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done when the error happened.
        context: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        error: io::Error,
    },

    /// Target architecture has no engine platform mapping.
    #[error("unsupported architecture `{0}` (supported: arm64, x86_64)")]
    UnsupportedArchitecture(String),

    /// Package manifest could not be parsed.
    #[error("failed to parse {}: {error}", path.display())]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// Parse error.
        #[source]
        error: serde_json::Error,
    },

    /// Package manifest parsed, but its shape is not usable.
    #[error("invalid package manifest {}: {reason}", path.display())]
    InvalidManifest {
        /// Manifest path.
        path: PathBuf,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// External command could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Full command line.
        command: String,
        /// Spawn error.
        #[source]
        error: io::Error,
    },

    /// External command ran and exited unsuccessfully.
    #[error("`{command}` exited with {}", code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    CommandExit {
        /// Full command line.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// Engine glob pattern failed to compile.
    #[error("invalid engine pattern `{pattern}`: {error}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Compilation error.
        #[source]
        error: glob::PatternError,
    },
}

/// Attaches operation and path context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Converts options and foreign results into packager results with a message.
pub trait Context<T> {
    /// Returns [`Error::GenericError`] carrying `msg` on failure.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Returns early with [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}
