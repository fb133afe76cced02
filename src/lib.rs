//! Prisma client generation for serverless packaging output
//!
//! This library runs the Prisma steps that a serverless bundler leaves out:
//! - installing the generator into every packaging unit
//! - placing the schema next to the bundled code
//! - generating the client and pruning engines for other CPU architectures
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod metadata;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PluginError, Result};
