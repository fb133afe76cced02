//! Prisma client generation for serverless packaging output.
//!
//! After the bundler has written one directory per packaging unit, the
//! [`Packager`] installs the generator, places the schema, generates the
//! client, prunes engines built for other architectures and removes the
//! generator again.
//!
//! # Module Organization
//!
//! - [`settings`] - configuration resolved from the service descriptor
//! - [`selector`] - which units to process
//! - [`prisma`] - the individual generation steps
//! - [`builder`] - the orchestrator
//! - [`utils`] - filesystem and process helpers
//! - [`report`] - progress narration

pub mod builder;
pub mod error;
pub mod prisma;
pub mod report;
pub mod selector;
pub mod settings;
pub mod utils;

pub use builder::{PackagedUnit, Packager};
pub use error::{Error, Result};
pub use report::{MemoryReporter, Reporter};
pub use selector::{PackagingUnit, SERVICE_UNIT, select_units};
pub use settings::{
    Architecture, FunctionDefinition, ServiceDescriptor, Settings, SettingsBuilder,
};
pub use utils::process::{CommandRunner, SystemCommandRunner};
