//! Steps that drive the Prisma generator inside a packaging unit.
//!
//! - [`scripts`] - `package.json` generation script entry
//! - [`lifecycle`] - transient install and removal of the generator
//! - [`schema`] - schema placement (copy or symlink)
//! - [`engines`] - pruning of engines for other architectures

pub mod engines;
pub mod lifecycle;
pub mod schema;
pub mod scripts;

pub use engines::{EngineGlob, EngineGlobSet, PruneReport, prune_engines};
pub use schema::SchemaMode;
pub use scripts::{GENERATE_SCRIPT, ScriptAction};
