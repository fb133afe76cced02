//! Filesystem and process helpers shared by the packaging steps.

pub mod fs;
pub mod process;
