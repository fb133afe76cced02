//! Packaging orchestration and coordination.
//!
//! - [`orchestrator`] - main [`Packager`] struct running the steps per unit
//! - [`tool_detection`] - external tool availability checking

mod orchestrator;
pub(crate) mod tool_detection;

pub use orchestrator::{PackagedUnit, Packager};
