//! Selection of the packaging units to process.

use super::settings::{FunctionDefinition, Settings};
use std::{fmt, path::PathBuf};

/// Name of the single unit used when the service is packaged as a whole.
pub const SERVICE_UNIT: &str = "service";

/// One bundler output directory to process.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PackagingUnit {
    /// The whole service, packaged as one artifact.
    Service,
    /// A single function, packaged individually.
    Function(String),
}

impl PackagingUnit {
    /// Unit name, which is also its directory name in the bundler output.
    pub fn name(&self) -> &str {
        match self {
            PackagingUnit::Service => SERVICE_UNIT,
            PackagingUnit::Function(name) => name,
        }
    }

    /// Absolute working directory of the unit.
    pub fn directory(&self, settings: &Settings) -> PathBuf {
        settings.unit_directory(self.name())
    }
}

impl fmt::Display for PackagingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computes the units eligible for client generation, in registry order.
///
/// A service that is not packaged individually yields the single
/// [`PackagingUnit::Service`] unit without looking at any function.
/// Otherwise a function is kept only if it is not image based, its effective
/// runtime contains `node`, and its name is not ignored.
pub fn select_units(settings: &Settings) -> Vec<PackagingUnit> {
    if !settings.package_individually() {
        return vec![PackagingUnit::Service];
    }

    settings
        .functions()
        .iter()
        .filter(|(name, definition)| {
            let eligible = is_eligible(
                name,
                definition,
                settings.provider_runtime(),
                settings.ignore_functions(),
            );
            if !eligible {
                log::debug!("Skipping function {name}");
            }
            eligible
        })
        .map(|(name, _)| PackagingUnit::Function(name.clone()))
        .collect()
}

/// Eligibility test for a single registered function.
pub fn is_eligible(
    name: &str,
    definition: &FunctionDefinition,
    provider_runtime: Option<&str>,
    ignore: &[String],
) -> bool {
    !definition.is_image()
        && definition.effective_runtime(provider_runtime).contains("node")
        && !ignore.iter().any(|ignored| ignored == name)
}
