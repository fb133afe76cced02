//! Removal of native engines built for other architectures.
//!
//! The generator downloads engines for the build machine and for every
//! configured binary target. Only the one matching the deployment
//! architecture is needed at runtime; the rest can be tens of megabytes each.

use crate::packager::{
    error::{Error, Result},
    settings::Architecture,
    utils::fs,
};
use glob::Pattern;
use std::{
    io,
    path::{Path, PathBuf},
};

/// Where the generator and client place engine binaries, relative to a unit.
pub const ENGINE_LOCATIONS: [&str; 3] = [
    "node_modules/.prisma/client",
    "node_modules/prisma",
    "node_modules/@prisma/engines",
];

/// File name prefixes of generated engine artifacts.
pub const ENGINE_PREFIXES: [&str; 5] = [
    "libquery_engine",
    "migration-engine",
    "prisma-fmt",
    "introspection-engine",
    "schema-engine",
];

/// Include pattern and the exclusion protecting the target platform's file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineGlob {
    /// Matches every engine of one kind in one location.
    pub include: String,
    /// Matches the engine of that kind built for the target platform.
    pub exclude: String,
}

/// Ordered engine patterns for one target platform.
#[derive(Clone, Debug)]
pub struct EngineGlobSet {
    platform: &'static str,
    globs: Vec<EngineGlob>,
}

impl EngineGlobSet {
    /// Builds the pattern pairs for `arch`.
    pub fn new(arch: Architecture) -> Self {
        let platform = arch.engine_platform();
        let globs = ENGINE_LOCATIONS
            .iter()
            .flat_map(|location| {
                ENGINE_PREFIXES.iter().map(move |prefix| EngineGlob {
                    include: format!("{location}/{prefix}*"),
                    exclude: format!("{location}/{prefix}-{platform}*"),
                })
            })
            .collect();
        Self { platform, globs }
    }

    /// Platform identifier the set protects.
    pub fn platform(&self) -> &'static str {
        self.platform
    }

    /// Pattern pairs, in evaluation order.
    pub fn globs(&self) -> &[EngineGlob] {
        &self.globs
    }

    /// Expands the patterns under `cwd` and returns the files to delete.
    ///
    /// Each path appears once, in pattern order then glob order. A `cwd`
    /// that is not valid UTF-8 cannot be expressed as a pattern and is an
    /// error.
    pub fn matches(&self, cwd: &Path) -> Result<Vec<PathBuf>> {
        let base = cwd.to_str().ok_or_else(|| Error::Fs {
            context: "expanding engine patterns under",
            path: cwd.to_path_buf(),
            error: io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
        })?;
        let base = Pattern::escape(base);
        let mut found = Vec::new();

        for glob in &self.globs {
            let include = format!("{base}/{}", glob.include);
            let exclude = compile(&format!("{base}/{}", glob.exclude))?;
            let paths = glob::glob(&include).map_err(|error| Error::Pattern {
                pattern: include.clone(),
                error,
            })?;

            for path in paths.filter_map(|entry| entry.ok()) {
                if !exclude.matches_path(&path) && !found.contains(&path) {
                    found.push(path);
                }
            }
        }

        Ok(found)
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|error| Error::Pattern {
        pattern: pattern.to_string(),
        error,
    })
}

/// Outcome of pruning one unit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PruneReport {
    /// Deleted engine paths.
    pub removed: Vec<PathBuf>,
    /// Bytes reclaimed.
    pub reclaimed_bytes: u64,
}

/// Force-deletes every engine under `cwd` not built for the set's platform.
///
/// Nothing matching is not an error.
pub async fn prune_engines(engines: &EngineGlobSet, cwd: &Path) -> Result<PruneReport> {
    let mut report = PruneReport::default();
    for path in engines.matches(cwd)? {
        report.reclaimed_bytes += fs::disk_usage(&path).await;
        fs::remove_path(&path).await?;
        log::debug!("Removed engine {}", path.display());
        report.removed.push(path);
    }
    Ok(report)
}
