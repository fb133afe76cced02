//! Main packaging orchestration.
//!
//! This module provides the [`Packager`] orchestrator that runs the Prisma
//! steps over every eligible packaging unit.

use crate::packager::{
    PackagingUnit,
    error::{Error, Result},
    prisma::{
        EngineGlobSet, GENERATE_SCRIPT, PruneReport, SchemaMode, lifecycle, prune_engines, schema,
    },
    report::Reporter,
    select_units,
    settings::Settings,
    utils::process::CommandRunner,
};
use std::{io, path::PathBuf};

/// Summary of one processed unit.
#[derive(Clone, Debug)]
pub struct PackagedUnit {
    /// The unit.
    pub unit: PackagingUnit,
    /// Its working directory.
    pub directory: PathBuf,
    /// Engines removed from it.
    pub engines: PruneReport,
    /// Bytes reclaimed by deleting generator leftovers.
    pub leftovers_reclaimed: u64,
}

/// Main packaging orchestrator.
///
/// Processes units strictly one after another. For each unit:
/// 1. Install the generator (when `installDeps` is on)
/// 2. Place the schema (copy or symlink)
/// 3. Run the generation script
/// 4. Prune engines built for other architectures
/// 5. Remove the generator (when `installDeps` is on)
///
/// The first failure aborts the run. Partial state left behind is cleaned up
/// by running again from scratch.
///
/// # Examples
///
/// ```no_run
/// use serverless_prisma_bundle::packager::{
///     MemoryReporter, Packager, ServiceDescriptor, SettingsBuilder, SystemCommandRunner,
/// };
///
/// # async fn example() -> serverless_prisma_bundle::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .service_path(".")
///     .descriptor(ServiceDescriptor::default())
///     .build()?;
/// let reporter = MemoryReporter::new();
///
/// let packaged = Packager::new(settings, &SystemCommandRunner, &reporter)
///     .package()
///     .await?;
/// println!("Processed {} units", packaged.len());
/// # Ok(())
/// # }
/// ```
pub struct Packager<'a> {
    settings: Settings,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
}

impl std::fmt::Debug for Packager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packager")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<'a> Packager<'a> {
    /// Creates a packager that runs commands through `runner` and narrates
    /// progress to `reporter`.
    pub fn new(settings: Settings, runner: &'a dyn CommandRunner, reporter: &'a dyn Reporter) -> Self {
        Self {
            settings,
            runner,
            reporter,
        }
    }

    /// Processes every eligible unit in registry order.
    ///
    /// The target architecture and package manager are checked before any
    /// unit is touched, so bad configuration fails without side effects.
    pub async fn package(&self) -> Result<Vec<PackagedUnit>> {
        let arch = self.settings.architecture()?;
        if self.settings.package_manager().trim().is_empty() {
            crate::bail!("custom.prisma.packageManager must not be empty");
        }
        let engines = EngineGlobSet::new(arch);
        log::debug!("Target architecture {} (engine platform {})", arch, engines.platform());

        let units = select_units(&self.settings);
        if units.is_empty() {
            self.reporter.log("Prisma: no packaging units to process");
        }

        let mut packaged = Vec::with_capacity(units.len());
        for unit in units {
            packaged.push(self.package_unit(unit, &engines).await?);
        }
        Ok(packaged)
    }

    /// Runs every step for one unit.
    pub async fn package_unit(&self, unit: PackagingUnit, engines: &EngineGlobSet) -> Result<PackagedUnit> {
        let cwd = unit.directory(&self.settings);
        if !cwd.is_dir() {
            return Err(Error::Fs {
                context: "locating bundler output for",
                path: cwd,
                error: io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
            });
        }

        if self.settings.install_deps() {
            self.reporter
                .log(&format!("Prisma: installing prisma for {unit}"));
            lifecycle::install(self.runner, &self.settings, &cwd).await?;
        }

        let mode = SchemaMode::from_symlink_flag(self.settings.use_symlink());
        self.reporter.log(&match mode {
            SchemaMode::Copy => format!("Prisma: copying schema into {unit}"),
            SchemaMode::Symlink => format!("Prisma: linking schema into {unit}"),
        });
        schema::materialize(mode, &self.settings.prisma_path(), &cwd).await?;

        self.reporter
            .log(&format!("Prisma: generating client for {unit}"));
        self.runner
            .run(self.settings.package_manager(), &["run", GENERATE_SCRIPT], &cwd)
            .await?;

        self.reporter.log(&format!(
            "Prisma: removing engines not built for {} from {unit}",
            engines.platform()
        ));
        let pruned = prune_engines(engines, &cwd).await?;
        log::info!(
            "{}: removed {} engine files ({} bytes)",
            unit,
            pruned.removed.len(),
            pruned.reclaimed_bytes
        );

        let mut leftovers_reclaimed = 0;
        if self.settings.install_deps() {
            self.reporter
                .log(&format!("Prisma: removing prisma from {unit}"));
            leftovers_reclaimed = lifecycle::remove(self.runner, &self.settings, &cwd).await?;
        }

        Ok(PackagedUnit {
            unit,
            directory: cwd,
            engines: pruned,
            leftovers_reclaimed,
        })
    }
}
