//! Command line interface for the Prisma packaging step.
//!
//! Parses arguments, loads the service descriptor and drives the
//! [`Packager`](crate::packager::Packager) with narration on the terminal.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, Result};
use crate::metadata;
use crate::packager::{PackagedUnit, Packager, SettingsBuilder, SystemCommandRunner};
use anyhow::Context as _;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);
    let output = config.output();

    match execute(&args, output).await {
        Ok(packaged) => {
            report_summary(output, &packaged)?;
            Ok(0)
        }
        Err(e) => {
            output.error(&e.to_string())?;
            if let Some(hint) = e.recovery_suggestion() {
                output.hint(hint)?;
            }
            Ok(1)
        }
    }
}

async fn execute(args: &Args, output: &OutputManager) -> Result<Vec<PackagedUnit>> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let service_path = args.service_path.canonicalize().with_context(|| {
        format!("Cannot resolve service path {}", args.service_path.display())
    })?;

    let descriptor_path = match &args.config {
        Some(path) => path.clone(),
        None => metadata::find_service_descriptor(&service_path)?,
    };
    output.verbose(&format!("Service descriptor: {}", descriptor_path.display()))?;
    let descriptor = metadata::load_service_descriptor(&descriptor_path)?;

    let settings = SettingsBuilder::new()
        .service_path(&service_path)
        .descriptor(descriptor)
        .build()?;
    output.verbose(&format!(
        "Bundler output: {}",
        settings.webpack_output_path().display()
    ))?;
    output.verbose(&format!("Package manager: {}", settings.package_manager()))?;

    let packager = Packager::new(settings, &SystemCommandRunner, output);
    Ok(packager.package().await?)
}

fn report_summary(output: &OutputManager, packaged: &[PackagedUnit]) -> Result<()> {
    for unit in packaged {
        output.verbose(&format!(
            "{}: {} engine files removed, {} bytes reclaimed",
            unit.unit,
            unit.engines.removed.len(),
            unit.engines.reclaimed_bytes + unit.leftovers_reclaimed
        ))?;
    }
    output.success(&format!(
        "Prisma client generated for {} packaging unit(s)",
        packaged.len()
    ))?;
    Ok(())
}
