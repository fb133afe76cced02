//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Prisma client generation for serverless packaging output
#[derive(Parser, Debug)]
#[command(
    name = "serverless-prisma-bundle",
    version,
    about = "Generates the Prisma client inside serverless packaging output",
    long_about = "Runs after the bundler has written .webpack/<unit> directories.

For every eligible packaging unit: installs prisma, places the schema, runs
`prisma generate`, deletes engines built for other CPU architectures and
removes prisma again.

Usage:
  serverless-prisma-bundle
  serverless-prisma-bundle --service-path ./services/api
  serverless-prisma-bundle --config ./serverless.prod.yml --verbose

Options are read from custom.prisma in the service descriptor."
)]
pub struct Args {
    /// Service root directory
    #[arg(
        short = 's',
        long,
        value_name = "DIR",
        env = "SERVERLESS_SERVICE_PATH",
        default_value = "."
    )]
    pub service_path: PathBuf,

    /// Service descriptor (default: serverless.yml, .yaml or .json in the service root)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print per-step details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.service_path.as_os_str().is_empty() {
            return Err("Service path cannot be empty".to_string());
        }
        if !self.service_path.is_dir() {
            return Err(format!(
                "Service path is not a directory: {}",
                self.service_path.display()
            ));
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_directory() {
        let args = Args::try_parse_from(["serverless-prisma-bundle"]).unwrap();
        assert_eq!(args.service_path, PathBuf::from("."));
        assert!(args.config.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["serverless-prisma-bundle", "-v", "-q"]).is_err());
    }

    #[test]
    fn rejects_missing_service_directory() {
        let args = Args::try_parse_from([
            "serverless-prisma-bundle",
            "--service-path",
            "/definitely/not/here",
        ])
        .unwrap();
        assert!(args.validate().unwrap_err().contains("not a directory"));
    }
}
