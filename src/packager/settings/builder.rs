//! Builder for constructing Settings.

use super::{ServiceDescriptor, Settings};
use crate::packager::error::{Context, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```
/// use serverless_prisma_bundle::packager::{ServiceDescriptor, SettingsBuilder};
///
/// # fn example() -> serverless_prisma_bundle::packager::Result<()> {
/// let descriptor: ServiceDescriptor = serde_yaml::from_str(
///     "provider:\n  architecture: arm64\npackage:\n  individually: true\n",
/// ).unwrap();
///
/// let settings = SettingsBuilder::new()
///     .service_path("/srv/app")
///     .descriptor(descriptor)
///     .build()?;
/// assert!(settings.package_individually());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    service_path: Option<PathBuf>,
    descriptor: ServiceDescriptor,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the service root directory.
    ///
    /// Relative paths are made absolute against the current directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn service_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.service_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the parsed service descriptor.
    ///
    /// Default: empty descriptor (every option at its default)
    pub fn descriptor(mut self, descriptor: ServiceDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `service_path` is missing or cannot be made absolute.
    pub fn build(self) -> Result<Settings> {
        let service_path = self.service_path.context("service_path is required")?;
        let service_path = service_path
            .absolutize()
            .fs_context("resolving service path", &service_path)?
            .into_owned();

        let ServiceDescriptor {
            provider,
            package,
            functions,
            custom,
        } = self.descriptor;

        Ok(Settings::new(
            service_path,
            custom.prisma,
            custom.webpack,
            provider.runtime,
            provider.architecture,
            package.individually,
            functions,
        ))
    }
}
