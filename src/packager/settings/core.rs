//! Core Settings struct and its per-option accessors.

use super::{Architecture, FunctionDefinition, PrismaSettings, WebpackSettings};
use crate::packager::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Package manager used when none is configured.
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// Folder the bundler writes its per-unit output into.
pub const BUNDLER_OUTPUT_DIR: &str = ".webpack";

/// Resolved configuration for one packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Every accessor
/// resolves its own default, so a descriptor with no `custom.prisma` section
/// at all is a valid configuration.
///
/// # Examples
///
/// ```
/// use serverless_prisma_bundle::packager::{ServiceDescriptor, SettingsBuilder};
///
/// # fn example() -> serverless_prisma_bundle::packager::Result<()> {
/// let settings = SettingsBuilder::new()
///     .service_path("/srv/app")
///     .descriptor(ServiceDescriptor::default())
///     .build()?;
///
/// assert_eq!(settings.package_manager(), "npm");
/// assert!(settings.install_deps());
/// assert!(!settings.use_symlink());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute service root.
    service_path: PathBuf,

    /// `custom.prisma` options.
    prisma: PrismaSettings,

    /// `custom.webpack` options.
    webpack: WebpackSettings,

    /// `provider.runtime`.
    provider_runtime: Option<String>,

    /// `provider.architecture`, as written.
    provider_architecture: Option<serde_yaml::Value>,

    /// `package.individually`.
    package_individually: Option<bool>,

    /// Registered functions in declaration order.
    functions: Vec<(String, FunctionDefinition)>,
}

impl Settings {
    /// Returns the service root directory.
    pub fn service_path(&self) -> &Path {
        &self.service_path
    }

    /// Target architecture of the deployment.
    ///
    /// `custom.prisma.architecture` wins over `provider.architecture`; with
    /// neither set the provider default `x86_64` applies.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedArchitecture`](crate::packager::Error::UnsupportedArchitecture)
    /// when the configured value is not one of the mapped names, including
    /// values that are not strings at all.
    pub fn architecture(&self) -> Result<Architecture> {
        match self
            .prisma
            .architecture
            .as_ref()
            .or(self.provider_architecture.as_ref())
        {
            Some(serde_yaml::Value::String(name)) => name.parse(),
            Some(other) => Err(Error::UnsupportedArchitecture(
                serde_yaml::to_string(other)
                    .map(|rendered| rendered.trim().to_string())
                    .unwrap_or_else(|_| format!("{other:?}")),
            )),
            None => Ok(Architecture::default()),
        }
    }

    /// Package manager binary name.
    pub fn package_manager(&self) -> &str {
        self.prisma
            .package_manager
            .as_deref()
            .unwrap_or(DEFAULT_PACKAGE_MANAGER)
    }

    /// Version pin for the generator package, `None` for the latest release.
    pub fn prisma_version(&self) -> Option<&str> {
        self.prisma.version.as_deref().filter(|v| !v.is_empty())
    }

    /// Whether the generator is installed before and removed after generation.
    pub fn install_deps(&self) -> bool {
        self.prisma.install_deps.unwrap_or(true)
    }

    /// Whether the schema directory is symlinked instead of copied.
    pub fn use_symlink(&self) -> bool {
        self.prisma.use_symlink.unwrap_or(false)
    }

    /// Whether the client is generated in data-proxy mode.
    pub fn data_proxy(&self) -> bool {
        self.prisma.data_proxy.unwrap_or(false)
    }

    /// Function names excluded from processing.
    pub fn ignore_functions(&self) -> &[String] {
        self.prisma.ignore_functions.as_deref().unwrap_or_default()
    }

    /// Directory containing `prisma/schema.prisma`.
    pub fn prisma_path(&self) -> PathBuf {
        self.resolve(self.prisma.prisma_path.as_deref())
    }

    /// Directory containing the bundler's `.webpack` output folder.
    pub fn webpack_output_path(&self) -> PathBuf {
        self.resolve(self.webpack.webpack_output_path.as_deref())
    }

    /// Whether each function is packaged as its own artifact.
    pub fn package_individually(&self) -> bool {
        self.package_individually.unwrap_or(false)
    }

    /// `provider.runtime`, if declared.
    pub fn provider_runtime(&self) -> Option<&str> {
        self.provider_runtime.as_deref()
    }

    /// Registered functions in declaration order.
    pub fn functions(&self) -> &[(String, FunctionDefinition)] {
        &self.functions
    }

    /// Output directory the bundler produced for the unit called `name`.
    pub fn unit_directory(&self, name: &str) -> PathBuf {
        self.webpack_output_path()
            .join(BUNDLER_OUTPUT_DIR)
            .join(name)
    }

    fn resolve(&self, path: Option<&Path>) -> PathBuf {
        match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => self.service_path.join(p),
            None => self.service_path.clone(),
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        service_path: PathBuf,
        prisma: PrismaSettings,
        webpack: WebpackSettings,
        provider_runtime: Option<String>,
        provider_architecture: Option<serde_yaml::Value>,
        package_individually: Option<bool>,
        functions: Vec<(String, FunctionDefinition)>,
    ) -> Self {
        Self {
            service_path,
            prisma,
            webpack,
            provider_runtime,
            provider_architecture,
            package_individually,
            functions,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::packager::{Architecture, Error, ServiceDescriptor, Settings, SettingsBuilder};
    use std::path::PathBuf;

    fn settings(yaml: &str) -> Settings {
        let descriptor: ServiceDescriptor = serde_yaml::from_str(yaml).unwrap();
        SettingsBuilder::new()
            .service_path("/srv/app")
            .descriptor(descriptor)
            .build()
            .unwrap()
    }

    #[test]
    fn defaults_apply_without_custom_section() {
        let s = settings("service: app");
        assert_eq!(s.architecture().unwrap(), Architecture::X86_64);
        assert_eq!(s.package_manager(), "npm");
        assert_eq!(s.prisma_version(), None);
        assert!(s.install_deps());
        assert!(!s.use_symlink());
        assert!(!s.data_proxy());
        assert!(s.ignore_functions().is_empty());
        assert_eq!(s.prisma_path(), PathBuf::from("/srv/app"));
        assert_eq!(s.webpack_output_path(), PathBuf::from("/srv/app"));
        assert!(!s.package_individually());
    }

    #[test]
    fn custom_architecture_overrides_provider() {
        let s = settings("provider:\n  architecture: x86_64\ncustom:\n  prisma:\n    architecture: arm64\n");
        assert_eq!(s.architecture().unwrap(), Architecture::Arm64);

        let s = settings("provider:\n  architecture: arm64\n");
        assert_eq!(s.architecture().unwrap(), Architecture::Arm64);
    }

    #[test]
    fn unmapped_architecture_surfaces_as_error() {
        let s = settings("provider:\n  architecture: mips\n");
        assert!(matches!(
            s.architecture(),
            Err(Error::UnsupportedArchitecture(ref name)) if name == "mips"
        ));
    }

    #[test]
    fn non_string_architecture_is_rejected_not_defaulted() {
        let s = settings("provider:\n  architecture: arm64\ncustom:\n  prisma:\n    architecture: [arm64]\n");
        assert!(matches!(s.architecture(), Err(Error::UnsupportedArchitecture(_))));

        let s = settings("provider:\n  architecture: 64\n");
        assert!(matches!(
            s.architecture(),
            Err(Error::UnsupportedArchitecture(ref name)) if name == "64"
        ));
    }

    #[test]
    fn null_architecture_reads_as_unset() {
        let s = settings("provider:\n  architecture: arm64\ncustom:\n  prisma:\n    architecture:\n");
        assert_eq!(s.architecture().unwrap(), Architecture::Arm64);
    }

    #[test]
    fn numeric_version_pin_is_used() {
        let s = settings("custom:\n  prisma:\n    version: 5\n");
        assert_eq!(s.prisma_version(), Some("5"));
    }

    #[test]
    fn relative_paths_resolve_against_service_root() {
        let s = settings(
            "custom:\n  prisma:\n    prismaPath: ../db\n  webpack:\n    webpackOutputPath: /abs/out\n",
        );
        assert_eq!(s.prisma_path(), PathBuf::from("/srv/app/../db"));
        assert_eq!(s.webpack_output_path(), PathBuf::from("/abs/out"));
        assert_eq!(
            s.unit_directory("hello"),
            PathBuf::from("/abs/out/.webpack/hello")
        );
    }

    #[test]
    fn empty_version_means_latest() {
        let s = settings("custom:\n  prisma:\n    version: ''\n");
        assert_eq!(s.prisma_version(), None);
    }
}
