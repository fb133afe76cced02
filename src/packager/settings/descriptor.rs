//! Typed view of the host service descriptor (`serverless.yml`).
//!
//! Only the keys the packager reads are modelled; everything else in the
//! descriptor is ignored.

use super::{
    FunctionDefinition,
    de::{lenient, lenient_or_default, raw, scalar_string},
};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// The parts of a service descriptor relevant to client generation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceDescriptor {
    /// `provider` section.
    #[serde(deserialize_with = "lenient_or_default")]
    pub provider: ProviderSection,

    /// `package` section.
    #[serde(deserialize_with = "lenient_or_default")]
    pub package: PackageSection,

    /// `functions` table, in declaration order.
    #[serde(deserialize_with = "ordered_functions")]
    pub functions: Vec<(String, FunctionDefinition)>,

    /// `custom` section.
    #[serde(deserialize_with = "lenient_or_default")]
    pub custom: CustomSection,
}

/// `provider` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    /// Default runtime for every function.
    #[serde(deserialize_with = "lenient")]
    pub runtime: Option<String>,

    /// Deployment CPU architecture, validated when resolved.
    #[serde(deserialize_with = "raw")]
    pub architecture: Option<serde_yaml::Value>,
}

/// `package` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PackageSection {
    /// Package each function as its own artifact.
    #[serde(deserialize_with = "lenient")]
    pub individually: Option<bool>,
}

/// `custom` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    /// `custom.prisma`.
    #[serde(deserialize_with = "lenient_or_default")]
    pub prisma: PrismaSettings,

    /// `custom.webpack`.
    #[serde(deserialize_with = "lenient_or_default")]
    pub webpack: WebpackSettings,
}

/// Options under `custom.prisma`.
///
/// # Example
///
/// ```yaml
/// custom:
///   prisma:
///     installDeps: true
///     version: 5.0.0
///     useSymLink: false
///     dataProxy: false
///     ignoreFunctions: [healthcheck]
///     prismaPath: ../database
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrismaSettings {
    /// Overrides `provider.architecture`. Kept as written so a malformed
    /// value is rejected instead of defaulted.
    #[serde(deserialize_with = "raw")]
    pub architecture: Option<serde_yaml::Value>,

    /// Package manager binary (`npm`, `yarn`, `pnpm`, ...).
    #[serde(deserialize_with = "lenient")]
    pub package_manager: Option<String>,

    /// Version pin for the `prisma` package.
    #[serde(deserialize_with = "scalar_string")]
    pub version: Option<String>,

    /// Install and remove the tool around generation.
    #[serde(deserialize_with = "lenient")]
    pub install_deps: Option<bool>,

    /// Symlink the schema directory instead of copying the schema file.
    #[serde(rename = "useSymLink", deserialize_with = "lenient")]
    pub use_symlink: Option<bool>,

    /// Generate the client for the data proxy.
    #[serde(deserialize_with = "lenient")]
    pub data_proxy: Option<bool>,

    /// Function names to leave untouched.
    #[serde(deserialize_with = "lenient")]
    pub ignore_functions: Option<Vec<String>>,

    /// Directory containing `prisma/schema.prisma`.
    #[serde(deserialize_with = "lenient")]
    pub prisma_path: Option<PathBuf>,
}

/// Options under `custom.webpack` that locate the bundler output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebpackSettings {
    /// Directory holding the bundler's `.webpack` folder.
    #[serde(deserialize_with = "lenient")]
    pub webpack_output_path: Option<PathBuf>,
}

/// Reads the `functions` mapping without losing declaration order.
///
/// Entries with non-string keys are skipped; entries whose body is not a
/// mapping (`hello:` with nothing under it) read as a bare handler function.
fn ordered_functions<'de, D>(deserializer: D) -> Result<Vec<(String, FunctionDefinition)>, D::Error>
where
    D: Deserializer<'de>,
{
    let mapping: Option<serde_yaml::Mapping> = lenient(deserializer)?;
    let Some(mapping) = mapping else {
        return Ok(Vec::new());
    };

    Ok(mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let name = key.as_str()?.to_string();
            let definition = serde_yaml::from_value(value).unwrap_or_default();
            Some((name, definition))
        })
        .collect())
}
