//! Deployment CPU architecture and its engine platform mapping.

use crate::packager::error::{Error, Result};
use std::{fmt, str::FromStr};

/// CPU architecture of the deployment target.
///
/// Only the two architectures the function runtime can be deployed to are
/// representable. Anything else is rejected when parsed, so an unsupported
/// value can never silently prune the wrong engines.
///
/// # Examples
///
/// ```
/// use serverless_prisma_bundle::packager::Architecture;
///
/// let arch: Architecture = "arm64".parse().unwrap();
/// assert_eq!(arch.engine_platform(), "linux-arm64");
/// assert!("ppc64le".parse::<Architecture>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Architecture {
    /// x86_64 / AMD64, the provider default.
    #[default]
    X86_64,
    /// AArch64 / Graviton.
    Arm64,
}

impl Architecture {
    /// Every supported architecture, in mapping order.
    pub const ALL: [Architecture; 2] = [Architecture::X86_64, Architecture::Arm64];

    /// Name used in the service descriptor.
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::X86_64 => "x86_64",
            Architecture::Arm64 => "arm64",
        }
    }

    /// Substring identifying this architecture's engine binaries.
    ///
    /// Generated engines are named like
    /// `libquery_engine-rhel-openssl-3.0.x.so.node` or
    /// `libquery_engine-linux-arm64-openssl-3.0.x.so.node`.
    pub fn engine_platform(self) -> &'static str {
        match self {
            Architecture::X86_64 => "rhel",
            Architecture::Arm64 => "linux-arm64",
        }
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x86_64" => Ok(Architecture::X86_64),
            "arm64" => Ok(Architecture::Arm64),
            other => Err(Error::UnsupportedArchitecture(other.to_string())),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_both_supported_architectures() {
        assert_eq!(
            "x86_64".parse::<Architecture>().unwrap().engine_platform(),
            "rhel"
        );
        assert_eq!(
            "arm64".parse::<Architecture>().unwrap().engine_platform(),
            "linux-arm64"
        );
    }

    #[test]
    fn unmapped_architecture_is_an_error() {
        for name in ["aarch64", "X86_64", "", "ppc64le"] {
            let err = name.parse::<Architecture>().unwrap_err();
            assert!(matches!(err, Error::UnsupportedArchitecture(ref n) if n == name));
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for arch in Architecture::ALL {
            assert_eq!(arch.to_string().parse::<Architecture>().unwrap(), arch);
        }
    }
}
