//! Function definitions as declared in the service descriptor.

use super::de::{lenient, present};
use serde::Deserialize;

/// Runtime assumed when neither the function nor the provider declares one.
pub const DEFAULT_RUNTIME: &str = "node";

/// One entry of the descriptor's `functions` table.
///
/// A function is either built from handler code, optionally with its own
/// runtime, or deployed from a container image. The presence of an `image`
/// key decides the variant, whatever the key's value is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawFunction")]
pub enum FunctionDefinition {
    /// Code-based function.
    Handler {
        /// `handler` entry point, if declared.
        handler: Option<String>,
        /// Per-function runtime override.
        runtime: Option<String>,
    },
    /// Container-image function; never processed.
    Image {
        /// Image reference as written.
        image: serde_yaml::Value,
    },
}

impl FunctionDefinition {
    /// Returns `true` for container-image functions.
    pub fn is_image(&self) -> bool {
        matches!(self, FunctionDefinition::Image { .. })
    }

    /// Runtime declared on the function itself.
    pub fn runtime(&self) -> Option<&str> {
        match self {
            FunctionDefinition::Handler { runtime, .. } => runtime.as_deref(),
            FunctionDefinition::Image { .. } => None,
        }
    }

    /// Runtime the function runs on: its own, else the provider's, else
    /// [`DEFAULT_RUNTIME`].
    pub fn effective_runtime<'a>(&'a self, provider_runtime: Option<&'a str>) -> &'a str {
        self.runtime().or(provider_runtime).unwrap_or(DEFAULT_RUNTIME)
    }
}

impl Default for FunctionDefinition {
    fn default() -> Self {
        FunctionDefinition::Handler {
            handler: None,
            runtime: None,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawFunction {
    #[serde(deserialize_with = "present")]
    image: Option<serde_yaml::Value>,
    #[serde(deserialize_with = "lenient")]
    handler: Option<String>,
    #[serde(deserialize_with = "lenient")]
    runtime: Option<String>,
}

impl From<RawFunction> for FunctionDefinition {
    fn from(raw: RawFunction) -> Self {
        match raw.image {
            Some(image) => FunctionDefinition::Image { image },
            None => FunctionDefinition::Handler {
                handler: raw.handler,
                runtime: raw.runtime,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> FunctionDefinition {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn image_key_selects_image_variant_even_when_null() {
        assert!(parse("image: 123456.dkr.ecr/app:latest").is_image());
        assert!(parse("image: ~\nruntime: nodejs18.x").is_image());
        assert!(parse("image:\n  name: app\n  command: [index.handler]").is_image());
    }

    #[test]
    fn handler_definition_keeps_runtime() {
        let def = parse("handler: src/index.handler\nruntime: nodejs20.x");
        assert_eq!(
            def,
            FunctionDefinition::Handler {
                handler: Some("src/index.handler".into()),
                runtime: Some("nodejs20.x".into()),
            }
        );
    }

    #[test]
    fn non_string_runtime_reads_as_absent() {
        let def = parse("handler: a.b\nruntime:\n  nested: true");
        assert_eq!(def.runtime(), None);
        assert_eq!(def.effective_runtime(None), DEFAULT_RUNTIME);
    }

    #[test]
    fn effective_runtime_falls_back_to_provider_then_node() {
        let def = parse("handler: a.b");
        assert_eq!(def.effective_runtime(Some("python3.12")), "python3.12");
        assert_eq!(def.effective_runtime(None), "node");

        let own = parse("handler: a.b\nruntime: nodejs18.x");
        assert_eq!(own.effective_runtime(Some("python3.12")), "nodejs18.x");
    }
}
