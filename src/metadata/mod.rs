//! Service descriptor discovery and loading.

use crate::error::{CliError, PluginError, Result};
use crate::packager::ServiceDescriptor;
use std::path::{Path, PathBuf};

/// Descriptor file names looked up in a service root, in order.
pub const DESCRIPTOR_FILES: [&str; 3] = ["serverless.yml", "serverless.yaml", "serverless.json"];

/// Finds the descriptor file in `service_path`.
pub fn find_service_descriptor(service_path: &Path) -> Result<PathBuf> {
    DESCRIPTOR_FILES
        .iter()
        .map(|name| service_path.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            PluginError::Cli(CliError::InvalidArguments {
                reason: format!(
                    "No service descriptor ({}) found in {}",
                    DESCRIPTOR_FILES.join(", "),
                    service_path.display()
                ),
            })
        })
}

/// Loads the service descriptor at `path` (single read + parse).
///
/// YAML and JSON descriptors are both accepted. Keys the packager does not
/// use are ignored.
pub fn load_service_descriptor(path: &Path) -> Result<ServiceDescriptor> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        PluginError::Cli(CliError::ExecutionFailed {
            command: "read_service_descriptor".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    let descriptor: ServiceDescriptor = serde_yaml::from_str(&contents).map_err(|e| {
        PluginError::Cli(CliError::ExecutionFailed {
            command: "parse_service_descriptor".to_string(),
            reason: format!("Failed to parse {}: {}", path.display(), e),
        })
    })?;

    log::debug!(
        "Loaded {} with {} functions",
        path.display(),
        descriptor.functions.len()
    );
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_yaml_before_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("serverless.json"), "{}").unwrap();
        std::fs::write(dir.path().join("serverless.yml"), "service: app").unwrap();
        assert_eq!(
            find_service_descriptor(dir.path()).unwrap(),
            dir.path().join("serverless.yml")
        );
    }

    #[test]
    fn missing_descriptor_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_service_descriptor(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No service descriptor"));
    }

    #[test]
    fn loads_json_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("serverless.json");
        std::fs::write(
            &path,
            r#"{"package":{"individually":true},"functions":{"b":{"handler":"b.h"},"a":{"image":"x"}}}"#,
        )
        .unwrap();
        let descriptor = load_service_descriptor(&path).unwrap();
        assert_eq!(descriptor.package.individually, Some(true));
        assert_eq!(descriptor.functions[0].0, "b");
        assert!(descriptor.functions[1].1.is_image());
    }

    #[test]
    fn unparsable_descriptor_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("serverless.yml");
        std::fs::write(&path, "functions: [unclosed").unwrap();
        assert!(load_service_descriptor(&path).is_err());
    }
}
