//! `package.json` script entry for client generation.

use crate::packager::error::{Error, ErrorExt, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Manifest script that runs the generator.
pub const GENERATE_SCRIPT: &str = "prisma:generate";

/// File name of the package manifest inside a unit.
pub const MANIFEST_FILE: &str = "package.json";

/// What to do with the generation script entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScriptAction {
    /// Set the entry to the generation command.
    Add,
    /// Delete the entry if present.
    Remove,
}

/// Command line stored under [`GENERATE_SCRIPT`].
pub fn generate_command(data_proxy: bool) -> String {
    if data_proxy {
        "prisma generate --data-proxy".to_string()
    } else {
        "prisma generate".to_string()
    }
}

/// Adds or removes the generation script in `<cwd>/package.json`.
///
/// Only the one script key changes; every other key keeps its value and its
/// position. Output uses two-space indentation and keeps the original
/// file's trailing newline, if it had one.
pub async fn update_generate_script(action: ScriptAction, cwd: &Path, data_proxy: bool) -> Result<()> {
    let path = cwd.join(MANIFEST_FILE);
    let original = tokio::fs::read_to_string(&path)
        .await
        .fs_context("reading package manifest", &path)?;

    let updated = apply(action, &original, data_proxy).map_err(|e| match e {
        ManifestError::Parse(error) => Error::Manifest {
            path: path.clone(),
            error,
        },
        ManifestError::Shape(reason) => Error::InvalidManifest {
            path: path.clone(),
            reason,
        },
    })?;

    log::debug!("{:?} {} in {}", action, GENERATE_SCRIPT, path.display());
    tokio::fs::write(&path, updated)
        .await
        .fs_context("writing package manifest", &path)?;
    Ok(())
}

enum ManifestError {
    Parse(serde_json::Error),
    Shape(&'static str),
}

fn apply(action: ScriptAction, original: &str, data_proxy: bool) -> std::result::Result<String, ManifestError> {
    let mut manifest: Value = serde_json::from_str(original).map_err(ManifestError::Parse)?;
    let root = manifest
        .as_object_mut()
        .ok_or(ManifestError::Shape("top level is not an object"))?;

    match action {
        ScriptAction::Add => {
            let scripts = root
                .entry("scripts")
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
                .ok_or(ManifestError::Shape("`scripts` is not an object"))?;
            scripts.insert(
                GENERATE_SCRIPT.to_string(),
                Value::String(generate_command(data_proxy)),
            );
        }
        ScriptAction::Remove => {
            if let Some(scripts) = root.get_mut("scripts") {
                scripts
                    .as_object_mut()
                    .ok_or(ManifestError::Shape("`scripts` is not an object"))?
                    .shift_remove(GENERATE_SCRIPT);
            }
        }
    }

    let mut rendered = serde_json::to_string_pretty(&manifest).map_err(ManifestError::Parse)?;
    if original.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
