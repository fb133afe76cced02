//! External tool detection and availability checking.

use std::{
    collections::HashMap,
    io,
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

/// Resolved tool locations, keyed by command name.
///
/// Cached to avoid rescanning `PATH` for every command of every unit.
static TOOL_PATHS: LazyLock<Mutex<HashMap<String, PathBuf>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Finds `name` on `PATH`.
///
/// # Errors
///
/// Returns [`io::ErrorKind::NotFound`] when the tool is not installed.
pub fn locate_tool(name: &str) -> io::Result<PathBuf> {
    if let Some(path) = TOOL_PATHS
        .lock()
        .ok()
        .and_then(|cache| cache.get(name).cloned())
    {
        return Ok(path);
    }

    match which::which(name) {
        Ok(path) => {
            log::debug!("Found {} at: {}", name, path.display());
            if let Ok(mut cache) = TOOL_PATHS.lock() {
                cache.insert(name.to_string(), path.clone());
            }
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", name, e);
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{name} not found in PATH. Install it or set custom.prisma.packageManager"),
            ))
        }
    }
}
