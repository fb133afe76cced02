//! File system utilities for packaging units.
//!
//! Deletions are idempotent: a path that is already gone is not an error.
//! That is what makes re-running after a failed run safe.

use crate::packager::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::{
    io,
    path::{Component, Path, PathBuf},
};
use tokio::fs;

/// Removes a file, symlink or directory tree if it exists.
///
/// Symlinks are removed themselves, never followed.
pub async fn remove_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()), // Idempotent
        Err(e) => return Err(e).fs_context("inspecting", path),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        remove_link_or_file(path).await
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing", path),
    }
}

#[cfg(windows)]
async fn remove_link_or_file(path: &Path) -> io::Result<()> {
    // Directory symlinks and junctions must be removed as directories.
    match fs::remove_file(path).await {
        Err(_) if path.is_dir() => fs::remove_dir(path).await,
        other => other,
    }
}

#[cfg(not(windows))]
async fn remove_link_or_file(path: &Path) -> io::Result<()> {
    fs::remove_file(path).await
}

/// Copies a regular file, creating the destination's parent directories and
/// overwriting any existing destination file.
///
/// Fails if the source path is a directory or doesn't exist, or if the
/// destination resolves to the source file itself.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::Fs {
            context: "copying",
            path: from.to_path_buf(),
            error: io::Error::new(io::ErrorKind::NotFound, "source does not exist"),
        });
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    let same_file = matches!(
        (fs::canonicalize(from).await, fs::canonicalize(to).await),
        (Ok(source), Ok(dest)) if source == dest
    );
    if same_file {
        return Err(Error::Fs {
            context: "copying onto itself",
            path: to.to_path_buf(),
            error: io::Error::new(io::ErrorKind::InvalidInput, "destination is the source file"),
        });
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying to", to)?;
    Ok(())
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
pub async fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    fs::symlink(target, link).await
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
pub async fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    fs::symlink_dir(target, link).await
}

/// Computes `to` relative to the directory `from`.
///
/// Both paths are normalized first, so `..` segments are resolved lexically.
/// When the paths share no root (different Windows drives) the absolute `to`
/// is returned.
pub fn relative_path(from: &Path, to: &Path) -> Result<PathBuf> {
    let from = from
        .absolutize()
        .fs_context("resolving path", from)?
        .into_owned();
    let to = to.absolutize().fs_context("resolving path", to)?.into_owned();

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();

    if from_parts.first() != to_parts.first() {
        return Ok(to.clone());
    }

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from_parts.len() {
        relative.push("..");
    }
    for part in &to_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Ok(relative)
}

/// Total size in bytes of a file or directory tree; zero if it is missing.
///
/// Symlinks count as their own size, their targets are not followed. The
/// traversal runs on the blocking thread pool.
pub async fn disk_usage(path: &Path) -> u64 {
    let owned = path.to_path_buf();
    tokio::task::spawn_blocking(move || tree_size(&owned))
        .await
        .unwrap_or_else(|e| {
            log::debug!("Size accounting for {} failed: {}", path.display(), e);
            0
        })
}

fn tree_size(path: &Path) -> u64 {
    walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.metadata().ok())
        .filter(|m| !m.is_dir())
        .map(|m| m.len())
        .sum()
}
