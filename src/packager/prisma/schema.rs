//! Placement of the schema file inside a packaging unit.

use crate::packager::{
    error::{Error, ErrorExt, Result},
    utils::fs,
};
use std::{
    io,
    path::{Path, PathBuf},
};

/// Directory holding the schema, relative to the schema root and to a unit.
pub const SCHEMA_DIR: &str = "prisma";

/// Schema file name.
pub const SCHEMA_FILE: &str = "schema.prisma";

/// How the schema reaches the unit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemaMode {
    /// Copy `schema.prisma` into `<unit>/prisma/`.
    Copy,
    /// Symlink `<unit>/prisma` to the source schema directory.
    Symlink,
}

impl SchemaMode {
    /// Mode for the `useSymLink` option.
    pub fn from_symlink_flag(use_symlink: bool) -> Self {
        if use_symlink {
            SchemaMode::Symlink
        } else {
            SchemaMode::Copy
        }
    }
}

/// Places the schema found under `schema_root/prisma` into the unit at `cwd`.
///
/// Returns the path created inside the unit.
pub async fn materialize(mode: SchemaMode, schema_root: &Path, cwd: &Path) -> Result<PathBuf> {
    match mode {
        SchemaMode::Copy => copy_schema(schema_root, cwd).await,
        SchemaMode::Symlink => link_schema_dir(schema_root, cwd).await,
    }
}

async fn copy_schema(schema_root: &Path, cwd: &Path) -> Result<PathBuf> {
    let source = schema_root.join(SCHEMA_DIR).join(SCHEMA_FILE);
    let target_dir = cwd.join(SCHEMA_DIR);

    // A link left by a symlink-mode run points at the source directory.
    match tokio::fs::symlink_metadata(&target_dir).await {
        Ok(meta) if meta.file_type().is_symlink() => fs::remove_path(&target_dir).await?,
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).fs_context("inspecting", &target_dir),
    }

    tokio::fs::create_dir_all(&target_dir)
        .await
        .fs_context("creating schema directory", &target_dir)?;

    let target = target_dir.join(SCHEMA_FILE);
    fs::copy_file(&source, &target).await?;
    Ok(target)
}

async fn link_schema_dir(schema_root: &Path, cwd: &Path) -> Result<PathBuf> {
    let source_dir = schema_root.join(SCHEMA_DIR);
    if !source_dir.is_dir() {
        return Err(Error::Fs {
            context: "linking schema directory",
            path: source_dir,
            error: io::Error::new(io::ErrorKind::NotFound, "schema directory does not exist"),
        });
    }

    let link = cwd.join(SCHEMA_DIR);
    match tokio::fs::symlink_metadata(&link).await {
        Ok(meta) if meta.file_type().is_symlink() => fs::remove_path(&link).await?,
        Ok(_) => {
            return Err(Error::Fs {
                context: "linking schema directory",
                path: link,
                error: io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "a file or directory is in the way of the symlink",
                ),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).fs_context("inspecting", &link),
    }

    let target = fs::relative_path(cwd, &source_dir)?;
    log::debug!("Linking {} -> {}", link.display(), target.display());
    fs::symlink_dir(&target, &link)
        .await
        .fs_context("creating schema symlink", &link)?;
    Ok(link)
}
