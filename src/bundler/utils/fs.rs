//! File system utilities for staging.
//!
//! Idempotent removal helpers, asset copying with missing-source detection
//! and permission handling.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Removes a file, succeeding if it does not exist.
pub async fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Creates `path` and any missing parents, failing if `path` itself already exists.
pub async fn create_new_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    fs::create_dir(path)
        .await
        .fs_context("creating directory", path)
}

/// Fails with [`Error::MissingAsset`] unless `path` is a regular file.
pub async fn require_file(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(Error::MissingAsset {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::MissingAsset {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e).fs_context("reading metadata", path),
    }
}

/// Copies a regular file into an existing directory, keeping its file name.
///
/// Fails if the source path is not a file or doesn't exist.
pub async fn copy_into(from: &Path, dir: &Path) -> Result<std::path::PathBuf> {
    require_file(from).await?;
    let file_name = from.file_name().ok_or_else(|| Error::MissingAsset {
        path: from.to_path_buf(),
    })?;
    let to = dir.join(file_name);
    fs::copy(from, &to).await.fs_context("copying file", &to)?;
    Ok(to)
}

/// Adds execute permission for owner, group and other, keeping every other mode bit.
pub async fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(path)
            .await
            .fs_context("reading permissions", path)?
            .permissions();
        permissions.set_mode(permissions.mode() | 0o111);
        fs::set_permissions(path, permissions)
            .await
            .fs_context("setting executable permission", path)?;

        log::debug!("Set executable permission on {}", path.display());
    }

    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
