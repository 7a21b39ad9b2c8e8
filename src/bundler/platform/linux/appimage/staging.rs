//! Staging area cleanup.
//!
//! Removes everything a previous run could have left behind, so each run
//! starts from the same state. Only paths derived from the package name are
//! touched.

use crate::bundler::{Result, Settings, utils::fs};

/// Removes previous bundles, the staging tree and the stripped executable.
///
/// Missing paths are fine; any other filesystem error aborts.
pub async fn clean(settings: &Settings) -> Result<()> {
    let tool = settings.linuxdeploy_path();

    for entry in glob::glob(&settings.stale_bundle_pattern())? {
        let path = entry?;
        if path == tool {
            log::debug!("Keeping cached linuxdeploy {}", path.display());
            continue;
        }
        if path.is_dir() {
            log::warn!("Skipping directory matching bundle pattern: {}", path.display());
            continue;
        }
        if fs::remove_file(&path).await? {
            log::info!("Removed previous bundle {}", path.display());
        }
    }

    let app_dir = settings.app_dir();
    if fs::remove_dir_all(&app_dir).await? {
        log::info!("Removed old AppDir {}", app_dir.display());
    }

    let executable = settings.staged_executable();
    if fs::remove_file(&executable).await? {
        log::debug!("Removed stale executable {}", executable.display());
    }

    Ok(())
}
