//! AppStream metadata staging.

use crate::bundler::{Result, Settings, utils::fs};
use std::path::PathBuf;

/// Copies the AppStream document into `<AppDir>/usr/share/metainfo`.
///
/// The desktop entry and icon are handed to linuxdeploy by path, but their
/// presence is checked here so a missing asset fails before bundling.
///
/// # Returns
///
/// Path of the staged AppStream document.
pub async fn stage_metadata(settings: &Settings) -> Result<PathBuf> {
    fs::require_file(&settings.desktop_file()).await?;
    fs::require_file(&settings.icon_file()).await?;

    let metainfo = settings.metainfo_dir();
    fs::create_new_dir(&metainfo).await?;

    let staged = fs::copy_into(&settings.appdata_file(), &metainfo).await?;
    log::debug!("Staged {}", staged.display());
    Ok(staged)
}
