//! Renaming linuxdeploy's output to the canonical bundle name.

use crate::bundler::{
    Error, Result, Settings,
    error::{Context, ErrorExt},
};
use std::path::{Path, PathBuf};

/// Moves the single bundle linuxdeploy produced to [`Settings::output_path`].
///
/// linuxdeploy picks its own file name (`<ProductName>-<version>-<arch>.<ext>`).
/// Exactly one file may match; none or several is an
/// [`Error::ArtifactMultiplicity`].
pub async fn finalize(settings: &Settings) -> Result<PathBuf> {
    let product_name = match settings.product_name() {
        Some(name) => name.to_string(),
        None => product_name_from_desktop(&settings.desktop_file()).await?,
    };

    let pattern = settings.produced_bundle_pattern(&product_name);
    let matches = glob::glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;

    let produced = match matches.as_slice() {
        [single] => single.clone(),
        _ => return Err(Error::ArtifactMultiplicity { pattern, matches }),
    };

    let output = settings.output_path();
    tokio::fs::rename(&produced, &output)
        .await
        .fs_context("renaming bundle", &output)?;

    log::info!("✓ Created AppImage: {}", output.display());
    Ok(output)
}

/// Derives linuxdeploy's output prefix from a desktop entry.
///
/// linuxdeploy uses the `Name=` key of the `[Desktop Entry]` group with
/// spaces replaced by underscores.
pub async fn product_name_from_desktop(desktop_file: &Path) -> Result<String> {
    let contents = tokio::fs::read_to_string(desktop_file)
        .await
        .fs_context("reading desktop entry", desktop_file)?;

    desktop_entry_name(&contents)
        .map(|name| name.replace(' ', "_"))
        .context(format!("no Name= key in {}", desktop_file.display()))
}

fn desktop_entry_name(contents: &str) -> Option<&str> {
    let mut in_entry = false;
    for line in contents.lines().map(str::trim) {
        if line.starts_with('[') {
            in_entry = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == "Name" {
                return Some(value.trim());
            }
        }
    }
    None
}
