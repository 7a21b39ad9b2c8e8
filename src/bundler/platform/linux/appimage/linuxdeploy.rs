//! linuxdeploy acquisition and invocation.

use crate::bundler::{
    Error, Result, Settings,
    error::ErrorExt,
    utils::{
        checksum::calculate_sha256,
        fs,
        http::Downloader,
        process::{ToolInvocation, ToolRunner, run_checked},
    },
};
use std::path::{Path, PathBuf};

/// Returns the cached linuxdeploy, downloading it on first use.
///
/// A file already at [`Settings::linuxdeploy_path`] is trusted as-is and no
/// network request is made. A fresh download is streamed to a `.part` file,
/// verified against the pinned SHA-256 if one is configured, made executable
/// and only then renamed into place, so an interrupted download never
/// becomes the cached tool.
pub async fn ensure_linuxdeploy<D: Downloader>(
    settings: &Settings,
    downloader: &D,
) -> Result<PathBuf> {
    let tool_path = settings.linuxdeploy_path();

    if tokio::fs::try_exists(&tool_path)
        .await
        .fs_context("checking for cached linuxdeploy", &tool_path)?
    {
        log::debug!("linuxdeploy already cached at {}", tool_path.display());
        return Ok(tool_path);
    }

    log::info!("Downloading linuxdeploy for {}...", settings.arch_name());

    let partial = partial_path(&tool_path);
    fs::remove_file(&partial).await?;

    if let Err(e) = fetch(settings, downloader, &partial).await {
        if let Err(cleanup) = fs::remove_file(&partial).await {
            log::warn!("Failed to remove partial download: {}", cleanup);
        }
        return Err(e);
    }

    tokio::fs::rename(&partial, &tool_path)
        .await
        .fs_context("installing linuxdeploy", &tool_path)?;

    log::info!("✓ linuxdeploy cached at {}", tool_path.display());
    Ok(tool_path)
}

async fn fetch<D: Downloader>(settings: &Settings, downloader: &D, dest: &Path) -> Result<()> {
    let url = settings.linuxdeploy_url();
    let bytes = downloader.download(&url, dest).await?;
    log::debug!("Fetched {} bytes from {}", bytes, url);

    if let Some(expected) = &settings.appimage().linuxdeploy_sha256 {
        let actual = calculate_sha256(dest).await?;
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(Error::ChecksumMismatch {
                path: dest.to_path_buf(),
                expected: expected.clone(),
                actual,
            });
        }
        log::debug!("SHA-256 verified: {}", actual);
    }

    fs::make_executable(dest).await
}

/// `<tool>.part` next to the tool.
fn partial_path(tool_path: &Path) -> PathBuf {
    let mut name = tool_path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    tool_path.with_file_name(name)
}

/// Runs linuxdeploy against the staging tree.
///
/// linuxdeploy copies the executable, desktop entry and icon into the
/// AppDir, bundles shared libraries (plus whatever the plugins add) and
/// writes `<ProductName>-<version>-<arch>.AppImage` into the work dir.
pub async fn run_linuxdeploy<R: ToolRunner>(
    settings: &Settings,
    runner: &R,
    linuxdeploy: &Path,
) -> Result<()> {
    let appimage = settings.appimage();

    let mut invocation = ToolInvocation::new(linuxdeploy, settings.work_dir())
        .path_flag("appdir", &settings.app_dir())
        .path_flag("executable", &settings.staged_executable())
        .path_flag("desktop-file", &settings.desktop_file())
        .path_flag("icon-file", &settings.icon_file())
        .env("ARCH", settings.arch_name());

    for plugin in &appimage.plugins {
        invocation = invocation.arg("--plugin").arg(plugin);
    }
    invocation = invocation.arg("--output").arg(&appimage.output_format);

    if appimage.extract_and_run {
        invocation = invocation.env("APPIMAGE_EXTRACT_AND_RUN", "1");
    }

    log::info!("Running linuxdeploy for {}", settings.package_name());
    run_checked(runner, &invocation).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("/w/linuxdeploy-x86_64.AppImage")),
            Path::new("/w/linuxdeploy-x86_64.AppImage.part")
        );
    }
}
