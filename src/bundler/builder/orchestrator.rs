//! Main bundler orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the AppImage
//! pipeline and reports on the artifact it produced.

use crate::bundler::{
    BuildMode, Result, Settings,
    error::ErrorExt,
    platform::linux::appimage,
    utils::{checksum::calculate_sha256, http::Downloader, process::ToolRunner},
};
use std::path::PathBuf;

/// Information about a finished bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledArtifact {
    /// Path of the AppImage.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256.
    pub checksum: String,
}

/// Main bundler orchestrator.
///
/// Owns the settings together with the process runner and downloader the
/// pipeline uses, so production code and tests differ only in what they
/// plug in here.
///
/// # Examples
///
/// ```no_run
/// use appimage_builder::bundler::{BuildMode, Bundler, HttpDownloader, Settings, SystemRunner};
///
/// # async fn example(settings: Settings) -> appimage_builder::bundler::Result<()> {
/// let bundler = Bundler::new(settings, SystemRunner::new(), HttpDownloader::new()?);
/// let artifact = bundler.bundle(BuildMode::Debug).await?;
/// println!("{} ({} bytes, sha256 {})", artifact.path.display(), artifact.size, artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R, D> {
    settings: Settings,
    runner: R,
    downloader: D,
}

impl<R: ToolRunner, D: Downloader> Bundler<R, D> {
    /// Creates a new bundler.
    pub fn new(settings: Settings, runner: R, downloader: D) -> Self {
        Self {
            settings,
            runner,
            downloader,
        }
    }

    /// Runs the pipeline for the given build mode.
    ///
    /// # Returns
    ///
    /// The final AppImage with its size and checksum.
    pub async fn bundle(&self, mode: BuildMode) -> Result<BundledArtifact> {
        let path =
            appimage::bundle_project(&self.settings, mode, &self.runner, &self.downloader).await?;

        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;

        log::info!("SHA256: {}", checksum);

        Ok(BundledArtifact {
            path,
            size,
            checksum,
        })
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
