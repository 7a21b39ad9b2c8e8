//! AppImage bundler - portable Linux applications.
//!
//! Creates a single self-contained executable from a cargo project by
//! driving linuxdeploy over a freshly staged AppDir.
//!
//! # Process
//!
//! 1. Removes leftovers of previous runs ([`staging`])
//! 2. Builds and strips the binary ([`build`])
//! 3. Downloads linuxdeploy unless cached ([`linuxdeploy`])
//! 4. Stages the AppStream metadata ([`metadata`])
//! 5. Invokes linuxdeploy ([`linuxdeploy`])
//! 6. Renames the produced AppImage ([`finalize`])

pub mod build;
pub mod finalize;
pub mod linuxdeploy;
pub mod metadata;
pub mod staging;

use crate::bundler::{
    BuildMode, Result, Settings,
    utils::{http::Downloader, process::ToolRunner},
};
use std::path::PathBuf;

/// Progress of a pipeline run.
///
/// States are reached strictly in declaration order; any failing step moves
/// the pipeline to [`PipelineState::Failed`] and nothing runs afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Leftovers of previous runs removed.
    Clean,
    /// Binary compiled and stripped.
    Built,
    /// linuxdeploy available locally.
    ToolReady,
    /// AppDir populated.
    Staged,
    /// linuxdeploy produced an AppImage.
    Bundled,
    /// AppImage renamed to its canonical name.
    Finalized,
    /// A step failed.
    Failed,
}

/// One run of the AppImage pipeline.
///
/// # Examples
///
/// ```no_run
/// use appimage_builder::bundler::{BuildMode, HttpDownloader, Settings, SystemRunner};
/// use appimage_builder::bundler::platform::linux::appimage::Pipeline;
///
/// # async fn example(settings: Settings) -> appimage_builder::bundler::Result<()> {
/// let runner = SystemRunner::new();
/// let downloader = HttpDownloader::new()?;
/// let mut pipeline = Pipeline::new(&settings, &runner, &downloader);
/// let appimage = pipeline.run(BuildMode::Release).await?;
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<'a, R, D> {
    settings: &'a Settings,
    runner: &'a R,
    downloader: &'a D,
    state: Option<PipelineState>,
}

impl<'a, R: ToolRunner, D: Downloader> Pipeline<'a, R, D> {
    /// Creates a pipeline that has not started yet.
    pub fn new(settings: &'a Settings, runner: &'a R, downloader: &'a D) -> Self {
        Self {
            settings,
            runner,
            downloader,
            state: None,
        }
    }

    /// Last state reached, `None` before [`run`](Self::run).
    pub fn state(&self) -> Option<PipelineState> {
        self.state
    }

    /// Runs every step in order and returns the path of the final AppImage.
    pub async fn run(&mut self, mode: BuildMode) -> Result<PathBuf> {
        log::info!(
            "Building AppImage for {} ({})",
            self.settings.package_name(),
            self.settings.arch_name()
        );

        match self.run_steps(mode).await {
            Ok(output) => Ok(output),
            Err(e) => {
                log::error!("AppImage pipeline failed after {:?}", self.state);
                self.state = Some(PipelineState::Failed);
                Err(e)
            }
        }
    }

    async fn run_steps(&mut self, mode: BuildMode) -> Result<PathBuf> {
        staging::clean(self.settings).await?;
        self.advance(PipelineState::Clean);

        build::build_binary(self.settings, mode, self.runner).await?;
        self.advance(PipelineState::Built);

        let tool = linuxdeploy::ensure_linuxdeploy(self.settings, self.downloader).await?;
        self.advance(PipelineState::ToolReady);

        metadata::stage_metadata(self.settings).await?;
        self.advance(PipelineState::Staged);

        linuxdeploy::run_linuxdeploy(self.settings, self.runner, &tool).await?;
        self.advance(PipelineState::Bundled);

        let output = finalize::finalize(self.settings).await?;
        self.advance(PipelineState::Finalized);

        Ok(output)
    }

    fn advance(&mut self, next: PipelineState) {
        log::info!("AppImage pipeline: {:?} -> {:?}", self.state, next);
        self.state = Some(next);
    }
}

/// Bundle project as AppImage.
///
/// # Returns
///
/// Path to the generated `<name>-<arch>.AppImage`.
pub async fn bundle_project<R: ToolRunner, D: Downloader>(
    settings: &Settings,
    mode: BuildMode,
    runner: &R,
    downloader: &D,
) -> Result<PathBuf> {
    Pipeline::new(settings, runner, downloader).run(mode).await
}
