//! AppImage assembly.
//!
//! Turns a cargo project plus its desktop entry, icon and AppStream metadata
//! into `<name>-<arch>.AppImage`:
//!
//! - [`settings`] - explicit configuration of every path and identifier
//! - [`platform::linux::appimage`] - the pipeline steps
//! - [`builder`] - the [`Bundler`] orchestrator
//! - [`utils`] - filesystem, process, download and checksum helpers

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{BundledArtifact, Bundler};
pub use error::{Error, Result};
pub use platform::linux::appimage::{Pipeline, PipelineState};
pub use settings::{
    AppImageSettings, Arch, BuildMode, PackageSettings, Settings, SettingsBuilder,
};
pub use utils::http::{Downloader, HttpDownloader};
pub use utils::process::{SystemRunner, ToolInvocation, ToolRunner, ToolStatus};
