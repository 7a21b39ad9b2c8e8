//! Command line argument parsing.

use crate::bundler::BuildMode;
use clap::Parser;

/// Package a cargo project as an AppImage
#[derive(Parser, Debug)]
#[command(
    name = "appimage_builder",
    version,
    about = "Package a cargo project as an AppImage",
    long_about = "Builds the project, stages its AppStream metadata, runs linuxdeploy and
renames the result to <package>-<arch>.AppImage in the current directory.

Configuration is read from [package.metadata.appimage] in the nearest Cargo.toml.

Usage:
  appimage_builder             # debug build
  appimage_builder --release   # release build

Exit code 0 = artifact guaranteed to exist in the current directory."
)]
pub struct Args {
    /// Build and package the release profile instead of debug
    #[arg(long)]
    pub release: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build mode selected by the flags
    pub fn build_mode(&self) -> BuildMode {
        BuildMode::from_release_flag(self.release)
    }
}
