//! AppImage bundler library.
//!
//! Packages a cargo project's binary, desktop entry, icon and AppStream
//! metadata into a single `<package>-<arch>.AppImage` using linuxdeploy.
//!
//! It can be used both as a CLI tool and as a library dependency; tests and
//! embedders drive [`bundler::Bundler`] with their own
//! [`ToolRunner`](bundler::ToolRunner) and [`Downloader`](bundler::Downloader).

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
