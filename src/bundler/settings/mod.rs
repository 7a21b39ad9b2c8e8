//! Configuration structures for the AppImage pipeline.
//!
//! This module provides the package identity, AppImage/linuxdeploy options,
//! build mode and architecture types, and the builder that assembles them
//! into [`Settings`].

mod arch;
mod build_mode;
mod builder;
mod core;
mod linux;
mod package;

// Re-export all public types
pub use arch::Arch;
pub use build_mode::BuildMode;
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use linux::{AppImageSettings, LINUXDEPLOY_BASE_URL};
pub use package::PackageSettings;
