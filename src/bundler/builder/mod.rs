//! Bundle orchestration.
//!
//! This module provides the [`Bundler`] orchestrator, which runs the AppImage
//! pipeline with a given [`ToolRunner`](crate::bundler::ToolRunner) and
//! [`Downloader`](crate::bundler::Downloader) and returns a
//! [`BundledArtifact`] describing the result.

mod orchestrator;

pub use orchestrator::{BundledArtifact, Bundler};
