//! Command line interface for the AppImage builder.

mod args;

pub use args::Args;

use crate::bundler::{Bundler, HttpDownloader, SystemRunner};
use crate::error::Result;

/// Main CLI entry point
///
/// Returns the process exit code on success.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let work_dir = std::env::current_dir()?;

    let settings = crate::metadata::load_settings(&work_dir)?;
    let bundler = Bundler::new(settings, SystemRunner::new(), HttpDownloader::new()?);

    let artifact = bundler.bundle(args.build_mode()).await?;
    log::info!(
        "✓ {} ({} bytes)",
        artifact.path.display(),
        artifact.size
    );

    Ok(0)
}
