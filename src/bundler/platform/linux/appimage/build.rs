//! Compiling and stripping the application binary.

use crate::bundler::{
    BuildMode, Result, Settings,
    utils::{
        fs,
        process::{ToolInvocation, ToolRunner, run_checked},
    },
};
use std::path::PathBuf;

/// Builds the package with cargo and writes a stripped copy to the work dir.
///
/// Runs `cargo build --features <features> [--release]` in the project root,
/// then `strip -o <work_dir>/<name> <target>/<profile>/<name>`.
///
/// # Returns
///
/// Path of the stripped executable.
pub async fn build_binary<R: ToolRunner>(
    settings: &Settings,
    mode: BuildMode,
    runner: &R,
) -> Result<PathBuf> {
    log::info!("Building {} ({})", settings.package_name(), mode);

    let cargo = ToolInvocation::new(settings.cargo(), settings.project_root())
        .args(mode.cargo_args(&settings.appimage().features));
    run_checked(runner, &cargo).await?;

    let binary = settings.binary_path(mode);
    fs::require_file(&binary).await?;

    let staged = settings.staged_executable();
    let strip = ToolInvocation::new(settings.strip(), settings.work_dir())
        .arg("-o")
        .arg(&staged)
        .arg(&binary);
    run_checked(runner, &strip).await?;
    fs::require_file(&staged).await?;

    log::debug!("Stripped {} to {}", binary.display(), staged.display());
    Ok(staged)
}
