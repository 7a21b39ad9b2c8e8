//! AppImage builder - packages a cargo project as a portable AppImage.
//!
//! Builds the binary, fetches linuxdeploy on first use, stages the AppDir and
//! leaves `<package>-<arch>.AppImage` in the current directory.

use appimage_builder::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
