//! Top-level error types.
//!
//! This module defines the errors surfaced to the command line, with
//! recovery suggestions and the process exit code for each.

use crate::bundler::Error as PipelineError;
use thiserror::Error;

/// Result type alias for command line operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all command line operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument and configuration errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Pipeline errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] PipelineError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments or project layout
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required configuration value
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::Bundler(PipelineError::CommandFailed { program, .. }) => vec![
                format!("See the output of `{program}` above for the cause"),
                "Re-run after fixing it; every run starts from a clean staging area".to_string(),
            ],
            Self::Bundler(PipelineError::ToolNotFound { program, .. }) => {
                vec![format!("Install `{program}` and make sure it is on PATH")]
            }
            Self::Bundler(PipelineError::Download { .. }) => vec![
                "Check network access to the linuxdeploy release URL".to_string(),
                "Alternatively place linuxdeploy-<arch>.AppImage in the working directory; a present copy is never re-downloaded".to_string(),
            ],
            Self::Bundler(PipelineError::ChecksumMismatch { .. }) => vec![
                "Update `linuxdeploy-sha256` in [package.metadata.appimage] if the release changed".to_string(),
            ],
            Self::Bundler(PipelineError::MissingAsset { path }) => {
                vec![format!("Create {} or fix the data directory setting", path.display())]
            }
            Self::Bundler(PipelineError::ArtifactMultiplicity { pattern, .. }) => vec![
                format!("Remove files matching `{pattern}` left over from other runs"),
                "Check `product-name` matches the desktop entry's Name".to_string(),
            ],
            Self::Cli(_) | Self::Toml(_) => {
                vec!["Check [package.metadata.appimage] in Cargo.toml".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Process exit code for this error.
    ///
    /// A failing external program's own exit code is passed through.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Bundler(PipelineError::CommandFailed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }
}
