//! Error types for the AppImage assembly pipeline.
//!
//! Every failure in the pipeline is fatal. The variants group into the four
//! families the pipeline can hit: filesystem, subprocess, network and
//! artifact multiplicity.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while assembling an AppImage.
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form error, usually produced by [`bail!`](crate::bail) or [`Context`].
    #[error("{0}")]
    GenericError(String),

    /// IO error without path information.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Filesystem operation failed on a known path.
    #[error("{context} `{}`: {error}", path.display())]
    Fs {
        /// What the pipeline was doing.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: io::Error,
    },

    /// A required input asset is missing.
    #[error("required asset not found: {}", path.display())]
    MissingAsset {
        /// Expected location of the asset.
        path: PathBuf,
    },

    /// An external program could not be located or spawned.
    #[error("`{program}` could not be started: {reason}")]
    ToolNotFound {
        /// Program name or path.
        program: String,
        /// Why it could not be started.
        reason: String,
    },

    /// An external program exited unsuccessfully.
    #[error("`{program}` failed with exit code {}", code.map_or_else(|| "<signal>".to_string(), |c| c.to_string()))]
    CommandFailed {
        /// Program name.
        program: String,
        /// Exit code, `None` if killed by a signal.
        code: Option<i32>,
    },

    /// Downloading a tool failed.
    #[error("download of {url} failed: {reason}")]
    Download {
        /// URL being fetched.
        url: String,
        /// Failure description.
        reason: String,
    },

    /// A downloaded file did not match its pinned checksum.
    #[error("SHA-256 mismatch for {}: expected {expected}, got {actual}", path.display())]
    ChecksumMismatch {
        /// File that was verified.
        path: PathBuf,
        /// Pinned digest.
        expected: String,
        /// Computed digest.
        actual: String,
    },

    /// The final artifact search did not find exactly one file.
    #[error("expected exactly one file matching `{pattern}`, found {}", matches.len())]
    ArtifactMultiplicity {
        /// Glob pattern searched.
        pattern: String,
        /// Every path that matched.
        matches: Vec<PathBuf>,
    },

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Glob iteration hit an unreadable path.
    #[error("glob error: {0}")]
    GlobIter(#[from] glob::GlobError),
}

/// Attach a message to an `Option` or a foreign `Result`.
pub trait Context<T> {
    /// Converts `None` / `Err` into [`Error::GenericError`] carrying `context`.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Attach the operation and path to an IO failure.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_context_becomes_generic_error() {
        let missing: Option<u8> = None;
        let err = missing.context("no main binary").unwrap_err();
        assert_eq!(err.to_string(), "no main binary");
    }

    #[test]
    fn fs_context_names_operation_and_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res.fs_context("removing old AppDir", "/tmp/x.AppDir").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("removing old AppDir `/tmp/x.AppDir`"), "{msg}");
        assert!(msg.contains("denied"));
    }

    #[test]
    fn command_failed_reports_signal() {
        let err = Error::CommandFailed {
            program: "strip".into(),
            code: None,
        };
        assert_eq!(err.to_string(), "`strip` failed with exit code <signal>");
    }

    fn bails() -> Result<()> {
        crate::bail!("unsupported architecture: {}", "riscv64");
    }

    #[test]
    fn bail_returns_generic_error() {
        match bails() {
            Err(Error::GenericError(msg)) => assert_eq!(msg, "unsupported architecture: riscv64"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
