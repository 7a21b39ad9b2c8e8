//! External program execution.
//!
//! Every subprocess the pipeline starts (cargo, strip, linuxdeploy) is
//! described by a [`ToolInvocation`] and executed through a [`ToolRunner`], so
//! the pipeline can be driven by fake tools in tests.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::{OsStr, OsString},
    future::Future,
    path::{Path, PathBuf},
};

/// A single external program call.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// Program name (looked up in `PATH`) or path.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<OsString>,
    /// Working directory of the child.
    pub current_dir: PathBuf,
    /// Extra environment variables.
    pub envs: Vec<(OsString, OsString)>,
}

impl ToolInvocation {
    /// Creates an invocation of `program` running in `current_dir`.
    pub fn new(program: impl Into<PathBuf>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
            envs: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Appends `--name=<path>`.
    pub fn path_flag(mut self, name: &str, path: &Path) -> Self {
        let mut flag = OsString::from(format!("--{name}="));
        flag.push(path.as_os_str());
        self.args.push(flag);
        self
    }

    /// Sets an environment variable for the child.
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    /// Short program name for messages, e.g. `strip` for `/usr/bin/strip`.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Arguments as lossy strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Shell-like rendering for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of a finished external program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// Exit code, `None` if the child was terminated by a signal.
    pub code: Option<i32>,
}

impl ToolStatus {
    /// Status of a child that exited with `code`.
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Whether the child exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs external programs to completion.
pub trait ToolRunner: Send + Sync {
    /// Runs the invocation and waits for it to exit.
    ///
    /// A non-zero exit is reported through [`ToolStatus`], not as an error;
    /// errors mean the program could not be started at all.
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<ToolStatus>> + Send;
}

/// Runs an invocation and turns a non-zero exit into [`Error::CommandFailed`].
pub async fn run_checked<R: ToolRunner>(runner: &R, invocation: &ToolInvocation) -> Result<()> {
    log::debug!("Running: {}", invocation.command_line());

    let status = runner.run(invocation).await?;
    if !status.success() {
        return Err(Error::CommandFailed {
            program: invocation.program_name(),
            code: status.code,
        });
    }
    Ok(())
}

/// [`ToolRunner`] spawning real child processes.
///
/// Children inherit stdout and stderr so tool output reaches the user.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Creates a runner.
    pub fn new() -> Self {
        Self
    }

    /// Resolves bare program names through `PATH`.
    fn resolve(program: &Path) -> Result<PathBuf> {
        if program.components().count() > 1 {
            return Ok(program.to_path_buf());
        }
        which::which(program).map_err(|e| Error::ToolNotFound {
            program: program.to_string_lossy().into_owned(),
            reason: format!("not found in PATH ({e})"),
        })
    }
}

impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolStatus> {
        let program = Self::resolve(&invocation.program)?;

        let status = tokio::process::Command::new(&program)
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k, v)))
            .current_dir(&invocation.current_dir)
            .status()
            .await
            .map_err(|e| Error::ToolNotFound {
                program: program.to_string_lossy().into_owned(),
                reason: e.to_string(),
            })?;

        Ok(status.into())
    }
}
