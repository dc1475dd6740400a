// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running git commands
//!
//! All repository access goes through the [`Runner`] trait so the aggregation
//! logic can be driven by a scripted runner in tests. [`ShellRunner`] is the
//! real implementation that spawns the `git` binary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::GitError;

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status (-1 when the process was terminated by a signal)
    pub status: i32,
    /// Stdout, decoded as UTF-8 (lossy) and trimmed
    pub stdout: String,
    /// Stderr, decoded as UTF-8 (lossy) and trimmed
    pub stderr: String,
}

impl CommandOutput {
    /// Check if the command exited successfully
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Executes git with a list of arguments
pub trait Runner: fmt::Debug + Send + Sync {
    /// Run git with `args` and capture its output.
    ///
    /// Implementations report a non-zero exit through
    /// [`CommandOutput::status`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Spawn` if the process cannot be started.
    fn execute(&self, args: &[String]) -> Result<CommandOutput, GitError>;
}

/// Runs the `git` binary inside a working directory
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: String,
    workdir: PathBuf,
}

impl ShellRunner {
    /// Create a runner for `git` in `workdir`
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: "git".to_string(),
            workdir: workdir.into(),
        }
    }

    /// Use a different git executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// The directory commands run in
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl Runner for ShellRunner {
    fn execute(&self, args: &[String]) -> Result<CommandOutput, GitError> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                command: command_line(&self.program, args),
                source,
            })?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Cheap, cloneable handle for issuing git commands
#[derive(Debug, Clone)]
pub struct Git {
    runner: Arc<dyn Runner>,
}

impl Git {
    /// Wrap an arbitrary runner
    pub fn new(runner: impl Runner + 'static) -> Self {
        Self {
            runner: Arc::new(runner),
        }
    }

    /// Run the system `git` inside `workdir`
    pub fn open(workdir: impl Into<PathBuf>) -> Self {
        Self::new(ShellRunner::new(workdir))
    }

    /// Run a git command.
    ///
    /// With `fail_on_error`, a non-zero exit becomes `GitError::CommandFailed`.
    /// Without it, the output is returned as-is and the caller inspects
    /// [`CommandOutput::status`].
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the command cannot be spawned, or exits non-zero
    /// while `fail_on_error` is set.
    pub fn run<I, S>(&self, args: I, fail_on_error: bool) -> Result<CommandOutput, GitError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        debug!(command = %command_line("git", &args), "Running git");

        let output = self.runner.execute(&args)?;
        if fail_on_error && !output.success() {
            return Err(GitError::CommandFailed {
                command: command_line("git", &args),
                status: output.status,
                stderr: output.stderr,
            });
        }
        Ok(output)
    }

    /// Run a git command that must succeed and return its trimmed stdout
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the command fails.
    pub fn stdout<I, S>(&self, args: I) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(args, true).map(|output| output.stdout)
    }

    /// The top-level directory of the working tree
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the working directory is not inside a repository.
    pub fn toplevel(&self) -> Result<PathBuf, GitError> {
        self.stdout(["rev-parse", "--show-toplevel"])
            .map(PathBuf::from)
    }

    /// The name of the checked-out branch
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be resolved.
    pub fn current_branch(&self) -> Result<String, GitError> {
        self.stdout(["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// The URL of a configured remote
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the remote does not exist.
    pub fn remote_url(&self, remote: &str) -> Result<String, GitError> {
        self.stdout(["remote", "get-url", remote])
    }

    /// Fetch all remotes, best-effort.
    ///
    /// A failed fetch (offline, no credentials) is logged and otherwise
    /// ignored so ranges can still be computed from local history.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Spawn` only if git itself cannot be run.
    pub fn fetch(&self) -> Result<(), GitError> {
        let output = self.run(["--no-pager", "fetch", "-q"], false)?;
        if !output.success() {
            warn!(status = output.status, stderr = %output.stderr, "git fetch failed");
        }
        Ok(())
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
