// Copyright 2026 Oxide Computer Company

//! Version control system abstraction for reading version information.

use crate::{VcsCommandError, VcsEnvError};
use camino::Utf8Path;
use fw_version::{Describe, ShortHash};
use std::{fmt, process::Command};
use tracing::debug;

/// Reads a VCS binary path from an environment variable, falling back
/// to `default` if the variable is unset or empty.
///
/// The value is trimmed of leading and trailing whitespace.
///
/// Returns an error if the variable is set but is not valid UTF-8.
fn read_vcs_env(
    var: &'static str,
    default: &str,
) -> Result<String, VcsEnvError> {
    match std::env::var(var) {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(default.to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(VcsEnvError::NonUtf8 { var, value })
        }
    }
}

/// The name of a version control system.
///
/// Used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum VcsName {
    /// Git version control.
    Git,
}

impl fmt::Display for VcsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsName::Git => write!(f, "git"),
        }
    }
}

/// An operation performed through the VCS, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum VcsOperation {
    /// `git describe --tags --always`.
    Describe,
    /// `git rev-parse --short HEAD`.
    ShortHash,
}

impl fmt::Display for VcsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsOperation::Describe => write!(f, "describe the current commit"),
            VcsOperation::ShortHash => {
                write!(f, "read the current commit hash")
            }
        }
    }
}

/// The version control system used to read version information.
///
/// Use [`Vcs::git()`] to honor the `$GIT` environment variable, or
/// [`Vcs::git_at()`] to name the binary explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vcs {
    name: VcsName,
    binary: String,
}

impl Vcs {
    /// Creates a Git VCS using the `$GIT` environment variable or
    /// `"git"`.
    ///
    /// Returns an error if the `$GIT` environment variable is set
    /// but is not valid UTF-8.
    pub fn git() -> Result<Self, VcsEnvError> {
        let binary = read_vcs_env("GIT", "git")?;
        Ok(Self::git_at(binary))
    }

    /// Creates a Git VCS that runs the given binary.
    pub fn git_at(binary: impl Into<String>) -> Self {
        Vcs { name: VcsName::Git, binary: binary.into() }
    }

    /// Returns the path to the VCS binary.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Returns the name of the VCS.
    pub fn name(&self) -> VcsName {
        self.name
    }

    /// Describes the commit checked out in `dir`.
    ///
    /// Runs `git describe --tags --always`, so lightweight tags are
    /// considered and a bare abbreviated hash is returned when no tag is
    /// reachable.
    pub fn describe(
        &self,
        dir: impl AsRef<Utf8Path>,
    ) -> Result<Describe, VcsCommandError> {
        let stdout = self.run(
            dir.as_ref(),
            VcsOperation::Describe,
            &["describe", "--tags", "--always"],
        )?;
        stdout.parse().map_err(|error| VcsCommandError::InvalidDescribe {
            vcs_name: self.name,
            stdout,
            error,
        })
    }

    /// Returns the abbreviated hash of the commit checked out in `dir`.
    ///
    /// Runs `git rev-parse --short HEAD`.
    pub fn short_hash(
        &self,
        dir: impl AsRef<Utf8Path>,
    ) -> Result<ShortHash, VcsCommandError> {
        let stdout = self.run(
            dir.as_ref(),
            VcsOperation::ShortHash,
            &["rev-parse", "--short", "HEAD"],
        )?;
        stdout.parse().map_err(|error| VcsCommandError::InvalidHash {
            vcs_name: self.name,
            stdout,
            error,
        })
    }

    /// Runs the VCS binary with `args` in `dir` and returns its trimmed
    /// stdout.
    fn run(
        &self,
        dir: &Utf8Path,
        operation: VcsOperation,
        args: &[&str],
    ) -> Result<String, VcsCommandError> {
        debug!(binary = %self.binary, ?args, %dir, "running vcs command");

        let output = Command::new(&self.binary)
            .current_dir(dir)
            .args(args)
            .output()
            .map_err(|source| VcsCommandError::SpawnFailed {
                vcs_name: self.name,
                operation,
                binary_path: self.binary.clone(),
                dir: dir.to_owned(),
                source,
            })?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Ok(stdout.trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(VcsCommandError::VcsFailed {
                vcs_name: self.name,
                operation,
                exit_status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}
