// Copyright 2026 Oxide Computer Company

//! Error types for VCS operations.

use crate::{VcsName, VcsOperation};
use camino::Utf8PathBuf;
use fw_version::{DescribeParseError, ShortHashParseError};
use std::{ffi::OsString, io};
use thiserror::Error;

/// An error from reading a VCS binary path from the environment.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum VcsEnvError {
    /// The environment variable is set but is not valid UTF-8.
    #[error(
        "${var} environment variable is not valid \
         UTF-8: {value:?}"
    )]
    NonUtf8 {
        /// The environment variable name.
        var: &'static str,
        /// The non-UTF-8 value.
        value: OsString,
    },
}

/// An error that occurs while running a VCS command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VcsCommandError {
    /// Failed to spawn the VCS process (typically because the binary is not
    /// installed).
    #[error(
        "failed to run {vcs_name} at {binary_path:?} in {dir} \
         to {operation}"
    )]
    SpawnFailed {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The operation being attempted.
        operation: VcsOperation,
        /// The path to the VCS executable.
        binary_path: String,
        /// The working directory where the command was run.
        dir: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The VCS command exited unsuccessfully.
    #[error("{vcs_name} failed to {operation} ({exit_status}): {stderr}")]
    VcsFailed {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The operation being attempted.
        operation: VcsOperation,
        /// A human-readable description of the exit status (e.g.,
        /// "exit status: 128").
        exit_status: String,
        /// The stderr output from the VCS.
        stderr: String,
    },

    /// `git describe` succeeded but printed something unparseable.
    #[error("{vcs_name} returned unexpected describe output {stdout:?}")]
    InvalidDescribe {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The stdout content that could not be parsed.
        stdout: String,
        /// The parse error.
        #[source]
        error: DescribeParseError,
    },

    /// `git rev-parse --short` succeeded but printed something that is not
    /// an abbreviated hash.
    #[error("{vcs_name} returned unexpected commit hash {stdout:?}")]
    InvalidHash {
        /// The name of the VCS.
        vcs_name: VcsName,
        /// The stdout content that could not be parsed.
        stdout: String,
        /// The parse error.
        #[source]
        error: ShortHashParseError,
    },
}

impl VcsCommandError {
    /// Returns true if the VCS binary could not be started at all.
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, VcsCommandError::SpawnFailed { .. })
    }
}
