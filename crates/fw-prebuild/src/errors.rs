// Copyright 2026 Oxide Computer Company

//! Error types for the pre-build pipeline.

use camino::Utf8PathBuf;
use fw_version_vcs::{VcsCommandError, VcsEnvError};
use std::{io, path::PathBuf};
use thiserror::Error;

/// An error that occurs while locating the project and repository roots.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LayoutError {
    /// The project directory could not be resolved to an absolute path.
    #[error("failed to resolve project directory {path}")]
    Canonicalize {
        /// The path that was provided.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// The resolved project directory is not valid UTF-8.
    #[error("project directory {path:?} is not valid UTF-8")]
    NonUtf8 {
        /// The resolved path.
        path: PathBuf,
    },

    /// The project directory has no parent to use as the repository root.
    #[error(
        "project directory {path} has no parent directory \
         (pass the repository root explicitly)"
    )]
    NoParent {
        /// The resolved project directory.
        path: Utf8PathBuf,
    },
}

/// Why a version lookup fell back to a less authoritative source.
///
/// Each variant corresponds to one step of a fallback chain that did not
/// produce a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FallbackReason {
    /// The VCS binary could not be determined from the environment.
    #[error("VCS unavailable: {0}")]
    VcsEnv(VcsEnvError),

    /// The VCS command could not be run or failed.
    #[error("{0}")]
    Vcs(VcsCommandError),

    /// The spec file could not be read.
    #[error("could not read {path}: {error}")]
    SpecUnreadable {
        /// The spec file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        error: io::Error,
    },

    /// The spec file has no `version:` field.
    #[error("no version field found in {path}")]
    SpecFieldMissing {
        /// The spec file path.
        path: Utf8PathBuf,
    },
}

/// An error that occurs while injecting a version into the spec file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InjectError {
    /// The version to inject cannot be written on a single line.
    #[error(
        "refusing to inject version {version:?}: \
         must be a non-empty single line"
    )]
    InvalidVersion {
        /// The rejected version.
        version: String,
    },

    /// Failed to read the spec file.
    #[error("failed to read spec file {path}")]
    Read {
        /// The spec file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Failed to write the updated spec file.
    #[error("failed to write spec file {path}")]
    Write {
        /// The spec file path.
        path: Utf8PathBuf,
        /// The underlying write error.
        #[source]
        error: AtomicWriteError,
    },
}

/// An error that occurs while writing the version descriptor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DescriptorError {
    /// Failed to serialize the descriptor.
    #[error("failed to serialize version descriptor")]
    Serialize(#[source] serde_json::Error),

    /// Failed to create the descriptor's parent directory.
    #[error("failed to create directory {path}")]
    CreateDir {
        /// The directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Failed to write the descriptor.
    #[error("failed to write version descriptor to {path}")]
    Write {
        /// The descriptor path.
        path: Utf8PathBuf,
        /// The underlying write error.
        #[source]
        error: AtomicWriteError,
    },
}

/// An error that occurs while staging documentation.
///
/// Any of these aborts staging: a half-populated staging directory must not
/// be embedded into a filesystem image.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StageError {
    /// Failed to clear the existing staging directory.
    #[error("failed to remove stale staging directory {path}")]
    Clean {
        /// The staging directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Failed to create a directory in the staging tree.
    #[error("failed to create directory {path}")]
    CreateDir {
        /// The directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Failed to list a source directory.
    #[error("failed to list source directory {path}")]
    ReadDir {
        /// The source directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// A source directory contains a file name that is not valid UTF-8.
    #[error("source directory {dir} contains a non-UTF-8 file name {name:?}")]
    NonUtf8FileName {
        /// The source directory.
        dir: Utf8PathBuf,
        /// The file name.
        name: std::ffi::OsString,
    },

    /// Failed to copy a file into the staging tree.
    #[error("failed to copy {src} to {dst}")]
    Copy {
        /// The source file.
        src: Utf8PathBuf,
        /// The destination file.
        dst: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Failed to carry the source timestamps over to a copied file.
    #[error("failed to preserve timestamps of {src} on {dst}")]
    PreserveTimes {
        /// The source file.
        src: Utf8PathBuf,
        /// The destination file.
        dst: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },
}

/// An error from running the whole pre-build pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// Injecting the version into the spec file failed.
    #[error("version injection failed")]
    Inject(#[from] InjectError),

    /// Writing the version descriptor failed.
    #[error("version descriptor emission failed")]
    Descriptor(#[from] DescriptorError),

    /// Staging documentation failed.
    #[error("documentation staging failed")]
    Stage(#[from] StageError),
}

/// An error that occurred during an atomic file write.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AtomicWriteError {
    /// Writing contents to the temporary file failed.
    #[error("writing file contents failed")]
    Write(#[source] io::Error),

    /// The atomic write infrastructure failed (e.g., creating the
    /// temporary file, or renaming it into place).
    #[error("atomic create or rename failed")]
    Rename(#[source] io::Error),
}
