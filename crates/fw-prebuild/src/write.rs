// Copyright 2026 Oxide Computer Company

//! Atomic file replacement.

use crate::AtomicWriteError;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::Utf8Path;
use std::io::Write;

/// Writes `contents` to `path` via a temporary file and rename, so readers
/// never observe a partially written file.
pub(crate) fn write_atomic(
    path: &Utf8Path,
    contents: &[u8],
) -> Result<(), AtomicWriteError> {
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(contents))
        .map_err(|error| match error {
            atomicwrites::Error::Internal(e) => AtomicWriteError::Rename(e),
            atomicwrites::Error::User(e) => AtomicWriteError::Write(e),
        })
}
