// Copyright 2026 Oxide Computer Company

//! Stamping the resolved version into the spec file.

use crate::{InjectError, write::write_atomic};
use camino::Utf8Path;
use fs_err as fs;
use regex::Regex;
use std::{io, sync::LazyLock};
use tracing::{info, warn};

/// The `info.version` line of the spec file: exactly two spaces of
/// indentation, as emitted for the `info` block.
static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^(?P<prefix>  version: )(?P<value>.+)$")
        .expect("valid regex")
});

/// The result of replacing the version line in spec file contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// The first version line was rewritten.
    Replaced {
        /// The new contents.
        content: String,
        /// The value that was replaced.
        previous: String,
    },
    /// The first version line already carries the requested version.
    AlreadySet,
    /// No version line was found.
    NotFound,
}

/// Replaces the value of the first `  version: ` line in `content` with
/// `version`.
///
/// Only the first match is touched; every other byte, including line
/// endings, is preserved. `version` is inserted literally.
pub fn replace_version(content: &str, version: &str) -> Replacement {
    let Some(value) =
        VERSION_LINE.captures(content).and_then(|caps| caps.name("value"))
    else {
        return Replacement::NotFound;
    };
    if value.as_str() == version {
        return Replacement::AlreadySet;
    }

    let mut new = String::with_capacity(content.len() + version.len());
    new.push_str(&content[..value.start()]);
    new.push_str(version);
    new.push_str(&content[value.end()..]);
    Replacement::Replaced { content: new, previous: value.as_str().to_owned() }
}

/// What [`inject_version`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InjectOutcome {
    /// The spec file was rewritten.
    Updated {
        /// The version the file carried before.
        previous: String,
    },
    /// The spec file already carried the version; it was not written.
    Unchanged,
    /// The spec file has no version line; it was not written.
    PatternNotFound,
    /// The spec file does not exist.
    SpecMissing,
}

/// Rewrites the version line of the spec file at `spec_path`.
///
/// A missing spec file or a missing version line is reported through the
/// returned [`InjectOutcome`] rather than as an error, so the build is not
/// blocked. The file is only written when its contents change.
pub fn inject_version(
    spec_path: &Utf8Path,
    version: &str,
) -> Result<InjectOutcome, InjectError> {
    if version.is_empty() || version.contains(['\n', '\r']) {
        return Err(InjectError::InvalidVersion { version: version.to_owned() });
    }

    let content = match fs::read_to_string(spec_path) {
        Ok(content) => content,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            warn!(
                path = %spec_path,
                "spec file not found, skipping version update"
            );
            return Ok(InjectOutcome::SpecMissing);
        }
        Err(error) => {
            return Err(InjectError::Read { path: spec_path.to_owned(), error });
        }
    };

    match replace_version(&content, version) {
        Replacement::Replaced { content, previous } => {
            write_atomic(spec_path, content.as_bytes()).map_err(|error| {
                InjectError::Write { path: spec_path.to_owned(), error }
            })?;
            info!(
                path = %spec_path,
                %previous,
                %version,
                "updated spec version"
            );
            Ok(InjectOutcome::Updated { previous })
        }
        Replacement::AlreadySet => {
            info!(path = %spec_path, %version, "spec version already set");
            Ok(InjectOutcome::Unchanged)
        }
        Replacement::NotFound => {
            warn!(path = %spec_path, "no version line found in spec file");
            Ok(InjectOutcome::PatternNotFound)
        }
    }
}
