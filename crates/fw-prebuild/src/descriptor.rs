// Copyright 2026 Oxide Computer Company

//! The standalone version descriptor (`version.json`).

use crate::{DescriptorError, write::write_atomic};
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The `build_time` format: minute precision, always UTC.
pub const BUILD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Version metadata for one firmware build.
///
/// Recomputed on every build and never read back by this crate; the device
/// serves it as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// The firmware version (e.g. `1.2.3-5-gabc1234`).
    pub version: String,
    /// The abbreviated commit hash, or `unknown`.
    pub git_hash: String,
    /// When the build ran, formatted with [`BUILD_TIME_FORMAT`].
    pub build_time: String,
}

impl VersionInfo {
    /// Creates version metadata stamped with `build_time`.
    pub fn new(
        version: impl Into<String>,
        git_hash: impl Into<String>,
        build_time: DateTime<Utc>,
    ) -> Self {
        VersionInfo {
            version: version.into(),
            git_hash: git_hash.into(),
            build_time: build_time.format(BUILD_TIME_FORMAT).to_string(),
        }
    }
}

/// Writes `info` as JSON to `path`, replacing any previous descriptor.
pub fn write_descriptor(
    path: &Utf8Path,
    info: &VersionInfo,
) -> Result<(), DescriptorError> {
    let json = serde_json::to_vec(info).map_err(DescriptorError::Serialize)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            DescriptorError::CreateDir { path: parent.to_owned(), error }
        })?;
    }

    write_atomic(path, &json).map_err(|error| DescriptorError::Write {
        path: path.to_owned(),
        error,
    })?;

    info!(
        %path,
        "generated version descriptor: v{} ({}) built {}",
        info.version,
        info.git_hash,
        info.build_time,
    );
    Ok(())
}
