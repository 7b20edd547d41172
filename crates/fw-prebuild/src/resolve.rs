// Copyright 2026 Oxide Computer Company

//! Best-effort version resolution with explicit fallbacks.

use crate::{FallbackReason, StageLayout, VersionInfo};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use fs_err as fs;
use fw_version_vcs::{Vcs, VcsEnvError};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, warn};

/// The version used when neither the VCS nor the spec file provide one.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// The commit hash used when the VCS cannot provide one.
pub const UNKNOWN_HASH: &str = "unknown";

/// The first indented `version:` field in the spec file.
static SPEC_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^\s+version:\s+(.+)$").expect("valid regex")
});

/// Where a resolved value came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VersionSource {
    /// Version control.
    Vcs,
    /// The `version:` field of the spec file.
    SpecFile {
        /// The spec file path.
        path: Utf8PathBuf,
    },
    /// A built-in default.
    Default,
}

/// A value together with how it was obtained.
///
/// `fallbacks` lists, in order, every more authoritative source that was
/// tried and did not produce a value. It is empty when the primary source
/// succeeded.
#[derive(Debug)]
pub struct Resolved<T> {
    /// The resolved value.
    pub value: T,
    /// The source that produced `value`.
    pub source: VersionSource,
    /// Why earlier sources were skipped.
    pub fallbacks: Vec<FallbackReason>,
}

impl<T> Resolved<T> {
    fn primary(value: T) -> Self {
        Resolved { value, source: VersionSource::Vcs, fallbacks: Vec::new() }
    }

    /// Returns true if any fallback fired.
    pub fn is_fallback(&self) -> bool {
        !self.fallbacks.is_empty()
    }

    /// Logs each fallback that fired, naming what was being resolved.
    pub fn log_fallbacks(&self, what: &str) {
        for reason in &self.fallbacks {
            warn!(what, reason = %reason, "falling back");
        }
    }
}

/// Resolves the firmware version and commit hash.
///
/// Resolution never fails: each lookup degrades to a less authoritative
/// source, and the returned [`Resolved`] records which fallbacks fired.
#[derive(Debug)]
pub struct VersionResolver {
    vcs: Result<Vcs, VcsEnvError>,
}

impl VersionResolver {
    /// Creates a resolver that runs git, honoring `$GIT`.
    ///
    /// An invalid `$GIT` is not an error here; it is reported as a fallback
    /// reason on every lookup.
    pub fn from_env() -> Self {
        VersionResolver { vcs: Vcs::git() }
    }

    /// Creates a resolver that uses the given VCS.
    pub fn new(vcs: Vcs) -> Self {
        VersionResolver { vcs: Ok(vcs) }
    }

    /// Resolves the version string.
    ///
    /// In order of preference:
    ///
    /// 1. `git describe --tags --always` in `dir`, with a leading `v`
    ///    stripped.
    /// 2. The `version:` field of the spec file.
    /// 3. [`DEFAULT_VERSION`].
    pub fn version(
        &self,
        dir: &Utf8Path,
        spec_path: &Utf8Path,
    ) -> Resolved<String> {
        let vcs_reason = match &self.vcs {
            Ok(vcs) => match vcs.describe(dir) {
                Ok(describe) => return Resolved::primary(describe.version()),
                Err(error) => FallbackReason::Vcs(error),
            },
            Err(error) => FallbackReason::VcsEnv(error.clone()),
        };

        let mut resolved = read_spec_version(spec_path);
        resolved.fallbacks.insert(0, vcs_reason);
        resolved
    }

    /// Resolves the abbreviated commit hash, or [`UNKNOWN_HASH`].
    pub fn short_hash(&self, dir: &Utf8Path) -> Resolved<String> {
        let reason = match &self.vcs {
            Ok(vcs) => match vcs.short_hash(dir) {
                Ok(hash) => return Resolved::primary(hash.to_string()),
                Err(error) => FallbackReason::Vcs(error),
            },
            Err(error) => FallbackReason::VcsEnv(error.clone()),
        };
        Resolved {
            value: UNKNOWN_HASH.to_owned(),
            source: VersionSource::Default,
            fallbacks: vec![reason],
        }
    }

    /// Resolves the full version descriptor for `layout`, logging any
    /// fallbacks.
    pub fn version_info(
        &self,
        layout: &StageLayout,
        build_time: DateTime<Utc>,
    ) -> VersionInfo {
        let dir = layout.project_dir();
        let version = self.version(dir, &layout.spec_path());
        version.log_fallbacks("version");
        let hash = self.short_hash(dir);
        hash.log_fallbacks("git hash");

        let info = VersionInfo::new(version.value, hash.value, build_time);
        info!(
            version = %info.version,
            git_hash = %info.git_hash,
            build_time = %info.build_time,
            "resolved version info"
        );
        info
    }
}

/// Reads the first indented `version:` field of the spec file, or
/// [`DEFAULT_VERSION`].
pub fn read_spec_version(spec_path: &Utf8Path) -> Resolved<String> {
    let reason = match fs::read_to_string(spec_path) {
        Ok(content) => match spec_version(&content) {
            Some(version) => {
                return Resolved {
                    value: version.to_owned(),
                    source: VersionSource::SpecFile {
                        path: spec_path.to_owned(),
                    },
                    fallbacks: Vec::new(),
                };
            }
            None => FallbackReason::SpecFieldMissing {
                path: spec_path.to_owned(),
            },
        },
        Err(error) => FallbackReason::SpecUnreadable {
            path: spec_path.to_owned(),
            error,
        },
    };
    Resolved {
        value: DEFAULT_VERSION.to_owned(),
        source: VersionSource::Default,
        fallbacks: vec![reason],
    }
}

/// Extracts the first indented `version:` value from spec file contents.
pub fn spec_version(content: &str) -> Option<&str> {
    SPEC_VERSION
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
}
