// Copyright 2026 Oxide Computer Company

//! Parsed `git describe` output.

use crate::{DescribeParseError, ShortHash};
use std::{fmt, str::FromStr};

/// The output of `git describe --tags --always`.
///
/// Construct via [`FromStr`]. Parsing is lenient about the tag itself: any
/// non-whitespace string is a valid tag, including tags that contain
/// hyphens such as `v2.0.0-rc1`.
///
/// # Examples
///
/// ```
/// use fw_version::Describe;
///
/// let exact: Describe = "v2.0.0-rc1".parse().unwrap();
/// assert_eq!(exact.tag(), Some("v2.0.0-rc1"));
/// assert_eq!(exact.distance(), 0);
/// assert_eq!(exact.version(), "2.0.0-rc1");
///
/// let untagged: Describe = "abc1234".parse().unwrap();
/// assert_eq!(untagged.tag(), None);
/// assert_eq!(untagged.version(), "abc1234");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Describe {
    /// The commit is exactly at a tag.
    Tag {
        /// The tag name.
        tag: String,
    },
    /// The commit is some number of commits past the nearest tag.
    Ahead {
        /// The nearest reachable tag.
        tag: String,
        /// The number of commits since `tag`.
        distance: u64,
        /// The abbreviated hash of the current commit.
        hash: ShortHash,
    },
    /// No tag is reachable; only the abbreviated hash is known.
    Untagged {
        /// The abbreviated hash of the current commit.
        hash: ShortHash,
    },
}

impl Describe {
    /// Returns the nearest tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Describe::Tag { tag } | Describe::Ahead { tag, .. } => Some(tag),
            Describe::Untagged { .. } => None,
        }
    }

    /// Returns the number of commits since the nearest tag.
    ///
    /// This is 0 both for exact tags and for untagged commits.
    pub fn distance(&self) -> u64 {
        match self {
            Describe::Ahead { distance, .. } => *distance,
            Describe::Tag { .. } | Describe::Untagged { .. } => 0,
        }
    }

    /// Returns the abbreviated commit hash, if the output contained one.
    ///
    /// An exact tag match does not include a hash.
    pub fn hash(&self) -> Option<&ShortHash> {
        match self {
            Describe::Ahead { hash, .. } | Describe::Untagged { hash } => {
                Some(hash)
            }
            Describe::Tag { .. } => None,
        }
    }

    /// Returns the version string to embed into the firmware.
    ///
    /// This is the describe output with a single leading `v` removed, so
    /// `v1.2.3-5-gabc1234` becomes `1.2.3-5-gabc1234`. A tag named just
    /// `v` is kept as-is so the version is never empty.
    pub fn version(&self) -> String {
        let s = self.to_string();
        match s.strip_prefix('v') {
            Some(rest) if !rest.is_empty() => rest.to_owned(),
            _ => s,
        }
    }
}

impl fmt::Display for Describe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Describe::Tag { tag } => write!(f, "{tag}"),
            Describe::Ahead { tag, distance, hash } => {
                write!(f, "{tag}-{distance}-g{hash}")
            }
            Describe::Untagged { hash } => write!(f, "{hash}"),
        }
    }
}

impl FromStr for Describe {
    type Err = DescribeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DescribeParseError::EmptyInput);
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(DescribeParseError::ContainsWhitespace(
                trimmed.to_owned(),
            ));
        }

        if let Some(ahead) = parse_ahead(trimmed) {
            return Ok(ahead);
        }

        // With --always and no reachable tag, git prints only the hash. A
        // lowercase hex tag is indistinguishable from this, and is treated
        // as a hash.
        if let Some(hash) = parse_git_hash(trimmed) {
            return Ok(Describe::Untagged { hash });
        }

        Ok(Describe::Tag { tag: trimmed.to_owned() })
    }
}

/// Parses the `<tag>-<distance>-g<hash>` form, splitting from the right so
/// that hyphens inside the tag are kept.
fn parse_ahead(s: &str) -> Option<Describe> {
    let (rest, hash) = s.rsplit_once('-')?;
    let hash = parse_git_hash(hash.strip_prefix('g')?)?;
    let (tag, distance) = rest.rsplit_once('-')?;
    if tag.is_empty() || !distance.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let distance = distance.parse::<u64>().ok()?;
    Some(Describe::Ahead { tag: tag.to_owned(), distance, hash })
}

/// Parses a hash as git prints it. Git always emits lowercase hex, so
/// anything with uppercase letters is part of a tag and keeps its case.
fn parse_git_hash(s: &str) -> Option<ShortHash> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        return None;
    }
    s.parse().ok()
}
