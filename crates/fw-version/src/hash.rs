// Copyright 2026 Oxide Computer Company

//! Abbreviated commit hashes.

use crate::ShortHashParseError;
use std::{fmt, str::FromStr};

/// An abbreviated Git commit hash, as printed by `git rev-parse --short` or
/// embedded in `git describe` output.
///
/// This type guarantees the contained value is between
/// [`MIN_LEN`](Self::MIN_LEN) and [`MAX_LEN`](Self::MAX_LEN) lowercase hex
/// characters. Uppercase input is accepted and normalized.
///
/// ```
/// use fw_version::ShortHash;
///
/// let hash: ShortHash = "ABC1234".parse().unwrap();
/// assert_eq!(hash.as_str(), "abc1234");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortHash(String);

impl ShortHash {
    /// The shortest abbreviation Git will produce (`core.abbrev` minimum).
    pub const MIN_LEN: usize = 4;

    /// The length of a full SHA-256 object name.
    pub const MAX_LEN: usize = 64;

    /// Returns the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ShortHash {
    type Err = ShortHashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.len();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(ShortHashParseError::InvalidLength { len });
        }
        if let Some((index, ch)) =
            s.char_indices().find(|(_, ch)| !ch.is_ascii_hexdigit())
        {
            return Err(ShortHashParseError::InvalidHex { ch, index });
        }
        Ok(ShortHash(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for ShortHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
