// Copyright 2026 Oxide Computer Company

//! Error types for version parsing.

use thiserror::Error;

/// An error that occurs while parsing a [`ShortHash`](crate::ShortHash).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShortHashParseError {
    /// The hash has an invalid length.
    #[error(
        "invalid length: expected between {min} and {max} hex characters, \
         got {len}",
        min = crate::ShortHash::MIN_LEN,
        max = crate::ShortHash::MAX_LEN,
    )]
    InvalidLength {
        /// The length of the input.
        len: usize,
    },

    /// The hash contains a character that is not hexadecimal.
    #[error("invalid hexadecimal character {ch:?} at index {index}")]
    InvalidHex {
        /// The offending character.
        ch: char,
        /// The byte offset of the character.
        index: usize,
    },
}

/// An error that occurs while parsing a [`Describe`](crate::Describe).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DescribeParseError {
    /// The input was empty or contained only whitespace.
    #[error("describe output is empty")]
    EmptyInput,

    /// The input contained interior whitespace, which neither tags nor
    /// hashes may contain.
    #[error("describe output {0:?} contains whitespace")]
    ContainsWhitespace(String),
}
