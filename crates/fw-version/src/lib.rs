// Copyright 2026 Oxide Computer Company

//! Parsing types for firmware build versions.
//!
//! Firmware images carry a version string derived from version control at
//! build time. The canonical source is the output of
//! `git describe --tags --always`, which takes one of three shapes:
//!
//! - `v1.2.3`: the current commit is exactly at a tag.
//! - `v1.2.3-5-gabc1234`: the current commit is 5 commits past the tag
//!   `v1.2.3`, at abbreviated hash `abc1234`.
//! - `abc1234`: no tag is reachable, so only the abbreviated hash is
//!   printed.
//!
//! The main entry point is [`Describe`].
//!
//! # Examples
//!
//! ```
//! use fw_version::Describe;
//!
//! let describe: Describe = "v1.2.3-5-gabc1234\n".parse().unwrap();
//! assert_eq!(describe.tag(), Some("v1.2.3"));
//! assert_eq!(describe.distance(), 5);
//! assert_eq!(describe.hash().unwrap().as_str(), "abc1234");
//!
//! // The version embedded into the firmware drops the leading `v`.
//! assert_eq!(describe.version(), "1.2.3-5-gabc1234");
//! ```
//!
//! # Related crates
//!
//! To run `git describe` and friends, see `fw-version-vcs`.

#![deny(missing_docs)]

mod describe;
mod errors;
mod hash;

pub use describe::Describe;
pub use errors::{DescribeParseError, ShortHashParseError};
pub use hash::ShortHash;
