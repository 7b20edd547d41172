// Copyright 2026 Oxide Computer Company

//! Read firmware version information from version control.
//!
//! This crate runs the VCS binary to describe the current commit
//! (`git describe --tags --always`) and to read its abbreviated hash
//! (`git rev-parse --short HEAD`), and parses the output into
//! [`fw_version`] types.
//!
//! # Usage
//!
//! ```no_run
//! use fw_version_vcs::Vcs;
//!
//! let vcs = Vcs::git().expect("$GIT is valid UTF-8");
//!
//! // Commands run in the given directory, which may be anywhere inside the
//! // working tree.
//! let describe = vcs.describe("esp32").expect("git describe succeeded");
//! let hash = vcs.short_hash("esp32").expect("git rev-parse succeeded");
//! println!("{} ({hash})", describe.version());
//! ```

#![deny(missing_docs)]

mod errors;
mod vcs;

pub use errors::{VcsCommandError, VcsEnvError};
pub use vcs::{Vcs, VcsName, VcsOperation};
