// Copyright 2026 Oxide Computer Company

//! Version stamping and documentation staging for firmware filesystem
//! images.
//!
//! Firmware projects ship a read-only filesystem image alongside the
//! application binary. Before the image is built, this crate:
//!
//! 1. Resolves the build version from `git describe`, falling back to the
//!    API spec file and finally to `0.0.0` ([`VersionResolver`]).
//! 2. Records the version, either by rewriting the spec file's `version:`
//!    line ([`inject_version`]) or by writing a `version.json` descriptor
//!    ([`write_descriptor`]).
//! 3. Rebuilds the documentation staging directory from the repository's
//!    readme, docs, diagrams and images ([`stage_docs`]).
//!
//! [`Pipeline`] runs all three steps; the `fw-prebuild` binary wraps it for
//! use as a pre-build hook.
//!
//! # Usage
//!
//! ```no_run
//! use fw_prebuild::{EmissionMode, Pipeline, StageLayout};
//!
//! // The repository root defaults to the parent of the project directory.
//! let layout = StageLayout::discover("esp32").expect("project dir exists");
//! let report = Pipeline::new(layout)
//!     .with_mode(EmissionMode::SpecInjection)
//!     .run()
//!     .expect("pre-build steps succeeded");
//! println!("staged {} files", report.staged.len());
//! ```

#![deny(missing_docs)]

mod descriptor;
mod errors;
mod inject;
mod layout;
mod pipeline;
mod resolve;
mod stage;
mod write;

pub use descriptor::{BUILD_TIME_FORMAT, VersionInfo, write_descriptor};
pub use errors::{
    AtomicWriteError, DescriptorError, FallbackReason, InjectError,
    LayoutError, PipelineError, StageError,
};
pub use inject::{InjectOutcome, Replacement, inject_version, replace_version};
pub use layout::StageLayout;
pub use pipeline::{Emission, EmissionMode, Pipeline, PipelineReport};
pub use resolve::{
    DEFAULT_VERSION, Resolved, UNKNOWN_HASH, VersionResolver, VersionSource,
    read_spec_version, spec_version,
};
pub use stage::{StageReport, stage_docs};
