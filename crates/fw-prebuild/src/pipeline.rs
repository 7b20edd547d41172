// Copyright 2026 Oxide Computer Company

//! The pre-build hook: version emission followed by documentation staging.

use crate::{
    InjectOutcome, PipelineError, StageLayout, StageReport, VersionInfo,
    VersionResolver, inject_version, stage_docs, write_descriptor,
};
use camino::Utf8PathBuf;
use chrono::Utc;
use std::{fmt, str::FromStr};

/// How the resolved version is recorded in the filesystem image.
///
/// Exactly one mode runs per build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmissionMode {
    /// Rewrite the `version:` line of the spec file in place.
    #[default]
    SpecInjection,
    /// Write a standalone `version.json` descriptor.
    Descriptor,
}

impl fmt::Display for EmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionMode::SpecInjection => write!(f, "spec"),
            EmissionMode::Descriptor => write!(f, "descriptor"),
        }
    }
}

impl FromStr for EmissionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spec" => Ok(EmissionMode::SpecInjection),
            "descriptor" => Ok(EmissionMode::Descriptor),
            other => Err(format!(
                "unknown emission mode {other:?} (expected \"spec\" or \
                 \"descriptor\")"
            )),
        }
    }
}

/// What the version emission step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Emission {
    /// The spec file was processed.
    Injected(InjectOutcome),
    /// The descriptor was written to this path.
    Descriptor(Utf8PathBuf),
}

/// The result of a full pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    /// The resolved version metadata.
    pub version: VersionInfo,
    /// What the emission step did.
    pub emission: Emission,
    /// What the staging step copied.
    pub staged: StageReport,
}

/// Runs every pre-build step for one firmware project.
#[derive(Debug)]
pub struct Pipeline {
    layout: StageLayout,
    resolver: VersionResolver,
    mode: EmissionMode,
}

impl Pipeline {
    /// Creates a pipeline for `layout` that runs git from `$GIT`.
    pub fn new(layout: StageLayout) -> Self {
        Pipeline {
            layout,
            resolver: VersionResolver::from_env(),
            mode: EmissionMode::default(),
        }
    }

    /// Overrides the version resolver.
    pub fn with_resolver(mut self, resolver: VersionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Selects how the version is emitted.
    pub fn with_mode(mut self, mode: EmissionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the project layout.
    pub fn layout(&self) -> &StageLayout {
        &self.layout
    }

    /// Returns the version resolver.
    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    /// Returns the emission mode.
    pub fn mode(&self) -> EmissionMode {
        self.mode
    }

    /// Resolves the version metadata for this build.
    pub fn version_info(&self) -> VersionInfo {
        self.resolver.version_info(&self.layout, Utc::now())
    }

    /// Records `version` according to the emission mode.
    pub fn emit(
        &self,
        version: &VersionInfo,
    ) -> Result<Emission, PipelineError> {
        match self.mode {
            EmissionMode::SpecInjection => {
                let outcome =
                    inject_version(&self.layout.spec_path(), &version.version)?;
                Ok(Emission::Injected(outcome))
            }
            EmissionMode::Descriptor => {
                let path = self.layout.descriptor_path();
                write_descriptor(&path, version)?;
                Ok(Emission::Descriptor(path))
            }
        }
    }

    /// Resolves the version, emits it, and stages documentation.
    ///
    /// Version resolution never fails. A missing spec file or version line
    /// is reported in the returned [`Emission`]. Write and staging failures
    /// abort the run.
    pub fn run(&self) -> Result<PipelineReport, PipelineError> {
        let version = self.version_info();
        let emission = self.emit(&version)?;
        let staged = stage_docs(&self.layout)?;
        Ok(PipelineReport { version, emission, staged })
    }
}
