// Copyright 2026 Oxide Computer Company

//! Locations of the inputs and outputs of the pre-build pipeline.

use crate::LayoutError;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;

/// The on-disk layout of a firmware project inside its repository.
///
/// The firmware project (e.g. `esp32/`) lives one level below the
/// repository root. Generated files go under the project's `data/`
/// directory, which is packed into the filesystem image; documentation
/// sources live at the repository root.
///
/// ```text
/// <repo_root>/
///   README.md
///   docs/*.md
///   docs/diagrams/*.svg
///   images/*
///   <project_dir>/
///     data/openapi.yaml     (spec file)
///     data/version.json     (version descriptor)
///     data/docs/            (staging directory)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageLayout {
    project_dir: Utf8PathBuf,
    repo_root: Utf8PathBuf,
}

impl StageLayout {
    /// Resolves `project_dir` to an absolute path and uses its parent as
    /// the repository root.
    pub fn discover(
        project_dir: impl AsRef<Utf8Path>,
    ) -> Result<Self, LayoutError> {
        let project_dir = canonicalize(project_dir.as_ref())?;
        let repo_root = project_dir
            .parent()
            .ok_or_else(|| LayoutError::NoParent { path: project_dir.clone() })?
            .to_owned();
        Ok(StageLayout { project_dir, repo_root })
    }

    /// Resolves both directories to absolute paths, without assuming any
    /// relationship between them.
    pub fn discover_with_repo_root(
        project_dir: impl AsRef<Utf8Path>,
        repo_root: impl AsRef<Utf8Path>,
    ) -> Result<Self, LayoutError> {
        Ok(StageLayout {
            project_dir: canonicalize(project_dir.as_ref())?,
            repo_root: canonicalize(repo_root.as_ref())?,
        })
    }

    /// Creates a layout from paths that are used as-is.
    pub fn new(
        project_dir: impl Into<Utf8PathBuf>,
        repo_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        StageLayout {
            project_dir: project_dir.into(),
            repo_root: repo_root.into(),
        }
    }

    /// The firmware project directory.
    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    /// The repository root holding the documentation sources.
    pub fn repo_root(&self) -> &Utf8Path {
        &self.repo_root
    }

    /// The directory packed into the filesystem image.
    pub fn data_dir(&self) -> Utf8PathBuf {
        self.project_dir.join("data")
    }

    /// The API spec file whose `version:` field is stamped.
    pub fn spec_path(&self) -> Utf8PathBuf {
        self.data_dir().join("openapi.yaml")
    }

    /// The standalone version descriptor.
    pub fn descriptor_path(&self) -> Utf8PathBuf {
        self.data_dir().join("version.json")
    }

    /// The documentation staging directory.
    pub fn staging_dir(&self) -> Utf8PathBuf {
        self.data_dir().join("docs")
    }

    /// The repository readme.
    pub fn readme_path(&self) -> Utf8PathBuf {
        self.repo_root.join("README.md")
    }

    /// The markdown documentation directory.
    pub fn docs_dir(&self) -> Utf8PathBuf {
        self.repo_root.join("docs")
    }

    /// The SVG diagrams directory.
    pub fn diagrams_dir(&self) -> Utf8PathBuf {
        self.docs_dir().join("diagrams")
    }

    /// The images referenced by the readme.
    pub fn images_dir(&self) -> Utf8PathBuf {
        self.repo_root.join("images")
    }
}

fn canonicalize(path: &Utf8Path) -> Result<Utf8PathBuf, LayoutError> {
    let canonical = fs::canonicalize(path).map_err(|error| {
        LayoutError::Canonicalize { path: path.to_owned(), error }
    })?;
    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|path| LayoutError::NonUtf8 { path })
}
