// Copyright 2026 Oxide Computer Company

//! Mirroring documentation into the filesystem image staging directory.

use crate::{StageError, StageLayout};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::fs::FileTimes;
use tracing::{debug, info};

/// The files written by [`stage_docs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageReport {
    /// The staging directory.
    pub staging_dir: Utf8PathBuf,
    /// Staged files relative to `staging_dir`, in copy order.
    pub files: Vec<Utf8PathBuf>,
}

impl StageReport {
    /// The number of files copied.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing was copied.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Rebuilds the staging directory from the documentation sources in
/// `layout`.
///
/// The staging directory is removed and recreated, then populated with:
///
/// 1. `README.md` from the repository root.
/// 2. Every `*.md` file directly inside `docs/`.
/// 3. Every `*.svg` file directly inside `docs/diagrams/`, under
///    `diagrams/`.
/// 4. Every file directly inside `images/`, under `images/`.
///
/// Missing sources are skipped. Hidden files are ignored. Copies keep the
/// source's access and modification times. Any I/O failure aborts staging.
pub fn stage_docs(layout: &StageLayout) -> Result<StageReport, StageError> {
    let dest = layout.staging_dir();
    reset_dir(&dest)?;

    let mut files = Vec::new();

    let readme = layout.readme_path();
    if readme.is_file() {
        copy_into(&readme, &dest, Utf8Path::new(""), &mut files)?;
    }

    let docs = layout.docs_dir();
    if docs.is_dir() {
        for src in list_files(&docs, |name| has_extension(name, "md"))? {
            copy_into(&src, &dest, Utf8Path::new(""), &mut files)?;
        }
    }

    let diagrams = layout.diagrams_dir();
    if diagrams.is_dir() {
        create_dir(&dest.join("diagrams"))?;
        for src in list_files(&diagrams, |name| has_extension(name, "svg"))? {
            copy_into(&src, &dest, Utf8Path::new("diagrams"), &mut files)?;
        }
    }

    let images = layout.images_dir();
    if images.is_dir() {
        create_dir(&dest.join("images"))?;
        for src in list_files(&images, |_| true)? {
            copy_into(&src, &dest, Utf8Path::new("images"), &mut files)?;
        }
    }

    info!(count = files.len(), dir = %dest, "copied documentation files");
    Ok(StageReport { staging_dir: dest, files })
}

/// Removes `dir` if it exists and creates it empty.
fn reset_dir(dir: &Utf8Path) -> Result<(), StageError> {
    match fs::symlink_metadata(dir) {
        Ok(meta) => {
            let removed = if meta.is_dir() {
                fs::remove_dir_all(dir)
            } else {
                fs::remove_file(dir)
            };
            removed.map_err(|error| StageError::Clean {
                path: dir.to_owned(),
                error,
            })?;
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
        Err(error) => {
            return Err(StageError::Clean { path: dir.to_owned(), error });
        }
    }
    create_dir(dir)
}

fn create_dir(dir: &Utf8Path) -> Result<(), StageError> {
    fs::create_dir_all(dir)
        .map_err(|error| StageError::CreateDir { path: dir.to_owned(), error })
}

/// Lists the regular, non-hidden files directly inside `dir` whose names
/// satisfy `filter`, sorted by name. Symlinks to files are included.
fn list_files(
    dir: &Utf8Path,
    filter: impl Fn(&str) -> bool,
) -> Result<Vec<Utf8PathBuf>, StageError> {
    let read_dir_err =
        |error| StageError::ReadDir { path: dir.to_owned(), error };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let name = entry.file_name().into_string().map_err(|name| {
            StageError::NonUtf8FileName { dir: dir.to_owned(), name }
        })?;
        if name.starts_with('.') || !filter(&name) {
            continue;
        }
        let path = dir.join(&name);
        if path.is_file() {
            files.push(path);
        } else {
            debug!(%path, "skipping non-file");
        }
    }
    files.sort();
    Ok(files)
}

fn has_extension(name: &str, ext: &str) -> bool {
    Utf8Path::new(name).extension() == Some(ext)
}

/// Copies `src` to `dest/subdir/<file name>`, records the relative path in
/// `files`, and carries over the source timestamps.
fn copy_into(
    src: &Utf8Path,
    dest: &Utf8Path,
    subdir: &Utf8Path,
    files: &mut Vec<Utf8PathBuf>,
) -> Result<(), StageError> {
    // list_files only yields paths that end in a file name.
    let Some(name) = src.file_name() else {
        return Ok(());
    };
    let relative = subdir.join(name);
    let dst = dest.join(&relative);

    fs::copy(src, &dst).map_err(|error| StageError::Copy {
        src: src.to_owned(),
        dst: dst.clone(),
        error,
    })?;
    preserve_times(src, &dst).map_err(|error| StageError::PreserveTimes {
        src: src.to_owned(),
        dst: dst.clone(),
        error,
    })?;

    debug!(%src, %dst, "copied");
    files.push(relative);
    Ok(())
}

fn preserve_times(src: &Utf8Path, dst: &Utf8Path) -> std::io::Result<()> {
    let meta = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    // Not every platform tracks access times.
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    open_for_times(dst)?.file().set_times(times)
}

/// Opens `dst` with just enough access to change its timestamps. The copy
/// already carries the source's permission bits, so it may be read-only.
#[cfg(unix)]
fn open_for_times(dst: &Utf8Path) -> std::io::Result<fs::File> {
    // futimens(2) only needs ownership, not write access.
    fs::File::open(dst)
}

#[cfg(not(unix))]
fn open_for_times(dst: &Utf8Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new().write(true).open(dst)
}
