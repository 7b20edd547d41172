// Copyright 2026 Oxide Computer Company

//! Tests for documentation staging.

use crate::helpers::{Fixture, snapshot, write_file};
use anyhow::Result;
use camino::Utf8PathBuf;
use fw_prebuild::{StageError, stage_docs};
use std::{
    fs,
    time::{Duration, SystemTime},
};

#[test]
fn test_stage_copies_manifest() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?;
    let report = stage_docs(&fixture.layout)?;

    let expected: Vec<Utf8PathBuf> = [
        "README.md",
        "api.md",
        "setup.md",
        "diagrams/a.svg",
        "diagrams/b.svg",
        "images/screenshot.png",
    ]
    .into_iter()
    .map(Utf8PathBuf::from)
    .collect();
    assert_eq!(report.files, expected, "files staged in manifest order");
    assert_eq!(report.len(), 6);
    assert_eq!(report.staging_dir, fixture.layout.staging_dir());

    let staged = snapshot(&report.staging_dir)?;
    let names: Vec<_> = staged.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        [
            "README.md",
            "api.md",
            "diagrams/",
            "diagrams/a.svg",
            "diagrams/b.svg",
            "images/",
            "images/screenshot.png",
            "setup.md",
        ],
        "hidden files, non-matching extensions and subdirectories \
         are not staged"
    );

    Ok(())
}

#[test]
fn test_stage_diagrams_byte_identical() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?;
    let report = stage_docs(&fixture.layout)?;

    for name in ["a.svg", "b.svg"] {
        let src = fs::read(fixture.layout.diagrams_dir().join(name))?;
        let dst = fs::read(report.staging_dir.join("diagrams").join(name))?;
        assert_eq!(src, dst, "diagrams/{name} should match its source");
    }

    Ok(())
}

#[test]
fn test_stage_is_idempotent() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?;

    let first = stage_docs(&fixture.layout)?;
    let before = snapshot(&first.staging_dir)?;
    let second = stage_docs(&fixture.layout)?;
    let after = snapshot(&second.staging_dir)?;

    assert_eq!(first, second);
    assert_eq!(before, after, "second run should produce identical tree");

    Ok(())
}

#[test]
fn test_stage_removes_stale_files() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?;
    let dest = fixture.layout.staging_dir();
    write_file(dest.join("removed-guide.md"), "stale")?;
    write_file(dest.join("diagrams/old.svg"), "stale")?;
    write_file(dest.join("old-dir/file"), "stale")?;

    stage_docs(&fixture.layout)?;

    assert!(!dest.join("removed-guide.md").exists());
    assert!(!dest.join("diagrams/old.svg").exists());
    assert!(!dest.join("old-dir").exists());
    assert!(dest.join("diagrams/a.svg").exists());

    Ok(())
}

#[test]
fn test_stage_replaces_file_at_destination() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?;
    let dest = fixture.layout.staging_dir();
    write_file(&dest, "not a directory")?;

    let report = stage_docs(&fixture.layout)?;
    assert!(dest.is_dir());
    assert_eq!(report.len(), 6);

    Ok(())
}

#[test]
fn test_stage_missing_sources() -> Result<()> {
    let fixture = Fixture::new()?;
    let report = stage_docs(&fixture.layout)?;

    assert!(report.is_empty());
    assert!(report.staging_dir.is_dir(), "staging dir is always created");
    assert!(
        snapshot(&report.staging_dir)?.is_empty(),
        "no subdirectories are created for missing sources"
    );

    Ok(())
}

#[test]
fn test_stage_each_source_is_optional() -> Result<()> {
    let fixture = Fixture::new()?;
    write_file(fixture.repo_root.join("images/logo.png"), b"\x89PNG")?;
    fs::create_dir_all(fixture.layout.diagrams_dir())?;

    let report = stage_docs(&fixture.layout)?;
    assert_eq!(report.files, [Utf8PathBuf::from("images/logo.png")]);
    assert!(
        report.staging_dir.join("diagrams").is_dir(),
        "an existing but empty diagrams directory is mirrored"
    );

    Ok(())
}

#[test]
fn test_stage_preserves_modification_time() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?;
    let readme = fixture.layout.readme_path();
    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
    fs::File::options().write(true).open(&readme)?.set_modified(mtime)?;

    let report = stage_docs(&fixture.layout)?;
    let staged = fs::metadata(report.staging_dir.join("README.md"))?;
    assert_eq!(staged.modified()?, mtime);

    Ok(())
}

#[test]
fn test_stage_unwritable_destination_is_fatal() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?;
    // Replace data/ with a regular file so the staging directory cannot be
    // created beneath it.
    let data_dir = fixture.layout.data_dir();
    fs::remove_dir_all(&data_dir)?;
    write_file(&data_dir, "not a directory")?;

    let err = stage_docs(&fixture.layout).unwrap_err();
    assert!(
        matches!(err, StageError::Clean { .. } | StageError::CreateDir { .. }),
        "unexpected error: {err:?}"
    );

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_stage_read_only_sources() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let fixture = Fixture::new()?.with_docs()?;
    let readme = fixture.layout.readme_path();
    let image = fixture.repo_root.join("images/screenshot.png");
    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
    fs::File::options().write(true).open(&readme)?.set_modified(mtime)?;
    for path in [&readme, &image] {
        fs::set_permissions(path, fs::Permissions::from_mode(0o444))?;
    }

    let report = stage_docs(&fixture.layout)?;
    assert_eq!(report.len(), 6);

    let staged = report.staging_dir.join("README.md");
    let meta = fs::metadata(&staged)?;
    // Root can write regardless of mode bits, so check the bits themselves.
    assert_eq!(meta.permissions().mode() & 0o777, 0o444);
    assert_eq!(meta.modified()?, mtime, "timestamps set on a read-only copy");
    assert_eq!(fs::read(&staged)?, fs::read(&readme)?);

    // Read-only copies from a previous run do not block a rebuild.
    let again = stage_docs(&fixture.layout)?;
    assert_eq!(again, report);

    Ok(())
}
