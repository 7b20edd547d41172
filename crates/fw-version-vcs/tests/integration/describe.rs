// Copyright 2026 Oxide Computer Company

//! Tests that run a real `git` against temporary repositories.

use anyhow::Result;
use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use fw_version::Describe;
use fw_version_vcs::{Vcs, VcsCommandError, VcsOperation};
use std::{fs, process::Command};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Returns the git binary, respecting the `$GIT` environment variable.
fn git_binary() -> String {
    std::env::var("GIT").unwrap_or_else(|_| "git".to_string())
}

fn git(repo_root: &Utf8Path, args: &[&str]) -> Result<String> {
    let output =
        Command::new(git_binary()).args(args).current_dir(repo_root).output()?;
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Initializes a git repository, configures the user, and makes one commit.
fn setup_git_repo() -> Result<Utf8TempDir> {
    let temp = Utf8TempDir::with_prefix("fw-version-vcs-")?;
    let repo_root = temp.path();

    git(repo_root, &["init"])?;
    git(repo_root, &["config", "user.email", "test@example.com"])?;
    git(repo_root, &["config", "user.name", "Test User"])?;
    git(repo_root, &["config", "commit.gpgsign", "false"])?;
    git(repo_root, &["config", "tag.gpgsign", "false"])?;
    commit_file(repo_root, "README.md", "# firmware\n")?;

    Ok(temp)
}

fn commit_file(repo_root: &Utf8Path, name: &str, contents: &str) -> Result<()> {
    fs::write(repo_root.join(name), contents)?;
    git(repo_root, &["add", "."])?;
    git(repo_root, &["commit", "-m", &format!("Update {name}")])?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_describe_untagged() -> Result<()> {
    let temp = setup_git_repo()?;
    let vcs = Vcs::git_at(git_binary());

    let describe = vcs.describe(temp.path())?;
    let head = git(temp.path(), &["rev-parse", "--short", "HEAD"])?;
    assert_eq!(
        describe,
        Describe::Untagged { hash: head.parse()? },
        "--always falls back to the abbreviated hash"
    );

    Ok(())
}

#[test]
fn test_describe_exact_tag() -> Result<()> {
    let temp = setup_git_repo()?;
    git(temp.path(), &["tag", "v1.2.3"])?;

    let describe = Vcs::git_at(git_binary()).describe(temp.path())?;
    assert_eq!(describe.tag(), Some("v1.2.3"));
    assert_eq!(describe.version(), "1.2.3");

    Ok(())
}

#[test]
fn test_describe_ahead_of_tag() -> Result<()> {
    let temp = setup_git_repo()?;
    git(temp.path(), &["tag", "v1.2.3"])?;
    commit_file(temp.path(), "a.txt", "a")?;
    commit_file(temp.path(), "b.txt", "b")?;

    let vcs = Vcs::git_at(git_binary());
    let describe = vcs.describe(temp.path())?;
    let hash = vcs.short_hash(temp.path())?;

    assert_eq!(describe.tag(), Some("v1.2.3"));
    assert_eq!(describe.distance(), 2);
    assert_eq!(describe.hash(), Some(&hash));
    assert_eq!(describe.version(), format!("1.2.3-2-g{hash}"));

    Ok(())
}

#[test]
fn test_describe_from_subdirectory() -> Result<()> {
    let temp = setup_git_repo()?;
    git(temp.path(), &["tag", "v0.4.0"])?;
    let subdir = temp.path().join("esp32");
    fs::create_dir(&subdir)?;

    let describe = Vcs::git_at(git_binary()).describe(&subdir)?;
    assert_eq!(describe.version(), "0.4.0");

    Ok(())
}

#[test]
fn test_short_hash_matches_rev_parse() -> Result<()> {
    let temp = setup_git_repo()?;

    let hash = Vcs::git_at(git_binary()).short_hash(temp.path())?;
    let full = git(temp.path(), &["rev-parse", "HEAD"])?;
    assert!(
        full.starts_with(hash.as_str()),
        "{hash} should be a prefix of {full}"
    );

    Ok(())
}

#[test]
fn test_not_a_repository() -> Result<()> {
    let temp = Utf8TempDir::with_prefix("fw-version-vcs-norepo-")?;
    let vcs = Vcs::git_at(git_binary());
    // Git searches parent directories, so a $TMPDIR inside a checkout would
    // be treated as a repository.
    let result = Command::new(git_binary())
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(temp.path())
        .output()?;
    if result.status.success() {
        eprintln!("temp dir is inside a git work tree, skipping");
        return Ok(());
    }

    let err = vcs.describe(temp.path()).unwrap_err();
    assert!(
        matches!(
            err,
            VcsCommandError::VcsFailed {
                operation: VcsOperation::Describe,
                ..
            }
        ),
        "describe outside a repository should fail: {err:?}"
    );

    let err = vcs.short_hash(temp.path()).unwrap_err();
    assert!(
        matches!(
            err,
            VcsCommandError::VcsFailed {
                operation: VcsOperation::ShortHash,
                ..
            }
        ),
        "rev-parse outside a repository should fail: {err:?}"
    );

    Ok(())
}

#[test]
fn test_missing_binary() -> Result<()> {
    let temp = setup_git_repo()?;
    let vcs = Vcs::git_at(temp.path().join("no-such-git").into_string());

    let err = vcs.describe(temp.path()).unwrap_err();
    assert!(err.is_spawn_failure(), "expected spawn failure: {err:?}");

    Ok(())
}
