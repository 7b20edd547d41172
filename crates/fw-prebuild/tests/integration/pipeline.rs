// Copyright 2026 Oxide Computer Company

//! End-to-end tests for the pre-build pipeline.

use crate::helpers::{Fixture, SPEC, git, git_binary};
use anyhow::Result;
use fw_prebuild::{
    Emission, EmissionMode, InjectOutcome, Pipeline, UNKNOWN_HASH,
    VersionInfo, VersionResolver,
};
use fw_version_vcs::Vcs;
use std::fs;

fn git_resolver() -> VersionResolver {
    VersionResolver::new(Vcs::git_at(git_binary()))
}

fn missing_git_resolver(fixture: &Fixture) -> VersionResolver {
    let binary = fixture.repo_root.join("no-such-git");
    VersionResolver::new(Vcs::git_at(binary.into_string()))
}

#[test]
fn test_run_injects_tag_version() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?.with_spec(SPEC)?.with_git()?;
    git(&fixture.repo_root, &["tag", "v1.2.3"])?;

    let pipeline =
        Pipeline::new(fixture.layout.clone()).with_resolver(git_resolver());
    let report = pipeline.run()?;

    assert_eq!(report.version.version, "1.2.3");
    assert_eq!(
        report.emission,
        Emission::Injected(InjectOutcome::Updated {
            previous: "0.0.0".to_owned()
        })
    );
    assert_eq!(
        fs::read_to_string(fixture.layout.spec_path())?,
        SPEC.replace("  version: 0.0.0", "  version: 1.2.3")
    );
    assert_eq!(report.staged.len(), 6);
    assert!(
        !fixture.layout.descriptor_path().exists(),
        "spec injection mode does not write a descriptor"
    );

    // A second run finds the version already in place.
    let report = pipeline.run()?;
    assert_eq!(report.emission, Emission::Injected(InjectOutcome::Unchanged));

    Ok(())
}

#[test]
fn test_run_descriptor_mode() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?.with_spec(SPEC)?.with_git()?;
    git(&fixture.repo_root, &["tag", "v2.0.0"])?;
    let head = git(&fixture.repo_root, &["rev-parse", "--short", "HEAD"])?;

    let report = Pipeline::new(fixture.layout.clone())
        .with_resolver(git_resolver())
        .with_mode(EmissionMode::Descriptor)
        .run()?;

    let path = fixture.layout.descriptor_path();
    assert_eq!(report.emission, Emission::Descriptor(path.clone()));

    let written: VersionInfo = serde_json::from_slice(&fs::read(&path)?)?;
    assert_eq!(written, report.version);
    assert_eq!(written.version, "2.0.0");
    assert_eq!(written.git_hash, head);
    assert!(written.build_time.ends_with(" UTC"));

    assert_eq!(
        fs::read_to_string(fixture.layout.spec_path())?,
        SPEC,
        "descriptor mode leaves the spec file alone"
    );

    Ok(())
}

#[test]
fn test_run_without_vcs_falls_back() -> Result<()> {
    let fixture = Fixture::new()?
        .with_docs()?
        .with_spec(&SPEC.replace("0.0.0", "3.1.4"))?;
    let pipeline = Pipeline::new(fixture.layout.clone())
        .with_resolver(missing_git_resolver(&fixture));

    let info = pipeline.version_info();
    assert_eq!(info.version, "3.1.4", "spec file version is the fallback");
    assert_eq!(info.git_hash, UNKNOWN_HASH);

    let report = pipeline.run()?;
    assert_eq!(report.emission, Emission::Injected(InjectOutcome::Unchanged));

    Ok(())
}

#[test]
fn test_run_without_vcs_or_spec() -> Result<()> {
    let fixture = Fixture::new()?.with_docs()?;
    let report = Pipeline::new(fixture.layout.clone())
        .with_resolver(missing_git_resolver(&fixture))
        .run()?;

    assert_eq!(report.version.version, "0.0.0");
    assert_eq!(
        report.emission,
        Emission::Injected(InjectOutcome::SpecMissing),
        "a missing spec file does not block the build"
    );
    assert_eq!(report.staged.len(), 6, "documentation is still staged");

    Ok(())
}

#[test]
fn test_run_spec_without_version_line() -> Result<()> {
    let spec = "openapi: 3.0.3\ninfo:\n  title: x\n";
    let fixture = Fixture::new()?.with_spec(spec)?;
    let report = Pipeline::new(fixture.layout.clone())
        .with_resolver(missing_git_resolver(&fixture))
        .run()?;

    assert_eq!(
        report.emission,
        Emission::Injected(InjectOutcome::PatternNotFound)
    );
    assert_eq!(
        fs::read(fixture.layout.spec_path())?,
        spec.as_bytes(),
        "spec file is byte-identical"
    );

    Ok(())
}
