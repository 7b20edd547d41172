// Copyright 2026 Oxide Computer Company

//! Command-line interface for the `fw-prebuild` binary.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use fw_prebuild::{
    Emission, EmissionMode, InjectOutcome, Pipeline, StageLayout,
    inject_version, stage_docs, write_descriptor,
};
use tracing::info;

/// Stamp version metadata and stage documentation before a firmware
/// filesystem image is built.
#[derive(Parser, Debug)]
#[command(name = "fw-prebuild", version, about, long_about = None)]
pub struct Cli {
    /// Firmware project directory (the directory holding `data/`)
    #[arg(long, env = "PROJECT_DIR", default_value = ".", global = true)]
    pub project_dir: Utf8PathBuf,

    /// Repository root holding README.md, docs/ and images/
    /// [default: parent of the project directory]
    #[arg(long, env = "FW_PREBUILD_REPO_ROOT", global = true)]
    pub repo_root: Option<Utf8PathBuf>,

    /// How to record the resolved version
    #[arg(
        long,
        value_enum,
        env = "FW_PREBUILD_EMIT",
        default_value_t = EmitArg::Spec,
        global = true
    )]
    pub emit: EmitArg,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute [default: run]
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Version emission mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmitArg {
    /// Rewrite the version line of data/openapi.yaml
    Spec,
    /// Write data/version.json
    Descriptor,
}

impl From<EmitArg> for EmissionMode {
    fn from(arg: EmitArg) -> Self {
        match arg {
            EmitArg::Spec => EmissionMode::SpecInjection,
            EmitArg::Descriptor => EmissionMode::Descriptor,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every pre-build step
    Run,

    /// Print the resolved version info as JSON
    Version,

    /// Rewrite the spec file's version line
    InjectVersion {
        /// Version to inject [default: resolved version]
        #[arg(long)]
        version: Option<String>,
    },

    /// Rebuild the documentation staging directory
    StageDocs,

    /// Write the version descriptor
    WriteDescriptor,
}

/// Executes the parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let layout = match &cli.repo_root {
        Some(repo_root) => {
            StageLayout::discover_with_repo_root(&cli.project_dir, repo_root)
        }
        None => StageLayout::discover(&cli.project_dir),
    }
    .context("failed to locate project")?;

    let pipeline = Pipeline::new(layout).with_mode(cli.emit.into());

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let report = pipeline.run()?;
            match &report.emission {
                Emission::Injected(outcome) => log_outcome(outcome),
                Emission::Descriptor(path) => {
                    info!(%path, "version descriptor written");
                }
            }
            info!(
                version = %report.version.version,
                staged = report.staged.len(),
                "pre-build steps complete"
            );
        }
        Commands::Version => {
            let version = pipeline.version_info();
            println!("{}", serde_json::to_string_pretty(&version)?);
        }
        Commands::InjectVersion { version } => {
            let version = match version {
                Some(version) => version,
                None => pipeline.version_info().version,
            };
            let outcome =
                inject_version(&pipeline.layout().spec_path(), &version)?;
            log_outcome(&outcome);
        }
        Commands::StageDocs => {
            stage_docs(pipeline.layout())?;
        }
        Commands::WriteDescriptor => {
            let version = pipeline.version_info();
            write_descriptor(&pipeline.layout().descriptor_path(), &version)?;
        }
    }

    Ok(())
}

fn log_outcome(outcome: &InjectOutcome) {
    match outcome {
        InjectOutcome::Updated { previous } => {
            info!(%previous, "spec version updated");
        }
        InjectOutcome::Unchanged => info!("spec version already current"),
        InjectOutcome::PatternNotFound => {
            info!("spec file left unchanged (no version line)");
        }
        InjectOutcome::SpecMissing => info!("spec file missing, skipped"),
    }
}
