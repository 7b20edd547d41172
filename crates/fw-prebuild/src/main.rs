// Copyright 2026 Oxide Computer Company

//! `fw-prebuild`: pre-build hook for firmware filesystem images.
//!
//! ```bash
//! # From the firmware project directory, before building the image:
//! fw-prebuild
//!
//! # Emit data/version.json instead of rewriting data/openapi.yaml:
//! fw-prebuild --emit descriptor
//!
//! # Individual steps:
//! fw-prebuild --project-dir esp32 version
//! fw-prebuild --project-dir esp32 stage-docs
//! ```

mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    match cli::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so that `version` output on stdout stays parseable.
/// `FW_PREBUILD_LOG_FORMAT=json` switches to machine-readable output.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "fw_prebuild=debug,fw_version_vcs=debug"
    } else {
        "fw_prebuild=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    match std::env::var("FW_PREBUILD_LOG_FORMAT").as_deref() {
        Ok("json") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt.json())
                .init();
        }
        _ => {
            tracing_subscriber::registry().with(filter).with(fmt).init();
        }
    }
}
