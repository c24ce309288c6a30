// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ccm build` — bootstrap if declared, then build every target in the
//! loaded manifest.

use anyhow::Context;
use ccm_engine::TargetStatus;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct BuildArgs {
    /// Override the manifest's parallelism cap.
    #[arg(short = 'j', long = "jobs")]
    pub jobs: Option<usize>,

    /// Path to the `ccm.toml` manifest to build.
    #[arg(long = "manifest", default_value = "ccm.toml")]
    pub manifest: PathBuf,
}

pub fn run(args: BuildArgs, original_argv: &[String]) -> anyhow::Result<i32> {
    let manifest = ccm_manifest::load(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;

    if let Some(bootstrap) = &manifest.bootstrap {
        let binary_path = match &bootstrap.output {
            Some(path) => path.clone(),
            None => std::env::current_exe().context("resolving the running binary's path")?,
        };
        ccm_engine::bootstrap(
            &bootstrap.compiler,
            &binary_path,
            &bootstrap.sources,
            original_argv,
        )
        .context("bootstrap")?;
    }

    let mut spec = manifest.spec;
    if let Some(jobs) = args.jobs {
        spec.jobs = jobs.max(1);
    }

    let report = ccm_engine::build(&spec).context("build")?;
    for outcome in &report.outcomes {
        match &outcome.status {
            TargetStatus::Succeeded => tracing::info!(target = %outcome.name, "built"),
            TargetStatus::Skipped => tracing::info!(target = %outcome.name, "skipped, up to date"),
            TargetStatus::Failed { detail } => {
                tracing::error!(target = %outcome.name, %detail, "build failed")
            }
        }
    }

    Ok(report.exit_code())
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
