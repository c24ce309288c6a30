// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ccm clean` — remove every declared target's output path.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CleanArgs {
    /// Path to the `ccm.toml` manifest to clean.
    #[arg(long = "manifest", default_value = "ccm.toml")]
    pub manifest: PathBuf,
}

pub fn run(args: CleanArgs) -> anyhow::Result<i32> {
    let manifest = ccm_manifest::load(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;

    let report = ccm_engine::clean(&manifest.spec);
    for path in &report.removed {
        tracing::info!(path = %path.display(), "removed");
    }
    for path in &report.failed {
        tracing::warn!(path = %path.display(), "failed to remove");
    }

    // `clean`'s exit code is always 0; individual failures are logged only.
    Ok(0)
}

#[cfg(test)]
#[path = "clean_tests.rs"]
mod tests;
