// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bootstrap controller: detect and rebuild the orchestrator's own binary,
//! then re-execute it. Grounded on `ccm.h`'s `ccm_bootstrap`, which performs
//! exactly this rename/rebuild/exec-replace sequence against a synthetic
//! single-target spec built from the orchestrator's own source files.

use crate::error::EngineError;
use crate::freshness::needs_rebuild;
use crate::process_manager::build as run_build;
use ccm_core::{BuildSpec, Target};
use std::ffi::CString;
use std::path::{Path, PathBuf};

/// Append `.old` to `path`'s file name, keeping it a sibling of the
/// original so the rename is same-filesystem and therefore atomic.
fn sibling_old(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".old");
    path.with_file_name(name)
}

/// Rebuild the running binary from `sources` if stale, then exec-replace
/// the current process image with the freshly built binary, forwarding
/// `original_argv` unchanged. Returns `Ok(())` only when no rebuild was
/// needed — on a successful rebuild this function never returns, it
/// `exec`s; on failure it returns an error after restoring the previous
/// binary (invariant 7).
pub fn bootstrap(
    compiler: &str,
    binary_path: &Path,
    sources: &[PathBuf],
    original_argv: &[String],
) -> Result<(), EngineError> {
    let synthetic = Target::new(binary_path).with_sources(sources.iter().cloned());

    if !needs_rebuild(&synthetic) {
        tracing::debug!("bootstrap: binary up to date, skipping self-rebuild");
        return Ok(());
    }

    tracing::info!("bootstrap: self-rebuild required");

    let old_path = sibling_old(binary_path);
    std::fs::rename(binary_path, &old_path).map_err(|source| EngineError::BootstrapRename {
        from: binary_path.display().to_string(),
        to: old_path.display().to_string(),
        source,
    })?;

    let mut builder = BuildSpec::builder(compiler).jobs(1);
    builder.add_target(
        Target::new(binary_path)
            .with_sources(sources.iter().cloned())
            .with_pre_opts(["-O0"]),
    );
    let spec = builder.build();

    let report = run_build(&spec);
    let rebuilt_ok = matches!(&report, Ok(r) if !r.any_failed());

    if !rebuilt_ok {
        tracing::error!("bootstrap: self-rebuild failed, restoring previous binary");
        std::fs::rename(&old_path, binary_path).map_err(|source| EngineError::BootstrapRename {
            from: old_path.display().to_string(),
            to: binary_path.display().to_string(),
            source,
        })?;
        return Err(EngineError::BootstrapRebuildFailed {
            binary: binary_path.display().to_string(),
        });
    }

    exec_replace(binary_path, original_argv)
}

fn exec_replace(binary_path: &Path, original_argv: &[String]) -> Result<(), EngineError> {
    let program = CString::new(binary_path.as_os_str().as_encoded_bytes())
        .unwrap_or_else(|_| CString::new("").unwrap());
    let mut cargs = vec![program.clone()];
    cargs.extend(
        original_argv
            .iter()
            .map(|a| CString::new(a.as_str()).unwrap_or_else(|_| CString::new("").unwrap())),
    );

    let err = nix::unistd::execv(&program, &cargs).unwrap_err();
    Err(EngineError::BootstrapExec {
        binary: binary_path.display().to_string(),
        source: err,
    })
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
