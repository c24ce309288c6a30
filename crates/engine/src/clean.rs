// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `clean`: remove every declared target's output path. Grounded on
//! `ccm.h`'s `ccm_spec_clean`, which walks the declared target list (not
//! the topological schedule — dependencies are irrelevant here) and
//! removes each output, logging but not aborting on failure.

use ccm_core::BuildSpec;
use std::path::PathBuf;

/// Per-path outcome of one `clean` run.
#[derive(Debug, Default)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Remove every declared target's output. Always succeeds at the process
/// level (§6: `clean`'s exit code is 0 regardless); individual removal
/// failures are recorded in the report and logged, not propagated.
pub fn clean(spec: &BuildSpec) -> CleanReport {
    let mut report = CleanReport::default();

    for target in &spec.targets {
        match std::fs::remove_file(&target.output) {
            Ok(()) => {
                tracing::info!(path = %target.output.display(), "removed");
                report.removed.push(target.output.clone());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Already clean; not a failure.
            }
            Err(e) => {
                tracing::warn!(path = %target.output.display(), error = %e, "failed to remove");
                report.failed.push(target.output.clone());
            }
        }
    }

    report
}

#[cfg(test)]
#[path = "clean_tests.rs"]
mod tests;
