// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The freshness oracle — "does target *t* need rebuild?". Grounded on
//! `examples/original_source/ccm.h`'s `ccm_target_needs_rebuild`: an
//! unstat-able output means rebuild; every stat-able source or watch path
//! newer than the output means rebuild; unstat-able inputs are silently
//! ignored (the compiler reports missing sources on its own).

use ccm_core::Target;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

/// Returns `true` if `target` needs to be rebuilt.
pub fn needs_rebuild(target: &Target) -> bool {
    let Some(output_mtime) = mtime(&target.output) else {
        return true;
    };

    target
        .sources
        .iter()
        .chain(target.watch.iter())
        .any(|input| matches!(mtime(input), Some(t) if t > output_mtime))
}

#[cfg(test)]
#[path = "freshness_tests.rs"]
mod tests;
