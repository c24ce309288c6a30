// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared across the core data model. Per SPEC_FULL §7, kind 1
//! (programmer/invariant violations) is fatal: these variants are
//! constructed, logged, and the process aborts — they are not meant to be
//! recovered from.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("target {0} is part of a dependency cycle")]
    Cycle(String),
    #[error("ready queue invariant violated: queue empty but {0} target(s) still outstanding")]
    StarvedQueue(usize),
    #[error("target id {0} out of range for this spec")]
    UnknownTarget(usize),
}
