// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types, grounded on `oj-engine`'s `error.rs` (one
//! `thiserror::Error` enum, one variant per failure class).

use ccm_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),

    #[error("pipe creation failed: {0}")]
    Pipe(#[source] nix::Error),

    #[error("poll failed: {0}")]
    Poll(#[source] nix::Error),

    #[error("waitpid failed for pid {pid}: {source}")]
    Wait {
        pid: i32,
        #[source]
        source: nix::Error,
    },

    #[error("waitpid reported ECHILD for a tracked pid {0}: process table is inconsistent")]
    UntrackedChild(i32),

    #[error("bootstrap stat failed on {path}: {source}")]
    BootstrapStat {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bootstrap rename of {from} to {to} failed: {source}")]
    BootstrapRename {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bootstrap rebuild of {binary} failed, rolled back to previous binary")]
    BootstrapRebuildFailed { binary: String },

    #[error("bootstrap re-exec of {binary} failed: {source}")]
    BootstrapExec {
        binary: String,
        #[source]
        source: nix::Error,
    },
}
