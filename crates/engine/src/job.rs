// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job record: per-active-child bookkeeping owned by one process-manager
//! slot. Grounded on SPEC_FULL §3 "Job record".

use ccm_core::TargetId;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::os::fd::OwnedFd;
use std::time::Instant;

/// Outcome of reaping one child.
#[derive(Debug, Clone)]
pub enum JobStatus {
    Succeeded,
    Failed { detail: String },
}

/// One active child process and everything the process manager needs to
/// drain, reap, and report it.
pub struct JobRecord {
    pub target: TargetId,
    pub pid: Pid,
    pub started_at: Instant,
    /// Read end of the child's combined stdout+stderr pipe; `None` once
    /// closed (invariant 5: closed exactly once, on POLLHUP or failure).
    pub read_fd: Option<OwnedFd>,
    pub argv: Vec<String>,
    pub output: Vec<u8>,
    pub wait_status: Option<WaitStatus>,
}

impl JobRecord {
    pub fn is_reapable(&self) -> bool {
        self.wait_status.is_some() && self.read_fd.is_none()
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    pub fn status(&self) -> JobStatus {
        match self.wait_status {
            Some(WaitStatus::Exited(_, 0)) => JobStatus::Succeeded,
            Some(WaitStatus::Exited(_, code)) => JobStatus::Failed {
                detail: format!("exited with status {code}"),
            },
            Some(WaitStatus::Signaled(_, signal, _)) => JobStatus::Failed {
                detail: format!("terminated by signal {signal}"),
            },
            Some(other) => JobStatus::Failed {
                detail: format!("unexpected wait status: {other:?}"),
            },
            None => JobStatus::Failed {
                detail: "reaped without a wait status".to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
