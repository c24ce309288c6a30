// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn bare_job(wait_status: Option<WaitStatus>) -> JobRecord {
    JobRecord {
        target: TargetId(0),
        pid: Pid::from_raw(1),
        started_at: Instant::now(),
        read_fd: None,
        argv: vec!["cc".to_string()],
        output: Vec::new(),
        wait_status,
    }
}

#[test]
fn exit_zero_is_success() {
    let job = bare_job(Some(WaitStatus::Exited(Pid::from_raw(1), 0)));
    assert!(matches!(job.status(), JobStatus::Succeeded));
}

#[test]
fn nonzero_exit_is_failure() {
    let job = bare_job(Some(WaitStatus::Exited(Pid::from_raw(1), 69)));
    assert!(matches!(job.status(), JobStatus::Failed { .. }));
}

#[test]
fn signalled_child_is_failure() {
    let job = bare_job(Some(WaitStatus::Signaled(
        Pid::from_raw(1),
        nix::sys::signal::Signal::SIGKILL,
        false,
    )));
    assert!(matches!(job.status(), JobStatus::Failed { .. }));
}

#[test]
fn is_reapable_requires_both_exit_and_closed_fd() {
    let mut job = bare_job(Some(WaitStatus::Exited(Pid::from_raw(1), 0)));
    assert!(job.is_reapable());
    job.wait_status = None;
    assert!(!job.is_reapable());
}
