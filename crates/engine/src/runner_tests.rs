// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use nix::sys::wait::{waitpid, WaitStatus};
use std::os::fd::AsRawFd;

fn reap(pid: Pid) -> WaitStatus {
    waitpid(pid, None).expect("waitpid should succeed on a known child")
}

#[test]
fn echo_child_writes_to_the_shared_pipe() {
    let spawned = spawn(&[
        "/bin/echo".to_string(),
        "hello-from-runner".to_string(),
    ])
    .unwrap();

    let mut buf = Vec::new();
    loop {
        match drain(spawned.read_fd.as_raw_fd(), &mut buf) {
            DrainOutcome::Eof => break,
            DrainOutcome::WouldBlock => continue,
            DrainOutcome::Error(e) => panic!("unexpected read error: {e}"),
        }
    }

    let status = reap(spawned.pid);
    assert!(matches!(status, WaitStatus::Exited(_, 0)));
    assert!(String::from_utf8_lossy(&buf).contains("hello-from-runner"));
}

#[test]
fn false_child_exits_nonzero_with_no_output() {
    let spawned = spawn(&["/bin/false".to_string()]).unwrap();

    let mut buf = Vec::new();
    loop {
        match drain(spawned.read_fd.as_raw_fd(), &mut buf) {
            DrainOutcome::Eof => break,
            DrainOutcome::WouldBlock => continue,
            DrainOutcome::Error(e) => panic!("unexpected read error: {e}"),
        }
    }

    let status = reap(spawned.pid);
    assert!(matches!(status, WaitStatus::Exited(_, code) if code != 0));
    assert!(buf.is_empty());
}

#[test]
fn missing_binary_exits_with_the_exec_failure_code() {
    let spawned = spawn(&["/no/such/ccm-runner-binary".to_string()]).unwrap();

    let mut buf = Vec::new();
    loop {
        match drain(spawned.read_fd.as_raw_fd(), &mut buf) {
            DrainOutcome::Eof => break,
            DrainOutcome::WouldBlock => continue,
            DrainOutcome::Error(e) => panic!("unexpected read error: {e}"),
        }
    }

    let status = reap(spawned.pid);
    assert!(matches!(
        status,
        WaitStatus::Exited(_, code) if code == EXEC_FAILURE_EXIT_CODE
    ));
}
