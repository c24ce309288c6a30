// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The child-process runner: fork/exec one target's compile command, own
//! its stdout+stderr pipe, and drain it into a growable buffer.
//!
//! Grounded on the `nix`-based fork/exec/pipe child-supervision idiom in
//! `other_examples/*polkadot-sdk*prepare-worker*lib.rs.rs` and
//! `*execute-worker*lib.rs.rs` (raw `nix::sys::wait`/`nix::unistd` child
//! management), combined with the spawn protocol and drain-loop semantics
//! from SPEC_FULL §4.E (fork/exec/pipe ownership, EAGAIN/EINTR handling,
//! doubling-buffer drain).

use crate::error::EngineError;
use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::unistd::{self, ForkResult, Pid};
use std::ffi::CString;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use std::time::Instant;

/// Distinctive exit code written by the child when `execvp` itself fails
/// (the binary could not be found/executed at all). Chosen to be
/// unambiguous against ordinary compiler exit codes, per SPEC_FULL §9
/// "Exec failure in the child".
pub const EXEC_FAILURE_EXIT_CODE: i32 = 69;

/// Initial drain buffer capacity before the first doubling.
const INITIAL_BUFFER_CAP: usize = 4096;

/// Outcome of fork+exec: the child's pid, its start time, and the
/// non-blocking read end of its combined stdout+stderr pipe. The caller
/// (process manager) owns `read_fd` from here on and must close it exactly
/// once, on POLLHUP or on error (invariant 5).
pub struct Spawned {
    pub pid: Pid,
    pub started_at: Instant,
    pub read_fd: OwnedFd,
}

/// Fork and exec `argv` (argv[0] is the program), wiring the child's
/// stdout and stderr onto one shared non-blocking pipe.
pub fn spawn(argv: &[String]) -> Result<Spawned, EngineError> {
    let (read_raw, write_raw) =
        unistd::pipe2(OFlag::O_NONBLOCK).map_err(EngineError::Pipe)?;

    let cargs: Vec<CString> = argv
        .iter()
        .map(|s| CString::new(s.as_str()).unwrap_or_else(|_| CString::new("").unwrap()))
        .collect();

    // Safety: the orchestrator is single-threaded for the duration of the
    // build (SPEC_FULL §5), so the POSIX fork-in-a-multithreaded-process
    // hazards `fork` is unsafe about do not apply here. The child performs
    // only async-signal-safe operations (dup2/close/execvp) before either
    // exec-replacing itself or exiting.
    match unsafe { unistd::fork() }.map_err(EngineError::Fork)? {
        ForkResult::Child => {
            // Close the read end; duplicate the write end onto stdout and
            // stderr; close the original write fd; exec.
            drop(read_raw);
            let _ = unistd::dup2(write_raw.as_raw_fd(), libc::STDOUT_FILENO);
            let _ = unistd::dup2(write_raw.as_raw_fd(), libc::STDERR_FILENO);
            drop(write_raw);

            let program = cargs.first().cloned().unwrap_or_else(|| CString::new("").unwrap());
            let _ = unistd::execvp(&program, &cargs);
            // execvp only returns on failure.
            eprintln!("ccm: execvp failed for {}", argv.first().map(String::as_str).unwrap_or(""));
            std::process::exit(EXEC_FAILURE_EXIT_CODE);
        }
        ForkResult::Parent { child } => {
            // Parent closes the write end so POLLHUP is observable once the
            // child's last reference to it closes.
            drop(write_raw);
            Ok(Spawned {
                pid: child,
                started_at: Instant::now(),
                read_fd: read_raw,
            })
        }
    }
}

/// Outcome of one drain pass over a pipe's read end.
#[derive(Debug, PartialEq, Eq)]
pub enum DrainOutcome {
    /// No more data available right now (`EAGAIN`); caller resumes on the
    /// next readable poll event.
    WouldBlock,
    /// The write end has closed and no more data will ever arrive.
    Eof,
    /// A read error other than `EAGAIN`/`EINTR` stopped collection.
    Error(Errno),
}

/// Drain as much as is currently available from `fd` into the tail of
/// `buffer`, doubling on exhaustion, per SPEC_FULL §4.E. `EINTR` is
/// retried transparently; the loop terminates on `EAGAIN` or `EOF`.
pub fn drain(fd: RawFd, buffer: &mut Vec<u8>) -> DrainOutcome {
    loop {
        if buffer.capacity() == buffer.len() {
            let grow_to = (buffer.capacity() * 2).max(INITIAL_BUFFER_CAP);
            buffer.reserve(grow_to - buffer.capacity());
        }

        let start = buffer.len();
        let cap = buffer.capacity();
        buffer.resize(cap, 0);

        match unistd::read(fd, &mut buffer[start..]) {
            Ok(0) => {
                buffer.truncate(start);
                return DrainOutcome::Eof;
            }
            Ok(n) => {
                buffer.truncate(start + n);
            }
            Err(Errno::EINTR) => {
                buffer.truncate(start);
                continue;
            }
            Err(Errno::EAGAIN) => {
                buffer.truncate(start);
                return DrainOutcome::WouldBlock;
            }
            Err(e) => {
                buffer.truncate(start);
                return DrainOutcome::Error(e);
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
