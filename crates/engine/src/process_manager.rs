// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The process manager — the bounded-parallel event loop that drives a
//! schedule to completion. Grounded on SPEC_FULL §4.F; the admit/poll/
//! classify/read/reap cycle and the "fresh subtree becomes a new leaf"
//! propagation rule have no direct analogue in `ccm.h` (whose `TODO`
//! comment admits the original never implemented real parallelism), so the
//! loop structure itself is grounded on the `nix`-based poll/waitpid
//! supervision idiom in `other_examples/*polkadot-sdk*prepare-worker*` /
//! `*execute-worker*`, generalized from a one-shot worker into a
//! multi-slot pool per SPEC_FULL §4.F/§9.

use crate::command::build_command;
use crate::error::EngineError;
use crate::freshness::needs_rebuild;
use crate::graph::{build_schedule, Schedule};
use crate::job::{JobRecord, JobStatus};
use crate::runner::{self, DrainOutcome};
use ccm_core::arena::Arena;
use ccm_core::{BuildSpec, CoreError, ReadyQueue, TargetId, TargetScratch};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use std::os::fd::{AsFd, AsRawFd};

/// Liveness-backstop poll timeout: revisits `waitpid` even when no pipe has
/// become readable, per SPEC_FULL §4.F step 2.
const POLL_TIMEOUT_MS: u16 = 200;

/// Terminal disposition of one scheduled target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    Succeeded,
    Skipped,
    Failed { detail: String },
}

/// One target's final disposition, for the caller to render.
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub target: TargetId,
    pub name: String,
    pub status: TargetStatus,
}

/// The complete result of one `build`.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl BuildReport {
    pub fn any_failed(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.status, TargetStatus::Failed { .. }))
    }

    /// `0` on full success, `1` if any target failed, matching §6's CLI
    /// exit-code contract.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.any_failed())
    }
}

/// Build every target declared in `spec`, honoring freshness and the
/// `spec.jobs` parallelism cap.
pub fn build(spec: &BuildSpec) -> Result<BuildReport, EngineError> {
    let arena = Arena::new();
    let schedule = build_schedule(spec, &arena)?;
    run_schedule(spec, schedule)
}

fn run_schedule(spec: &BuildSpec, mut schedule: Schedule) -> Result<BuildReport, EngineError> {
    let jobs_cap = spec.jobs.max(1);
    let mut ready = ReadyQueue::with_capacity(schedule.order.len());
    let mut outcomes = Vec::with_capacity(schedule.order.len());
    let mut outstanding = schedule.order.len();
    let mut jobs: Vec<JobRecord> = Vec::with_capacity(jobs_cap);

    // Only declared leaves are activated directly; everything else reaches
    // zero remaining deps via `propagate` as its predecessors finish, and
    // activating it again here would double-enqueue or double-skip it.
    for &id in &schedule.order {
        if spec.target(id).deps.is_empty() {
            activate(id, spec, &mut schedule.scratch, &mut ready, &mut outstanding, &mut outcomes);
        }
    }

    while outstanding > 0 {
        while jobs.len() < jobs_cap {
            let Some(id) = ready.pop() else { break };
            let command = build_command(spec, spec.target(id));
            let spawned = runner::spawn(&command.argv)?;
            jobs.push(JobRecord {
                target: id,
                pid: spawned.pid,
                started_at: spawned.started_at,
                read_fd: Some(spawned.read_fd),
                argv: command.argv,
                output: Vec::new(),
                wait_status: None,
            });
        }

        if ready.is_empty() && jobs.is_empty() {
            return Err(EngineError::Core(CoreError::StarvedQueue(outstanding)));
        }

        poll_and_drain(&mut jobs)?;
        reap_waits(&mut jobs)?;

        let mut i = 0;
        while i < jobs.len() {
            if jobs[i].is_reapable() {
                let job = jobs.swap_remove(i);
                let status = job.status();
                tracing::info!(
                    target = job.argv.first().map(String::as_str).unwrap_or(""),
                    elapsed_ms = job.elapsed().as_millis() as u64,
                    "job finished"
                );
                flush_output(&job);

                let name = spec.target(job.target).name().to_string();
                outcomes.push(TargetOutcome {
                    target: job.target,
                    name,
                    status: match status {
                        JobStatus::Succeeded => TargetStatus::Succeeded,
                        JobStatus::Failed { detail } => TargetStatus::Failed { detail },
                    },
                });
                outstanding -= 1;
                propagate(
                    job.target,
                    spec,
                    &mut schedule.scratch,
                    &mut ready,
                    &mut outstanding,
                    &mut outcomes,
                );
                // `i` now holds the slot swapped in from the end; revisit it.
            } else {
                i += 1;
            }
        }
    }

    Ok(BuildReport { outcomes })
}

fn poll_and_drain(jobs: &mut [JobRecord]) -> Result<(), EngineError> {
    let mut pollfds: Vec<PollFd> = jobs
        .iter()
        .filter_map(|j| j.read_fd.as_ref().map(|fd| PollFd::new(fd.as_fd(), PollFlags::POLLIN)))
        .collect();

    if pollfds.is_empty() {
        return Ok(());
    }

    poll(&mut pollfds, PollTimeout::from(POLL_TIMEOUT_MS)).map_err(EngineError::Poll)?;

    let mut pf_iter = pollfds.iter();
    for job in jobs.iter_mut() {
        let Some(read_fd) = job.read_fd.as_ref() else {
            continue;
        };
        let Some(pf) = pf_iter.next() else {
            // `pollfds` was built from the same open-read_fd filter as this
            // loop, so every remaining job with a read_fd has a matching
            // slot; fall through defensively rather than panic if not.
            break;
        };
        let revents = pf.revents().unwrap_or_else(PollFlags::empty);
        if !(revents.contains(PollFlags::POLLIN)
            || revents.contains(PollFlags::POLLHUP)
            || revents.contains(PollFlags::POLLERR))
        {
            continue;
        }

        let fd = read_fd.as_raw_fd();
        loop {
            match runner::drain(fd, &mut job.output) {
                DrainOutcome::WouldBlock => break,
                DrainOutcome::Eof => {
                    job.read_fd = None;
                    break;
                }
                DrainOutcome::Error(e) => {
                    tracing::warn!(error = %e, "read error draining child pipe, closing early");
                    job.read_fd = None;
                    break;
                }
            }
        }
    }

    Ok(())
}

fn reap_waits(jobs: &mut [JobRecord]) -> Result<(), EngineError> {
    for job in jobs.iter_mut() {
        if job.wait_status.is_some() {
            continue;
        }
        match waitpid(job.pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => {}
            Ok(status) => job.wait_status = Some(status),
            Err(Errno::ECHILD) => {
                return Err(EngineError::UntrackedChild(job.pid.as_raw()));
            }
            Err(source) => {
                return Err(EngineError::Wait {
                    pid: job.pid.as_raw(),
                    source,
                });
            }
        }
    }
    Ok(())
}

fn flush_output(job: &JobRecord) {
    use std::io::Write;
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(&job.output);
    let _ = writeln!(stdout, "--- {} ---", job.argv.first().map(String::as_str).unwrap_or(""));
}

/// A target's remaining-dep counter has just reached zero: decide
/// freshness and either skip it (propagating immediately) or enqueue it.
///
/// Guards on `enqueued` so a target is activated at most once even if a
/// caller reaches zero remaining deps for it more than once (invariant 3).
fn activate(
    id: TargetId,
    spec: &BuildSpec,
    scratch: &mut [TargetScratch],
    ready: &mut ReadyQueue,
    outstanding: &mut usize,
    outcomes: &mut Vec<TargetOutcome>,
) {
    if scratch[id.index()].enqueued {
        return;
    }
    scratch[id.index()].enqueued = true;

    if needs_rebuild(spec.target(id)) {
        ready.push(id);
    } else {
        tracing::debug!(target = spec.target(id).name(), "skipped, up to date");
        outcomes.push(TargetOutcome {
            target: id,
            name: spec.target(id).name().to_string(),
            status: TargetStatus::Skipped,
        });
        *outstanding -= 1;
        propagate(id, spec, scratch, ready, outstanding, outcomes);
    }
}

/// Decrement `id`'s reverse-edge neighbours' remaining-dep counters,
/// activating any that reach zero. Runs unconditionally on both success
/// and failure (§7's chosen policy: propagate unconditionally).
fn propagate(
    id: TargetId,
    spec: &BuildSpec,
    scratch: &mut [TargetScratch],
    ready: &mut ReadyQueue,
    outstanding: &mut usize,
    outcomes: &mut Vec<TargetOutcome>,
) {
    let neighbours = scratch[id.index()].reverse_edges.clone();
    for r in neighbours {
        scratch[r.index()].remaining_deps -= 1;
        if scratch[r.index()].remaining_deps == 0 {
            activate(r, spec, scratch, ready, outstanding, outcomes);
        }
    }
}

#[cfg(test)]
#[path = "process_manager_tests.rs"]
mod tests;
