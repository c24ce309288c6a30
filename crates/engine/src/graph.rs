// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graph builder: topological sort with cycle detection, depth-level
//! assignment, and reverse-edge materialization.
//!
//! Grounded on `ccm.h`'s `ccm_spec_build_target`, which walks dependencies
//! recursively using `visited`/`collected` flags to both detect cycles and
//! avoid rebuilding a target reached through more than one path — but the
//! original has no reverse-edge index at all (that bookkeeping is this
//! spec's redesign over the naive recursive build, per SPEC_FULL §4.D/§9,
//! generalized into the explicit two-pass count-then-fill structure laid
//! out there, using [`ccm_core::arena::Arena`] for the reverse-edge storage
//! it describes).

use crate::error::EngineError;
use ccm_core::arena::Arena;
use ccm_core::target::Visit;
use ccm_core::{BuildSpec, CoreError, TargetId, TargetScratch};

/// A topological linearization of the reachable set, plus the per-build
/// scratch table (visited/collected/level/remaining-deps/reverse-edges)
/// indexed by [`TargetId`].
pub struct Schedule {
    pub order: Vec<TargetId>,
    pub scratch: Vec<TargetScratch>,
}

impl Schedule {
    pub fn level(&self, id: TargetId) -> u32 {
        self.scratch[id.index()].level
    }

    pub fn reverse_edges(&self, id: TargetId) -> &[TargetId] {
        &self.scratch[id.index()].reverse_edges
    }
}

/// Build a [`Schedule`] for every target declared in `spec`, treating the
/// declaration order as the root list. Declared-but-unreachable targets
/// never occur here since every declared target is itself a root; a target
/// reachable only as someone's dependency is still visited and collected
/// the first time any earlier root's DFS reaches it, and is *not*
/// re-collected by its own top-level root slot (§9 open question (c):
/// duplicate/aliased targets are deduplicated via the `collected` flag).
pub fn build_schedule(spec: &BuildSpec, arena: &Arena) -> Result<Schedule, EngineError> {
    let n = spec.target_count();
    let mut scratch: Vec<TargetScratch> = (0..n).map(|_| TargetScratch::default()).collect();
    let mut order = Vec::with_capacity(n);

    for root in spec.ids() {
        visit(spec, root, &mut scratch, &mut order)?;
    }

    assign_reverse_edges(spec, &order, &mut scratch, arena);

    for id in &order {
        scratch[id.index()].remaining_deps = spec.target(*id).deps.len() as u32;
    }

    Ok(Schedule { order, scratch })
}

fn visit(
    spec: &BuildSpec,
    id: TargetId,
    scratch: &mut [TargetScratch],
    order: &mut Vec<TargetId>,
) -> Result<(), EngineError> {
    match scratch[id.index()].visit {
        Visit::Collected => return Ok(()),
        Visit::Visited => {
            return Err(EngineError::Core(CoreError::Cycle(
                spec.target(id).name().to_string(),
            )))
        }
        Visit::Unvisited => {}
    }

    scratch[id.index()].visit = Visit::Visited;

    let mut max_dep_level = 0u32;
    for dep in spec.target(id).deps.clone() {
        visit(spec, dep, scratch, order)?;
        max_dep_level = max_dep_level.max(scratch[dep.index()].level);
    }

    scratch[id.index()].level = max_dep_level + 1;
    scratch[id.index()].visit = Visit::Collected;
    order.push(id);
    Ok(())
}

fn assign_reverse_edges(
    spec: &BuildSpec,
    order: &[TargetId],
    scratch: &mut [TargetScratch],
    arena: &Arena,
) {
    // First pass: count.
    let mut counts = vec![0usize; scratch.len()];
    for id in order {
        for dep in &spec.target(*id).deps {
            counts[dep.index()] += 1;
        }
    }

    // Allocate, from the arena, a reverse-edge region of exactly the
    // counted capacity for every target (reset to zero length).
    for id in order {
        scratch[id.index()].reverse_edges = arena.alloc_region_with_capacity(counts[id.index()]);
    }

    // Second pass: fill.
    for id in order {
        for dep in &spec.target(*id).deps {
            scratch[dep.index()].reverse_edges.push(*id);
        }
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
