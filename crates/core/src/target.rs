// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target identity and the declarative/scratch split described in the
//! design notes: `Target` is immutable and reusable across builds, while
//! `TargetScratch` holds the per-build mutable fields (visited, collected,
//! remaining-deps counter, depth level, reverse edges) keyed by id.

use std::path::PathBuf;

/// Stable identifier for a target — an index into a `BuildSpec`'s target
/// vector. Using an index rather than a name or a pointer means the
/// reverse-edge graph and the scratch table can be plain `Vec`s with no
/// aliasing or lifetime hazards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

impl TargetId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A declared build artifact: its output path, inputs, per-target argument
/// vectors, and dependency edges. Declarative fields never change once the
/// target is added to a `BuildSpec`; the engine never mutates a `Target`.
#[derive(Debug, Clone)]
pub struct Target {
    /// Output path; also the target's identity for freshness and `clean`.
    pub output: PathBuf,
    /// Source paths passed to the compiler.
    pub sources: Vec<PathBuf>,
    /// Additional inputs that affect freshness but are not passed on the
    /// command line.
    pub watch: Vec<PathBuf>,
    /// Arguments inserted before the output flag and sources.
    pub pre_opts: Vec<String>,
    /// Arguments inserted after the sources.
    pub post_opts: Vec<String>,
    /// Declared dependency targets, by id.
    pub deps: Vec<TargetId>,
}

impl Target {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            sources: Vec::new(),
            watch: Vec::new(),
            pre_opts: Vec::new(),
            post_opts: Vec::new(),
            deps: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    pub fn with_watch(mut self, watch: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.watch.extend(watch.into_iter().map(Into::into));
        self
    }

    pub fn with_pre_opts(mut self, opts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.pre_opts.extend(opts.into_iter().map(Into::into));
        self
    }

    pub fn with_post_opts(mut self, opts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.post_opts.extend(opts.into_iter().map(Into::into));
        self
    }

    pub fn with_deps(mut self, deps: impl IntoIterator<Item = TargetId>) -> Self {
        self.deps.extend(deps);
        self
    }

    pub fn name(&self) -> &str {
        self.output.to_str().unwrap_or("<non-utf8 target>")
    }
}

/// DFS coloring used by the graph builder's cycle detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Unvisited,
    Visited,
    Collected,
}

/// Per-build mutable state for one target, indexed by `TargetId`. Kept
/// separate from `Target` so a `BuildSpec` can be scheduled more than once
/// (e.g. bootstrap's single-target build followed by the real build) without
/// declarative fields leaking state between passes.
#[derive(Debug, Clone)]
pub struct TargetScratch {
    pub visit: Visit,
    /// Depth level: leaves are 1, otherwise `1 + max(level of deps)`.
    pub level: u32,
    /// Number of declared dependencies not yet completed-or-skipped.
    pub remaining_deps: u32,
    /// Ids of targets that declare this target as a dependency.
    pub reverse_edges: Vec<TargetId>,
    /// Set once this target has been pushed to the ready queue, to enforce
    /// the at-most-once-enqueue invariant.
    pub enqueued: bool,
}

impl Default for TargetScratch {
    fn default() -> Self {
        Self {
            visit: Visit::Unvisited,
            level: 0,
            remaining_deps: 0,
            reverse_edges: Vec::new(),
            enqueued: false,
        }
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
