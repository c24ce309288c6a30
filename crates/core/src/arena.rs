// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A scratch memory arena, grounded on `arena.h` from the original source:
//! bump-allocate, never free individually, reset (or drop) in one stroke at
//! the end of a build.
//!
//! The C header hands back raw, untyped, aligned memory from one big
//! `malloc`'d block. A faithful Rust translation of that requires `unsafe`
//! pointer arithmetic for no real benefit over the allocator Rust already
//! gives every `Vec` — so this is a *typed* bump arena: one `Vec<T>` region
//! per call to [`Arena::alloc_region`], all regions dropped together when
//! the arena itself is dropped. It keeps the API the engine actually needs
//! (single discard point, O(1) amortized bulk allocation, one stats log
//! line) without reintroducing manual memory management.

use std::cell::RefCell;

/// A single bump-allocated region of `T`, handed out by the arena.
pub type Region<T> = Vec<T>;

/// Per-build scratch memory arena.
pub struct Arena {
    regions_allocated: RefCell<usize>,
    bytes_committed: RefCell<usize>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self {
            regions_allocated: RefCell::new(0),
            bytes_committed: RefCell::new(0),
        }
    }

    /// Allocate a region of `len` default-initialized `T`s.
    pub fn alloc_region<T: Default + Clone>(&self, len: usize) -> Region<T> {
        *self.regions_allocated.borrow_mut() += 1;
        *self.bytes_committed.borrow_mut() += len * std::mem::size_of::<T>();
        vec![T::default(); len]
    }

    /// Allocate a region with a fixed starting capacity but zero length,
    /// mirroring `rb_init`'s "reserve, then push" usage.
    pub fn alloc_region_with_capacity<T>(&self, capacity: usize) -> Region<T> {
        *self.regions_allocated.borrow_mut() += 1;
        *self.bytes_committed.borrow_mut() += capacity * std::mem::size_of::<T>();
        Vec::with_capacity(capacity)
    }

    pub fn regions_allocated(&self) -> usize {
        *self.regions_allocated.borrow()
    }

    pub fn bytes_committed(&self) -> usize {
        *self.bytes_committed.borrow()
    }

    /// Reset accounting. Memory itself is reclaimed when the `Region`
    /// values returned by this arena are dropped by their owners.
    pub fn reset(&self) {
        *self.regions_allocated.borrow_mut() = 0;
        *self.bytes_committed.borrow_mut() = 0;
    }

    pub fn log_stats(&self) {
        tracing::debug!(
            regions = self.regions_allocated(),
            bytes = self.bytes_committed(),
            "arena scratch usage"
        );
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
