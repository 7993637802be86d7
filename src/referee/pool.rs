//! Reusable scratch buffers for match runs.
//!
//! Every match needs per-ring counters and a few index lists. At auction
//! request rates these allocations add up, so they are leased from
//! process-wide free lists and handed back when the lease drops.
//!
//! ## Lease Lifecycle
//!
//! ```text
//! lease()  -> pop an idle buffer, or allocate a fresh one
//! ...      -> use through Deref/DerefMut
//! drop     -> reset (truncate), then push back if under the limits
//! ```
//!
//! Returning happens in `Drop`, so early returns release too. A fresh
//! allocation and a reused buffer are indistinguishable to the caller.

use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use crate::config::PoolConfig;
use crate::referee::counters::Counters;

/// Buffers that can be truncated and reused.
pub trait Reusable: Default {
    /// Drop contents, keep the allocation.
    fn reset(&mut self);

    /// Allocation size, checked against `PoolConfig::max_retained`.
    fn retained_capacity(&self) -> usize;
}

impl<T> Reusable for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }

    fn retained_capacity(&self) -> usize {
        self.capacity()
    }
}

/// Mutex-guarded free list of buffers.
#[derive(Debug)]
pub struct Pool<T> {
    free: Mutex<Vec<T>>,
}

impl<T> Pool<T> {
    pub const fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reusable> Pool<T> {
    /// Borrow a buffer until the returned guard drops.
    pub fn lease(&self, limits: PoolConfig) -> Lease<'_, T> {
        let item = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default();

        Lease {
            pool: self,
            item,
            limits,
        }
    }

    /// Number of idle buffers.
    pub fn idle(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn give_back(&self, mut item: T, limits: PoolConfig) {
        item.reset();
        if item.retained_capacity() > limits.max_retained {
            return;
        }
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < limits.max_idle {
            free.push(item);
        }
    }
}

/// Scoped borrow of a pooled buffer.
#[derive(Debug)]
pub struct Lease<'a, T: Reusable> {
    pool: &'a Pool<T>,
    item: T,
    limits: PoolConfig,
}

impl<T: Reusable> Deref for Lease<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Reusable> DerefMut for Lease<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T: Reusable> Drop for Lease<'_, T> {
    fn drop(&mut self) {
        let item = mem::take(&mut self.item);
        self.pool.give_back(item, self.limits);
    }
}

// ============================================================================
// Process-wide pools
// ============================================================================

/// Fill counters and bundle deltas.
pub static COUNTERS: Pool<Counters> = Pool::new();

/// Tail indices collected during replacement.
pub static INDICES: Pool<Vec<usize>> = Pool::new();

/// Consumed marks over the tail.
pub static FLAGS: Pool<Vec<bool>> = Pool::new();

// ============================================================================
// Unit Tests
// ============================================================================
