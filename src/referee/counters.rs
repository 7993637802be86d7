//! Per-ring fill counters for one matching run.
//!
//! ## Commit Model
//!
//! A single moves one counter by one. A bundle can touch several rings at
//! once, so its placement goes through a second `Counters` holding the
//! bundle's per-ring deltas:
//!
//! ```text
//! deltas = count sub-items per ring
//! if every ring fits (fills[i] + deltas[i] <= rings[i].count):
//!     fills += deltas
//! ```
//!
//! Nothing is written until every ring has been checked, so a rejected
//! bundle leaves the fills exactly as they were.

use crate::referee::pool::Reusable;
use crate::types::Ring;

/// Growable counter indexed by ring position.
///
/// Reads past the end return zero; writes grow the backing vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    slots: Vec<usize>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter and size for `rings` entries.
    pub fn reset_to(&mut self, rings: usize) {
        self.slots.clear();
        self.slots.resize(rings, 0);
    }

    #[inline]
    pub fn get(&self, ring: usize) -> usize {
        self.slots.get(ring).copied().unwrap_or(0)
    }

    /// Add `n` to a ring's counter.
    #[inline]
    pub fn increment(&mut self, ring: usize, n: usize) {
        if ring >= self.slots.len() {
            self.slots.resize(ring + 1, 0);
        }
        self.slots[ring] += n;
    }

    /// Sum over all rings.
    pub fn total(&self) -> usize {
        self.slots.iter().sum()
    }

    /// True if `ring` still has room under its requested count.
    #[inline]
    pub fn has_room(&self, ring: usize, rings: &[Ring]) -> bool {
        rings
            .get(ring)
            .map_or(false, |r| self.get(ring) < r.count)
    }

    /// Would adding `deltas` keep every ring within its count?
    pub fn fits(&self, deltas: &Counters, rings: &[Ring]) -> bool {
        deltas.slots.iter().enumerate().all(|(i, &delta)| {
            delta == 0
                || rings
                    .get(i)
                    .map_or(false, |ring| self.get(i) + delta <= ring.count)
        })
    }

    /// Apply `deltas` if they fit; otherwise leave the counters untouched.
    pub fn commit(&mut self, deltas: &Counters, rings: &[Ring]) -> bool {
        if !self.fits(deltas, rings) {
            return false;
        }
        for (i, &delta) in deltas.slots.iter().enumerate() {
            if delta > 0 {
                self.increment(i, delta);
            }
        }
        true
    }
}

impl Reusable for Counters {
    fn reset(&mut self) {
        self.slots.clear();
    }

    fn retained_capacity(&self) -> usize {
        self.slots.capacity()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rings(counts: &[usize]) -> Vec<Ring> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| Ring::new((i + 1).to_string(), c))
            .collect()
    }

    #[test]
    fn test_counters_grow_on_write() {
        let mut counters = Counters::new();
        assert_eq!(counters.get(5), 0);

        counters.increment(5, 2);
        assert_eq!(counters.get(5), 2);
        assert_eq!(counters.get(4), 0);
        assert_eq!(counters.total(), 2);
    }

    #[test]
    fn test_has_room() {
        let rings = rings(&[1, 0]);
        let mut counters = Counters::new();

        assert!(counters.has_room(0, &rings));
        assert!(!counters.has_room(1, &rings)); // zero-count ring
        assert!(!counters.has_room(2, &rings)); // no such ring

        counters.increment(0, 1);
        assert!(!counters.has_room(0, &rings));
    }

    #[test]
    fn test_commit_all_or_nothing() {
        let rings = rings(&[3, 1, 2]);
        let mut fills = Counters::new();
        fills.reset_to(rings.len());
        fills.increment(1, 1); // ring 2 already full

        let mut deltas = Counters::new();
        deltas.reset_to(rings.len());
        deltas.increment(0, 1);
        deltas.increment(1, 1);
        deltas.increment(2, 1);

        assert!(!fills.commit(&deltas, &rings));
        // Rejected commit leaves earlier rings untouched
        assert_eq!(fills.get(0), 0);
        assert_eq!(fills.get(1), 1);
        assert_eq!(fills.get(2), 0);
    }

    #[test]
    fn test_commit_applies_every_delta() {
        let rings = rings(&[3, 1, 2]);
        let mut fills = Counters::new();
        fills.reset_to(rings.len());

        let mut deltas = Counters::new();
        deltas.reset_to(rings.len());
        deltas.increment(0, 2);
        deltas.increment(2, 2);

        assert!(fills.commit(&deltas, &rings));
        assert_eq!(fills.get(0), 2);
        assert_eq!(fills.get(1), 0);
        assert_eq!(fills.get(2), 2);

        // Second identical commit would overflow ring 3
        assert!(!fills.commit(&deltas, &rings));
        assert_eq!(fills.total(), 4);
    }

    #[test]
    fn test_delta_past_last_ring_never_fits() {
        let rings = rings(&[5]);
        let fills = Counters::new();
        let mut deltas = Counters::new();
        deltas.increment(3, 1);

        assert!(!fills.fits(&deltas, &rings));
    }

    #[test]
    fn test_reset_truncates() {
        let mut counters = Counters::new();
        counters.increment(3, 1);
        counters.reset();
        assert_eq!(counters.total(), 0);
        assert_eq!(counters.get(3), 0);
        assert!(counters.retained_capacity() >= 4);
    }
}
