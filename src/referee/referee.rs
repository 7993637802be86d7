//! The referee: owns a candidate pool and awards ring slots.
//!
//! ## Match Flow
//!
//! ```text
//! push(...)            pool grows, normalized = false
//! match_rings(rings)
//!   normalize          shuffle, then stable sort (strongest_first)
//!   first fill         greedy walk, counters per ring
//!   replacement        only if a bundle was skipped for capacity and
//!                      unused supply is left in the tail
//! ```
//!
//! Scratch state (counters, deltas, tail marks) is leased from the
//! process-wide pools for the duration of one call.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::{PoolConfig, RefereeConfig};
use crate::referee::counters::Counters;
use crate::referee::ordering::{strongest_first, weakest_first};
use crate::referee::pool::{COUNTERS, FLAGS, INDICES};
use crate::referee::rng::ProcessRng;
use crate::types::{find_ring, requested_slots, BidRequest, Bundle, Equipment, EquipmentRef, MatchSummary, Money, Ring};

/// Winners of one match together with its summary.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub winners: Vec<EquipmentRef>,
    pub summary: MatchSummary,
}

/// Result of the greedy pass.
struct FirstFill {
    winners: Vec<EquipmentRef>,
    /// Ring slots still open when the walk ended.
    open_slots: usize,
    /// Start of the unprocessed suffix, set only when a bundle was skipped
    /// for lack of capacity before the walk ran out of room.
    tail_start: Option<usize>,
}

/// Auction referee.
///
/// One referee serves one auction. It is not synchronized; build a new one
/// per request.
///
/// # Example
///
/// ```
/// use ad_referee::referee::Referee;
/// use ad_referee::types::{Ad, Money, Ring};
///
/// let mut referee = Referee::new();
/// for (id, bid) in [("a", 1), ("b", 7), ("c", 2)] {
///     referee.push_one(Ad::new(id, "top", Money::from_units(bid)).into_ref());
/// }
///
/// let winners = referee.match_rings(&[Ring::new("top", 2)]);
/// let ids: Vec<_> = winners.iter().map(|w| w.id()).collect();
/// assert_eq!(ids, vec!["b", "c"]);
/// ```
#[derive(Debug)]
pub struct Referee<R = ProcessRng> {
    equipment: Vec<EquipmentRef>,
    normalized: bool,
    rng: R,
    config: RefereeConfig,
}

impl Default for Referee<ProcessRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Referee<ProcessRng> {
    /// Referee shuffling from the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(ProcessRng)
    }

    pub fn with_config(config: RefereeConfig) -> Self {
        Self::with_rng_and_config(ProcessRng, config)
    }
}

impl<R: Rng> Referee<R> {
    /// Referee shuffling from `rng`, e.g. a seeded generator in tests.
    pub fn with_rng(rng: R) -> Self {
        Self::with_rng_and_config(rng, RefereeConfig::default())
    }

    pub fn with_rng_and_config(rng: R, config: RefereeConfig) -> Self {
        Self {
            equipment: Vec::new(),
            normalized: false,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &RefereeConfig {
        &self.config
    }

    // ========================================================================
    // Pool
    // ========================================================================

    /// Append candidates. Nothing is checked or deduplicated.
    pub fn push<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = EquipmentRef>,
    {
        self.equipment.extend(items);
        self.normalized = false;
    }

    pub fn push_one(&mut self, item: EquipmentRef) {
        self.equipment.push(item);
        self.normalized = false;
    }

    /// Current pool, in processing order once a match has run.
    #[inline]
    pub fn equipment(&self) -> &[EquipmentRef] {
        &self.equipment
    }

    /// Ring slots the whole pool would occupy.
    pub fn total_capacity(&self) -> usize {
        self.equipment.iter().map(|item| item.capacity()).sum()
    }

    fn normalize(&mut self) {
        if self.normalized {
            return;
        }
        self.equipment.shuffle(&mut self.rng);
        self.equipment
            .sort_by(|a, b| strongest_first(a.as_ref(), b.as_ref()));
        self.normalized = true;
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Award ring slots. Bundles in the result are always complete.
    pub fn match_rings(&mut self, rings: &[Ring]) -> Vec<EquipmentRef> {
        self.run(rings).0
    }

    /// One ring per impression of `request`, then [`match_rings`](Self::match_rings).
    pub fn match_request<B>(&mut self, request: &B) -> Vec<EquipmentRef>
    where
        B: BidRequest + ?Sized,
    {
        self.match_rings(&request.rings())
    }

    /// Like [`match_rings`](Self::match_rings), with a summary of the outcome.
    pub fn match_report(&mut self, rings: &[Ring]) -> MatchReport {
        let (winners, bundles_replaced) = self.run(rings);

        let slots_filled: usize = winners.iter().map(|w| w.capacity()).sum();
        let total_value = winners
            .iter()
            .map(|w| w.internal_auction_bid())
            .sum::<Money>();

        let summary = MatchSummary {
            rings: rings.len() as u64,
            slots_requested: requested_slots(rings) as u64,
            slots_filled: slots_filled as u64,
            equipment_considered: self.equipment.len() as u64,
            winners: winners.len() as u64,
            bundles_replaced: bundles_replaced as u64,
            total_value: total_value.raw(),
            outcome_root: MatchSummary::compute_outcome_root(&winners),
        };

        MatchReport { winners, summary }
    }

    /// Both phases. Returns the winners and how many bundles were replaced.
    fn run(&mut self, rings: &[Ring]) -> (Vec<EquipmentRef>, usize) {
        if rings.is_empty() || self.equipment.is_empty() {
            return (Vec::new(), 0);
        }
        self.normalize();

        let limits = self.config.pool;
        let mut fills = COUNTERS.lease(limits);
        let mut deltas = COUNTERS.lease(limits);
        fills.reset_to(rings.len());

        let FirstFill {
            mut winners,
            open_slots,
            tail_start,
        } = self.first_fill(rings, &mut fills, &mut deltas);

        let used = requested_slots(rings) - open_slots;
        let replaced = match tail_start {
            Some(start) if self.config.replacement && used < self.total_capacity() => {
                replace_weak_bundles(&mut winners, &self.equipment[start..], limits)
            }
            _ => 0,
        };

        debug!(
            rings = rings.len(),
            equipment = self.equipment.len(),
            winners = winners.len(),
            slots_used = used,
            tail = tail_start.map_or(0, |start| self.equipment.len() - start),
            replaced,
            "match complete"
        );

        (winners, replaced)
    }

    /// Greedy walk over the normalized pool.
    fn first_fill(&self, rings: &[Ring], fills: &mut Counters, deltas: &mut Counters) -> FirstFill {
        let mut open_slots = requested_slots(rings);
        let mut winners = Vec::with_capacity(open_slots.min(self.equipment.len()));
        let mut bundle_skipped = false;
        let mut tail_start = None;

        for (index, item) in self.equipment.iter().enumerate() {
            if open_slots < 1 {
                if bundle_skipped {
                    tail_start = Some(index);
                }
                break;
            }

            match item.as_bundle() {
                None => {
                    let Some(ring) = find_ring(rings, item.impression_id()) else {
                        continue;
                    };
                    if !fills.has_room(ring, rings) {
                        continue;
                    }
                    fills.increment(ring, 1);
                    open_slots -= 1;
                }
                Some(bundle) => {
                    let needed = bundle.count();
                    if open_slots < needed {
                        bundle_skipped = true;
                        continue;
                    }
                    if !place_bundle(bundle, rings, fills, deltas) {
                        trace!(bundle = bundle.id(), "bundle does not fit remaining rings");
                        continue;
                    }
                    open_slots -= needed;
                }
            }

            winners.push(Arc::clone(item));
        }

        FirstFill {
            winners,
            open_slots,
            tail_start,
        }
    }
}

/// Commit a bundle's per-ring deltas if every ring has room for them.
///
/// Empty bundles and sub-items that target no ring make the bundle
/// unplaceable.
fn place_bundle(bundle: &dyn Bundle, rings: &[Ring], fills: &mut Counters, deltas: &mut Counters) -> bool {
    if bundle.count() == 0 {
        return false;
    }
    deltas.reset_to(rings.len());

    let mut resolved = 0;
    for ad in bundle.ads() {
        if let Some(ring) = find_ring(rings, ad.impression_id()) {
            deltas.increment(ring, 1);
            resolved += 1;
        }
    }
    if resolved != bundle.count() {
        return false;
    }

    fills.commit(deltas, rings)
}

/// Swap weak bundles in `winners` for singles from `tail`.
///
/// Walks weakest first and stops at the first single: only bundles weaker
/// than every awarded single are ever reconsidered. Returns the number of
/// bundles replaced.
fn replace_weak_bundles(winners: &mut Vec<EquipmentRef>, tail: &[EquipmentRef], limits: PoolConfig) -> usize {
    winners.sort_by(|a, b| weakest_first(a.as_ref(), b.as_ref()));

    let mut consumed = FLAGS.lease(limits);
    consumed.resize(tail.len(), false);
    let mut collected = INDICES.lease(limits);

    let mut available = tail.len();
    let mut replaced = 0;
    let walk = winners.len();

    for index in 0..walk {
        if available == 0 {
            break;
        }
        let entry = Arc::clone(&winners[index]);
        let Some(bundle) = entry.as_bundle() else {
            break;
        };
        if bundle.count() > available {
            continue;
        }

        collected.clear();
        if !collect_replacement(bundle, tail, &mut consumed, &mut collected) {
            continue;
        }

        trace!(bundle = bundle.id(), singles = collected.len(), "bundle replaced");
        available -= collected.len();
        winners[index] = Arc::clone(&tail[collected[0]]);
        winners.extend(collected[1..].iter().map(|&t| Arc::clone(&tail[t])));
        replaced += 1;
    }

    replaced
}

/// Find one unused tail single per bundle sub-item, matched by impression.
///
/// On success `collected` holds the tail indices (in sub-item order) and
/// they stay marked in `consumed`. On failure both are restored.
fn collect_replacement(
    bundle: &dyn Bundle,
    tail: &[EquipmentRef],
    consumed: &mut [bool],
    collected: &mut Vec<usize>,
) -> bool {
    for ad in bundle.ads() {
        let hit = tail.iter().enumerate().position(|(i, candidate)| {
            !consumed[i] && candidate.as_bundle().is_none() && candidate.impression_id() == ad.impression_id()
        });
        if let Some(i) = hit {
            consumed[i] = true;
            collected.push(i);
        }
    }

    if !collected.is_empty() && collected.len() == bundle.count() {
        return true;
    }

    for &i in collected.iter() {
        consumed[i] = false;
    }
    collected.clear();
    false
}

// ============================================================================
// Unit Tests
// ============================================================================
