//! Match summary: a compact, deterministic record of one match outcome.
//!
//! ## Outcome Root
//!
//! The 32-byte outcome root is a SHA-256 hash over every filled slot as an
//! `(impression_id, bid)` pair, sorted before hashing. Bundles contribute one
//! pair per sub-item. Two matches that award the same values to the same
//! impressions share a root even when the shuffle put equal candidates in a
//! different order.

use ssz_rs::prelude::*;
use sha2::{Sha256, Digest};

use crate::types::EquipmentRef;

/// Summary of a single `match_report` call.
///
/// ## Example
///
/// ```
/// use ad_referee::types::MatchSummary;
///
/// let summary = MatchSummary::default();
/// assert!(summary.is_empty());
/// assert_eq!(summary.fill_rate(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct MatchSummary {
    /// Number of rings matched against
    pub rings: u64,

    /// Sum of requested winners over all rings
    pub slots_requested: u64,

    /// Ring slots occupied by the winners
    pub slots_filled: u64,

    /// Equipment items in the pool at match time
    pub equipment_considered: u64,

    /// Entries in the winner list (a bundle counts once)
    pub winners: u64,

    /// Bundles swapped out by the replacement pass
    pub bundles_replaced: u64,

    /// Sum of winning bids, raw fixed-point
    pub total_value: u64,

    /// SHA-256 over the sorted (impression, bid) slot list
    pub outcome_root: [u8; 32],
}

impl MatchSummary {
    /// Hash the value outcome of a winner list.
    pub fn compute_outcome_root(winners: &[EquipmentRef]) -> [u8; 32] {
        let mut slots: Vec<(&str, u64)> = Vec::with_capacity(winners.len());
        for item in winners {
            match item.as_bundle() {
                Some(bundle) => slots.extend(
                    bundle
                        .ads()
                        .iter()
                        .map(|ad| (ad.impression_id(), ad.internal_auction_bid().raw())),
                ),
                None => slots.push((item.impression_id(), item.internal_auction_bid().raw())),
            }
        }
        slots.sort_unstable();

        let mut hasher = Sha256::new();
        for (impression_id, bid) in &slots {
            hasher.update(impression_id.as_bytes());
            hasher.update([0u8]);
            hasher.update(bid.to_le_bytes());
        }
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the outcome root as a hex string
    pub fn outcome_root_hex(&self) -> String {
        hex::encode(self.outcome_root)
    }

    /// True when nothing was awarded.
    pub fn is_empty(&self) -> bool {
        self.winners == 0
    }

    /// Filled slots over requested slots; `None` when nothing was requested.
    pub fn fill_rate(&self) -> Option<f64> {
        if self.slots_requested == 0 {
            None
        } else {
            Some(self.slots_filled as f64 / self.slots_requested as f64)
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
