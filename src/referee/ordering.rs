//! Equipment ranking for the greedy fill and the replacement pass.
//!
//! ## Greedy Order ([`strongest_first`])
//!
//! 1. Bundles before singles
//! 2. Larger bundles before smaller ones
//! 3. Higher per-slot value first
//!
//! Bundles need room in several rings at once, so they go while every ring
//! is still empty.
//!
//! ## Replacement Order ([`weakest_first`])
//!
//! Ascending per-slot value; on a tie a bundle comes before a single so the
//! replacement walk still reaches it.
//!
//! Both are strict weak orderings meant for the stable `sort_by`.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::types::Equipment;

/// Bid per occupied slot: `bid / count` for bundles, the bid for singles.
#[inline]
pub fn per_slot_value(item: &dyn Equipment) -> Decimal {
    item.internal_auction_bid().per_slot(item.capacity())
}

/// Sub-item count for bundles, `None` for singles.
#[inline]
fn bundle_size(item: &dyn Equipment) -> Option<usize> {
    item.as_bundle().map(|bundle| bundle.count())
}

/// Greedy processing order.
pub fn strongest_first(a: &dyn Equipment, b: &dyn Equipment) -> Ordering {
    let by_shape = match (bundle_size(a), bundle_size(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_shape.then_with(|| per_slot_value(b).cmp(&per_slot_value(a)))
}

/// Replacement walk order.
pub fn weakest_first(a: &dyn Equipment, b: &dyn Equipment) -> Ordering {
    per_slot_value(a).cmp(&per_slot_value(b)).then_with(|| {
        let a_bundle = a.as_bundle().is_some();
        let b_bundle = b.as_bundle().is_some();
        b_bundle.cmp(&a_bundle)
    })
}

// ============================================================================
// Unit Tests
// ============================================================================
