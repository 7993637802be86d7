//! Core data types for the ad referee
//!
//! ## Types
//!
//! - [`Equipment`] / [`Bundle`]: candidate responses and their bundle extension
//! - [`Ad`] / [`AdBundle`]: plain implementations of the above
//! - [`Ring`]: a placement request with a winner count
//! - [`BidRequest`]: request shape that rings are derived from
//! - [`Money`]: fixed-point bid amount
//! - [`MatchSummary`]: deterministic digest of one match outcome
//!
//! ## Fixed-Point Arithmetic
//!
//! All bids are stored as `u64` scaled by 10^8.
//! Example: 0.35 is stored as 35_000_000u64

mod equipment;
mod ring;
mod summary;
pub mod money;

pub use equipment::{Ad, AdBundle, Bundle, Equipment, EquipmentRef};
pub use money::Money;
pub use ring::{find_ring, requested_slots, AuctionRequest, BidRequest, Impression, ImpressionSlot, Ring};
pub use summary::MatchSummary;
