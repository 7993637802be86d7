//! Auction matching for the ad referee.
//!
//! ## Design Principles
//!
//! 1. **Capacity first**: no ring ever receives more winners than it asked for
//! 2. **Atomic bundles**: a bundle is awarded whole or not at all
//! 3. **Synchronous Execution**: pure computation, no I/O, no locks held
//!    across a match
//! 4. **Bounded work**: `O(N·K)` per phase for N candidates and K rings
//!
//! ## Matching Rules
//!
//! - Bundles are placed first, largest first, while rings are still empty
//! - Singles follow by descending bid
//! - Equal candidates are ordered by a random shuffle, not insertion order
//! - A weak bundle may later be swapped for leftover singles covering the
//!   same impressions
//!
//! ## Example
//!
//! ```
//! use ad_referee::referee::Referee;
//! use ad_referee::types::{Ad, AdBundle, Money, Ring};
//!
//! let mut referee = Referee::new();
//! referee.push(vec![
//!     AdBundle::new("pair", vec![
//!         Ad::new("p1", "top", Money::from_units(2)).into_ref(),
//!         Ad::new("p2", "side", Money::from_units(2)).into_ref(),
//!     ]).into_ref(),
//!     Ad::new("s1", "top", Money::from_units(5)).into_ref(),
//! ]);
//!
//! let winners = referee.match_rings(&[Ring::new("top", 2), Ring::new("side", 1)]);
//! assert_eq!(winners.len(), 2);
//! assert_eq!(winners[0].id(), "pair");
//! ```

pub mod counters;
pub mod ordering;
pub mod pool;
pub mod rng;
#[allow(clippy::module_inception)]
mod referee;

pub use counters::Counters;
pub use referee::{MatchReport, Referee};
pub use rng::ProcessRng;
