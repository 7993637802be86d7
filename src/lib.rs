//! # Ad Referee
//!
//! Winner selection for a real-time ad exchange.
//!
//! ## Architecture
//!
//! - **Types**: Equipment (ads and bundles), rings, money, match summaries
//! - **Referee**: Two-phase matching of candidates onto placement rings
//! - **Config**: Tunables for the replacement pass and scratch pools
//!
//! ## Design Principles
//!
//! 1. **Best-effort fill**: Malformed candidates are skipped, never raised
//! 2. **No Floating Point**: Bids use fixed-point arithmetic (10^8 scaling)
//! 3. **Pooled Scratch Space**: Per-match buffers are reused across auctions
//! 4. **Synchronous Execution**: No async in the matching path
//!
//! Pricing, targeting and OpenRTB encoding happen upstream; the referee only
//! sees priced candidates and returns the winning subset.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Equipment, Ring, Money, MatchSummary
pub mod types;

/// Matching: Referee, ordering, counters, pools
pub mod referee;

/// Referee configuration
pub mod config;

/// Validation and configuration errors
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::RefereeConfig;
pub use error::{ConfigError, EquipmentError};
pub use referee::{MatchReport, Referee};
pub use types::{Ad, AdBundle, Bundle, Equipment, EquipmentRef, MatchSummary, Money, Ring};
