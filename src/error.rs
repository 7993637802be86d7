//! Error types.
//!
//! Matching itself never fails: bad input only shrinks the result. Errors are
//! reported at the edges, by equipment validation and configuration loading.

use thiserror::Error;

/// Why a piece of equipment is not fit to serve.
///
/// Produced by [`Equipment::validate`](crate::types::Equipment::validate).
/// The referee preserves these for callers but never consults them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipmentError {
    #[error("equipment '{id}' does not target an impression")]
    MissingImpression { id: String },

    #[error("bundle '{id}' has no ads")]
    EmptyBundle { id: String },

    #[error("bundle '{id}' contains an invalid ad: {source}")]
    InvalidAd {
        id: String,
        #[source]
        source: Box<EquipmentError>,
    },

    /// Upstream pricing or filtering rejected the response.
    #[error("equipment '{id}' rejected: {reason}")]
    Rejected { id: String, reason: String },
}

/// Failure to load a [`RefereeConfig`](crate::config::RefereeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse referee config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid referee config: {0}")]
    Invalid(String),
}
