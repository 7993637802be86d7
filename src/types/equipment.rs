//! Candidate ad responses ("equipment") competing for placements.
//!
//! ## Variants
//!
//! - **Single**: any [`Equipment`] whose [`as_bundle`](Equipment::as_bundle)
//!   returns `None`. It targets exactly one impression.
//! - **Bundle**: equipment that also implements [`Bundle`]. Its sub-items may
//!   target different impressions and are awarded all together or not at all.
//!
//! Upstream sources (in-process inventory, OpenRTB bidders) implement the
//! traits on their own response types. [`Ad`] and [`AdBundle`] are plain
//! implementations used by callers that already hold priced values.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use ad_referee::types::{Ad, AdBundle, Equipment, Money};
//!
//! let bundle = AdBundle::new("b1", vec![
//!     Arc::new(Ad::new("b1-top", "top", Money::from_units(2))),
//!     Arc::new(Ad::new("b1-side", "side", Money::from_units(1))),
//! ]);
//!
//! assert_eq!(bundle.capacity(), 2);
//! assert_eq!(bundle.internal_auction_bid(), Money::from_units(3));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::EquipmentError;
use crate::types::Money;

/// Shared handle to pooled equipment. Results hold clones of these handles.
pub type EquipmentRef = Arc<dyn Equipment>;

/// Capability set shared by singles and bundles.
pub trait Equipment: fmt::Debug + Send + Sync {
    /// Opaque identifier.
    fn id(&self) -> &str;

    /// Impression this item targets. For bundles the referee evaluates each
    /// sub-item instead.
    fn impression_id(&self) -> &str;

    /// Value used for ranking. Bundles report the sum over their sub-items.
    fn internal_auction_bid(&self) -> Money;

    /// Validity as computed upstream.
    fn validate(&self) -> Result<(), EquipmentError> {
        Ok(())
    }

    /// Bundle view of this item, if it is one.
    fn as_bundle(&self) -> Option<&dyn Bundle> {
        None
    }

    /// Ring slots this item consumes when placed.
    fn capacity(&self) -> usize {
        self.as_bundle().map_or(1, |bundle| bundle.count())
    }
}

/// Atomic group of singles spanning one or more impressions.
pub trait Bundle: Equipment {
    /// Ordered sub-items.
    fn ads(&self) -> &[EquipmentRef];

    /// Number of sub-items.
    fn count(&self) -> usize {
        self.ads().len()
    }
}

// ============================================================================
// Ad
// ============================================================================

/// A priced single response bound to one impression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ad {
    id: String,
    impression_id: String,
    bid: Money,
    rejection: Option<String>,
}

impl Ad {
    pub fn new(id: impl Into<String>, impression_id: impl Into<String>, bid: Money) -> Self {
        Self {
            id: id.into(),
            impression_id: impression_id.into(),
            bid,
            rejection: None,
        }
    }

    /// Carry an upstream rejection reason, reported by `validate`.
    pub fn with_rejection(mut self, reason: impl Into<String>) -> Self {
        self.rejection = Some(reason.into());
        self
    }

    /// Convenience for wrapping into a pool handle.
    pub fn into_ref(self) -> EquipmentRef {
        Arc::new(self)
    }
}

impl Equipment for Ad {
    fn id(&self) -> &str {
        &self.id
    }

    fn impression_id(&self) -> &str {
        &self.impression_id
    }

    fn internal_auction_bid(&self) -> Money {
        self.bid
    }

    fn validate(&self) -> Result<(), EquipmentError> {
        if let Some(reason) = &self.rejection {
            return Err(EquipmentError::Rejected {
                id: self.id.clone(),
                reason: reason.clone(),
            });
        }
        if self.impression_id.is_empty() {
            return Err(EquipmentError::MissingImpression { id: self.id.clone() });
        }
        Ok(())
    }
}

// ============================================================================
// AdBundle
// ============================================================================

/// Ordered, fixed-size group of singles awarded atomically.
#[derive(Debug, Clone)]
pub struct AdBundle {
    id: String,
    ads: Vec<EquipmentRef>,
}

impl AdBundle {
    pub fn new(id: impl Into<String>, ads: Vec<EquipmentRef>) -> Self {
        Self { id: id.into(), ads }
    }

    pub fn into_ref(self) -> EquipmentRef {
        Arc::new(self)
    }
}

impl Equipment for AdBundle {
    fn id(&self) -> &str {
        &self.id
    }

    /// The first sub-item's impression, or `""` for an empty bundle.
    fn impression_id(&self) -> &str {
        self.ads.first().map_or("", |ad| ad.impression_id())
    }

    fn internal_auction_bid(&self) -> Money {
        self.ads.iter().map(|ad| ad.internal_auction_bid()).sum()
    }

    fn validate(&self) -> Result<(), EquipmentError> {
        if self.ads.is_empty() {
            return Err(EquipmentError::EmptyBundle { id: self.id.clone() });
        }
        for ad in &self.ads {
            if ad.as_bundle().is_some() {
                return Err(EquipmentError::InvalidAd {
                    id: self.id.clone(),
                    source: Box::new(EquipmentError::Rejected {
                        id: ad.id().to_owned(),
                        reason: "nested bundle".to_owned(),
                    }),
                });
            }
            ad.validate().map_err(|source| EquipmentError::InvalidAd {
                id: self.id.clone(),
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    fn as_bundle(&self) -> Option<&dyn Bundle> {
        Some(self)
    }
}

impl Bundle for AdBundle {
    fn ads(&self) -> &[EquipmentRef] {
        &self.ads
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(id: &str, imp: &str, units: u64) -> EquipmentRef {
        Ad::new(id, imp, Money::from_units(units)).into_ref()
    }

    #[test]
    fn test_ad_is_single() {
        let single = ad("a", "1", 5);
        assert!(single.as_bundle().is_none());
        assert_eq!(single.capacity(), 1);
        assert_eq!(single.impression_id(), "1");
        assert_eq!(single.internal_auction_bid(), Money::from_units(5));
    }

    #[test]
    fn test_bundle_capacity_and_bid() {
        let bundle = AdBundle::new("b", vec![ad("x", "1", 1), ad("y", "2", 2), ad("z", "3", 3)]);
        let view = bundle.as_bundle().unwrap();

        assert_eq!(view.count(), 3);
        assert_eq!(bundle.capacity(), 3);
        assert_eq!(bundle.internal_auction_bid(), Money::from_units(6));
        assert_eq!(bundle.impression_id(), "1");
    }

    #[test]
    fn test_validate_ad() {
        assert!(Ad::new("a", "1", Money::ZERO).validate().is_ok());
        assert_eq!(
            Ad::new("a", "", Money::ZERO).validate(),
            Err(EquipmentError::MissingImpression { id: "a".into() })
        );

        let rejected = Ad::new("a", "1", Money::ZERO).with_rejection("floor not met");
        let err = rejected.validate().unwrap_err();
        assert_eq!(err.to_string(), "equipment 'a' rejected: floor not met");
    }

    #[test]
    fn test_validate_bundle() {
        let empty = AdBundle::new("b", Vec::new());
        assert_eq!(empty.validate(), Err(EquipmentError::EmptyBundle { id: "b".into() }));
        assert_eq!(empty.impression_id(), "");

        let bad = AdBundle::new("b", vec![ad("x", "1", 1), ad("y", "", 1)]);
        match bad.validate() {
            Err(EquipmentError::InvalidAd { id, source }) => {
                assert_eq!(id, "b");
                assert_eq!(*source, EquipmentError::MissingImpression { id: "y".into() });
            }
            other => panic!("unexpected: {:?}", other),
        }

        let nested = AdBundle::new("outer", vec![AdBundle::new("inner", vec![ad("x", "1", 1)]).into_ref()]);
        assert!(matches!(nested.validate(), Err(EquipmentError::InvalidAd { .. })));
    }
}
