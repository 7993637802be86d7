//! Placement requests ("rings") and the request shape they are derived from.
//!
//! A ring is one impression of a bid request together with how many winners
//! it wants. Multi-impression requests produce several rings.

/// Placement request: impression identifier plus requested winner count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ring {
    pub id: String,
    pub count: usize,
}

impl Ring {
    pub fn new(id: impl Into<String>, count: usize) -> Self {
        Self { id: id.into(), count }
    }
}

/// Index of the first ring targeted by `impression_id`.
#[inline]
pub fn find_ring(rings: &[Ring], impression_id: &str) -> Option<usize> {
    rings.iter().position(|ring| ring.id == impression_id)
}

/// Sum of requested winners over all rings, saturating at `usize::MAX`.
pub fn requested_slots(rings: &[Ring]) -> usize {
    rings.iter().fold(0, |total, ring| total.saturating_add(ring.count))
}

/// One impression of a bid request, as seen by the referee.
pub trait ImpressionSlot {
    fn id(&self) -> &str;

    /// Number of winners the impression asks for.
    fn slot_count(&self) -> usize;
}

/// Anything carrying a list of impressions.
pub trait BidRequest {
    type Impression: ImpressionSlot;

    fn impressions(&self) -> &[Self::Impression];

    /// One ring per impression, in request order.
    fn rings(&self) -> Vec<Ring> {
        self.impressions()
            .iter()
            .map(|imp| Ring::new(imp.id(), imp.slot_count()))
            .collect()
    }
}

/// Minimal impression record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Impression {
    pub id: String,
    pub count: usize,
}

impl Impression {
    pub fn new(id: impl Into<String>, count: usize) -> Self {
        Self { id: id.into(), count }
    }
}

impl ImpressionSlot for Impression {
    fn id(&self) -> &str {
        &self.id
    }

    fn slot_count(&self) -> usize {
        self.count
    }
}

/// Minimal bid request: an ordered list of impressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuctionRequest {
    pub impressions: Vec<Impression>,
}

impl AuctionRequest {
    pub fn new(impressions: Vec<Impression>) -> Self {
        Self { impressions }
    }
}

impl BidRequest for AuctionRequest {
    type Impression = Impression;

    fn impressions(&self) -> &[Impression] {
        &self.impressions
    }
}
