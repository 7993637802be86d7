//! Property tests for the matching invariants.

use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ad_referee::types::{Ad, AdBundle, Bundle, Equipment, EquipmentRef, Money, Ring};
use ad_referee::{Referee, RefereeConfig};

/// Impressions candidates may target; the last one never gets a ring.
const IMPRESSIONS: [&str; 5] = ["r0", "r1", "r2", "r3", "stray"];

#[derive(Debug, Clone)]
enum Candidate {
    Single { imp: usize, bid: u64 },
    Bundle { parts: Vec<(usize, u64)> },
}

fn candidate(imps: usize) -> impl Strategy<Value = Candidate> {
    let part = (0..imps, 0u64..100);
    prop_oneof![
        3 => part.clone().prop_map(|(imp, bid)| Candidate::Single { imp, bid }),
        1 => prop::collection::vec(part, 1..4).prop_map(|parts| Candidate::Bundle { parts }),
    ]
}

fn build(candidates: &[Candidate]) -> Vec<EquipmentRef> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| match c {
            Candidate::Single { imp, bid } => {
                Ad::new(format!("s{i}"), IMPRESSIONS[*imp], Money::from_units(*bid)).into_ref()
            }
            Candidate::Bundle { parts } => {
                let ads = parts
                    .iter()
                    .enumerate()
                    .map(|(p, &(imp, bid))| {
                        Ad::new(format!("b{i}.{p}"), IMPRESSIONS[imp], Money::from_units(bid)).into_ref()
                    })
                    .collect();
                AdBundle::new(format!("b{i}"), ads).into_ref()
            }
        })
        .collect()
}

fn rings_from(counts: &[usize]) -> Vec<Ring> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &n)| Ring::new(IMPRESSIONS[i], n))
        .collect()
}

/// Slots taken per impression, bundles flattened.
fn usage(winners: &[EquipmentRef]) -> HashMap<String, usize> {
    let mut used = HashMap::new();
    for winner in winners {
        match winner.as_bundle() {
            Some(bundle) => {
                for ad in bundle.ads() {
                    *used.entry(ad.impression_id().to_owned()).or_default() += 1;
                }
            }
            None => *used.entry(winner.impression_id().to_owned()).or_default() += 1,
        }
    }
    used
}

fn run(pool: Vec<EquipmentRef>, rings: &[Ring], seed: u64, config: RefereeConfig) -> Vec<EquipmentRef> {
    let mut referee = Referee::with_rng_and_config(ChaCha8Rng::seed_from_u64(seed), config);
    referee.push(pool);
    referee.match_rings(rings)
}

proptest! {
    #[test]
    fn winners_respect_ring_counts(
        candidates in prop::collection::vec(candidate(IMPRESSIONS.len()), 0..40),
        counts in prop::collection::vec(0usize..5, 1..=4),
        seed in any::<u64>(),
    ) {
        let rings = rings_from(&counts);
        let winners = run(build(&candidates), &rings, seed, RefereeConfig::default());
        let used = usage(&winners);

        let requested: usize = counts.iter().sum();
        prop_assert!(used.values().sum::<usize>() <= requested);

        for (imp, n) in &used {
            let ring = rings.iter().find(|r| &r.id == imp);
            prop_assert!(ring.is_some(), "winner on unrequested impression {}", imp);
            prop_assert!(*n <= ring.map_or(0, |r| r.count));
        }
    }

    #[test]
    fn bundles_are_awarded_whole(
        candidates in prop::collection::vec(candidate(IMPRESSIONS.len()), 0..40),
        counts in prop::collection::vec(0usize..5, 1..=4),
        seed in any::<u64>(),
    ) {
        let rings = rings_from(&counts);
        let pool = build(&candidates);
        let winners = run(pool.clone(), &rings, seed, RefereeConfig::default());

        for winner in winners.iter().filter(|w| w.as_bundle().is_some()) {
            let original = pool.iter().find(|p| p.id() == winner.id());
            prop_assert_eq!(original.map(|p| p.capacity()), Some(winner.capacity()));
        }
    }

    #[test]
    fn everything_fits_when_demand_is_covered(
        candidates in prop::collection::vec(candidate(4), 0..30),
        extra in prop::collection::vec(0usize..3, 4),
        seed in any::<u64>(),
    ) {
        let pool = build(&candidates);

        let mut counts = extra.clone();
        for (imp, n) in usage(&pool) {
            if let Some(i) = IMPRESSIONS.iter().position(|&known| known == imp) {
                counts[i] += n;
            }
        }
        let rings = rings_from(&counts);

        let winners = run(pool.clone(), &rings, seed, RefereeConfig::default());
        prop_assert_eq!(winners.len(), pool.len());
    }

    #[test]
    fn replacement_never_loses_slots(
        candidates in prop::collection::vec(candidate(4), 0..40),
        counts in prop::collection::vec(0usize..5, 1..=4),
        seed in any::<u64>(),
    ) {
        let rings = rings_from(&counts);
        let pool = build(&candidates);

        let without = RefereeConfig { replacement: false, ..RefereeConfig::default() };
        let plain = run(pool.clone(), &rings, seed, without);
        let replaced = run(pool, &rings, seed, RefereeConfig::default());

        let filled = |w: &[EquipmentRef]| w.iter().map(|e| e.capacity()).sum::<usize>();
        prop_assert!(filled(&replaced) >= filled(&plain));
        prop_assert_eq!(usage(&replaced), usage(&plain));
    }
}
