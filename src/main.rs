//! Ad Referee - Binary Entry Point
//!
//! Runs one sample multi-impression auction and prints the winners.
//! Pass a TOML config path as the first argument to override defaults;
//! set `RUST_LOG=ad_referee=debug` to see match logs.

use std::process::ExitCode;

use ad_referee::types::{Ad, AdBundle, AuctionRequest, BidRequest, Equipment, Impression, Money};
use ad_referee::{Referee, RefereeConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match RefereeConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "failed to load config");
                return ExitCode::FAILURE;
            }
        },
        None => RefereeConfig::default(),
    };

    let request = AuctionRequest::new(vec![
        Impression::new("leaderboard", 2),
        Impression::new("sidebar", 1),
        Impression::new("footer", 1),
    ]);

    let mut referee = Referee::with_config(config);
    referee.push(vec![
        AdBundle::new(
            "takeover",
            vec![
                Ad::new("takeover-lb", "leaderboard", Money::from_units(3)).into_ref(),
                Ad::new("takeover-sb", "sidebar", Money::from_units(2)).into_ref(),
                Ad::new("takeover-ft", "footer", Money::from_units(1)).into_ref(),
            ],
        )
        .into_ref(),
        Ad::new("rtb-1", "leaderboard", Money::parse("4.25").unwrap_or_default()).into_ref(),
        Ad::new("rtb-2", "leaderboard", Money::parse("1.10").unwrap_or_default()).into_ref(),
        Ad::new("house-1", "sidebar", Money::parse("0.50").unwrap_or_default()).into_ref(),
        Ad::new("house-2", "footer", Money::parse("0.20").unwrap_or_default()).into_ref(),
    ]);

    println!("===========================================");
    println!("  Ad Referee - sample auction");
    println!("===========================================");
    println!();
    println!("Candidates: {} (capacity {})", referee.equipment().len(), referee.total_capacity());

    let report = referee.match_report(&request.rings());

    println!();
    println!("Winners:");
    for winner in &report.winners {
        match winner.as_bundle() {
            Some(bundle) => {
                println!("  {} (bundle, {} slots, {})", winner.id(), bundle.count(), winner.internal_auction_bid());
                for ad in bundle.ads() {
                    println!("    - {} -> {} @ {}", ad.id(), ad.impression_id(), ad.internal_auction_bid());
                }
            }
            None => println!("  {} -> {} @ {}", winner.id(), winner.impression_id(), winner.internal_auction_bid()),
        }
    }

    let summary = &report.summary;
    println!();
    println!("Slots filled: {}/{}", summary.slots_filled, summary.slots_requested);
    println!("Total value:  {}", Money::from_raw(summary.total_value));
    println!("Outcome root: {}", summary.outcome_root_hex());

    ExitCode::SUCCESS
}
