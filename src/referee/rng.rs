//! Shuffle source for pool normalization.
//!
//! Referees default to [`ProcessRng`], which draws from `rand::thread_rng()`.
//! That generator keeps per-thread state, so any number of referees on any
//! number of threads can shuffle at once without contention. Tests inject a
//! seeded generator instead (see [`Referee::with_rng`](super::Referee::with_rng)).

use rand::RngCore;

/// Zero-sized handle onto the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRng;

impl RngCore for ProcessRng {
    fn next_u32(&mut self) -> u32 {
        rand::thread_rng().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        rand::thread_rng().next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::thread_rng().fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        rand::thread_rng().try_fill_bytes(dest)
    }
}
