//! Seeded random streams
//!
//! All randomness is explicit: callers own a [`MutationRng`] and pass it by
//! reference. Planning draws from stream 0 of the seed; each mutant draws its
//! replacement operator from its own stream, so mutants can be built in any
//! order (or in parallel) and still come out identical.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 2873465893;

/// Deterministic, platform-independent random stream
pub type MutationRng = ChaCha8Rng;

/// Stream used to build a selection plan
pub fn planning_rng(seed: u64) -> MutationRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Stream used to pick the replacement operator of the `index`-th mutant
pub fn mutant_rng(seed: u64, index: usize) -> MutationRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64 + 1);
    rng
}
