//! Seeded random number generation.
//!
//! Every stochastic decision of a run draws from one explicitly threaded
//! generator, so a seed fully determines the run. ChaCha8 is portable
//! across platforms and versions, which keeps snapshots reproducible.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator type used by the engine.
pub type MoeadRng = ChaCha8Rng;

/// Creates a generator from a single integer seed.
pub fn create_rng(seed: u64) -> MoeadRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws a value uniformly from the open interval (0, 1).
pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u > 0.0 {
            return u;
        }
    }
}

/// Shuffles a slice in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Returns a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    shuffle(&mut perm, rng);
    perm
}
