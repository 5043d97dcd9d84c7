//! Seed-derived permutation of bit slot indices.
//!
//! The permutation is the shared secret between writer and reader: the
//! same seed bytes must reproduce the same ordering on both sides, so
//! the whole pipeline is deterministic: hash the seed, fold the digest
//! into a 64-bit value, and drive a Fisher–Yates shuffle from a
//! generator seeded with that value.
//!
//! Note that folding the digest bounds the effective keyspace at 64
//! bits no matter how long the seed is. The scrambling deters casual
//! discovery of the payload; it is not a defense against a determined
//! adversary.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

/// Returns a pseudo-random rearrangement of the integers in `[from, to)`.
///
/// The same `(seed, from, to)` always produces the same sequence.
/// Returns `None` when `to < from`.
pub fn permutation(seed: &[u8], from: usize, to: usize) -> Option<Vec<usize>> {
    if to < from {
        return None;
    }

    let mut nums: Vec<usize> = (from..to).collect();

    let mut rng = ChaCha20Rng::seed_from_u64(fold_seed(seed));
    nums.shuffle(&mut rng);

    Some(nums)
}

/// Folds a SHA-256 digest of the seed bytes into a 64-bit generator seed
/// by XOR-combining the big-endian halves of its first 16 bytes.
fn fold_seed(seed: &[u8]) -> u64 {
    let digest = Sha256::digest(seed);

    let mut high = [0u8; 8];
    let mut low = [0u8; 8];
    high.copy_from_slice(&digest[..8]);
    low.copy_from_slice(&digest[8..16]);

    u64::from_be_bytes(high) ^ u64::from_be_bytes(low)
}
