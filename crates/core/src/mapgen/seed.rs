//! Per-level seed derivation so a run seed reproduces every level independently.

use xxhash_rust::xxh3::xxh3_64_with_seed;

pub fn derive_level_seed(run_seed: u64, level: u32) -> u64 {
    xxh3_64_with_seed(&level.to_le_bytes(), run_seed)
}
