//! Helpers for solving programming puzzles.
//!
//! The centre of the crate is [`Cache`], a memoization cache that resolves
//! functions by name and stores their results per argument fingerprint.
//! Around it sit puzzle input retrieval, an answer checking harness and a
//! few sample solvers.

pub mod cache;
pub mod cli;
pub mod config;
pub mod puzzle;
pub mod solutions;
pub mod utils;
pub mod value;

pub use cache::{Cache, CacheError, CacheStats, CachedFn, fingerprint_args};
pub use puzzlekit_fingerprint::{
    Fingerprint, commutative_hash, commutative_hash_pairs, pair_hash,
};
pub use value::{ArgumentError, Value, ValueKind};

#[doc(hidden)]
pub use inventory;
