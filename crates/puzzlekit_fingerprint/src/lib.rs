//! Argument fingerprinting and integer pairing hashes.
//!
//! A fingerprint is a 64-bit signed summary of a value. It is a hash, not an
//! identity: two values with equal fingerprints are treated as equal by the
//! memoization cache that consumes them.

mod fingerprint;
mod fnv;
mod pairing;

pub use fingerprint::{
    Fingerprint, fingerprint_concat, fingerprint_sequence, fingerprint_text, generic_hash,
};
pub use fnv::{Fnv1a, fnv1a};
pub use pairing::{commutative_hash, commutative_hash_pairs, pair_hash};
