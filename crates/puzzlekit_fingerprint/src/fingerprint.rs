use std::hash::{Hash, Hasher};

use ahash::AHasher;

use crate::fnv::{Fnv1a, fnv1a};
use crate::pairing::pair_hash;

/// Values that can be reduced to a 64-bit fingerprint.
///
/// Fingerprints are deterministic within one build. Text goes through FNV-1a
/// and is stable across runs; values without a dedicated rule fall back to
/// [`generic_hash`].
pub trait Fingerprint {
    fn fingerprint(&self) -> i64;

    /// Fingerprint of an ordered slice of `Self`.
    ///
    /// Defaults to [`fingerprint_sequence`]. Text types override this to hash
    /// the concatenation of their elements instead.
    fn fingerprint_slice(items: &[Self]) -> i64
    where
        Self: Sized,
    {
        fingerprint_sequence(items)
    }
}

/// FNV-1a of the UTF-8 bytes of `text`.
pub fn fingerprint_text(text: &str) -> i64 {
    fnv1a(text.as_bytes()) as i64
}

/// Fingerprint of the parts joined with no separator.
///
/// `["ab", "c"]` and `["a", "bc"]` collide.
pub fn fingerprint_concat<S: AsRef<str>>(parts: &[S]) -> i64 {
    let mut state = Fnv1a::new();
    for part in parts {
        state.write(part.as_ref().as_bytes());
    }
    state.finish() as i64
}

/// Folds the decimal form of each element's fingerprint, left to right, into
/// one text fingerprint. Order- and length-sensitive.
pub fn fingerprint_sequence<T: Fingerprint>(items: &[T]) -> i64 {
    let mut state = Fnv1a::new();
    for item in items {
        state.write(item.fingerprint().to_string().as_bytes());
    }
    state.finish() as i64
}

/// Structural hash for values with no dedicated fingerprint rule.
pub fn generic_hash<T: Hash + ?Sized>(value: &T) -> i64 {
    let mut hasher = AHasher::default();
    value.hash(&mut hasher);
    hasher.finish() as i64
}

macro_rules! generic_fingerprint {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Fingerprint for $ty {
                fn fingerprint(&self) -> i64 {
                    generic_hash(self)
                }
            }
        )*
    };
}

generic_fingerprint!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize
);

impl Fingerprint for (i64, i64) {
    fn fingerprint(&self) -> i64 {
        pair_hash(self.0, self.1)
    }
}

impl Fingerprint for str {
    fn fingerprint(&self) -> i64 {
        fingerprint_text(self)
    }
}

impl Fingerprint for &str {
    fn fingerprint(&self) -> i64 {
        fingerprint_text(self)
    }

    fn fingerprint_slice(items: &[Self]) -> i64 {
        fingerprint_concat(items)
    }
}

impl Fingerprint for String {
    fn fingerprint(&self) -> i64 {
        fingerprint_text(self)
    }

    fn fingerprint_slice(items: &[Self]) -> i64 {
        fingerprint_concat(items)
    }
}

impl<T: Fingerprint> Fingerprint for [T] {
    fn fingerprint(&self) -> i64 {
        T::fingerprint_slice(self)
    }
}

impl<T: Fingerprint, const N: usize> Fingerprint for [T; N] {
    fn fingerprint(&self) -> i64 {
        T::fingerprint_slice(self)
    }
}

impl<T: Fingerprint> Fingerprint for Vec<T> {
    fn fingerprint(&self) -> i64 {
        T::fingerprint_slice(self)
    }
}
