/// Cantor pairing of two integers: `(x + y)(x + y + 1) / 2 + y`.
///
/// Injective over non-negative inputs and order-sensitive. Arithmetic wraps
/// on overflow.
pub const fn pair_hash(x: i64, y: i64) -> i64 {
    let sum = x.wrapping_add(y);
    sum.wrapping_mul(sum.wrapping_add(1))
        .wrapping_div(2)
        .wrapping_add(y)
}

/// Order-insensitive pairing: operands are put in ascending order first.
pub const fn commutative_hash(a: i64, b: i64) -> i64 {
    if a <= b {
        pair_hash(a, b)
    } else {
        pair_hash(b, a)
    }
}

/// Pairs each coordinate with [`pair_hash`], then combines the two results
/// with [`commutative_hash`].
pub const fn commutative_hash_pairs(first: (i64, i64), second: (i64, i64)) -> i64 {
    commutative_hash(pair_hash(first.0, first.1), pair_hash(second.0, second.1))
}
