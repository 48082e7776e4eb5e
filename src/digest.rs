//! Digest: size-dependent multiplicative string fingerprint.

/// Odd multiplier used for the rolling primary hash.
pub const MIX_A: u64 = 1_111_111_111_111_111_111;

/// Multiply by `MIX_A` and keep the top `size_bits` bits.
#[inline]
pub(crate) fn mix_a(x: u64, size_bits: u32) -> u64 {
    debug_assert!((1..=64).contains(&size_bits));
    x.wrapping_mul(MIX_A) >> (64 - size_bits)
}

/// Compute the primary digest of `key` for a table of `2^size_bits` slots.
///
/// The result depends on `size_bits`; entries must be re-digested whenever
/// the table changes size. Bytes are folded in as unsigned values.
pub fn digest(key: &[u8], size_bits: u32) -> u64 {
    let acc = key
        .iter()
        .fold(0u64, |acc, b| mix_a(acc, size_bits).wrapping_add(u64::from(*b)));
    mix_a(acc, size_bits)
}
