//! Bit tricks on 64-bit bitmap words.

const DEBRUIJN: u64 = 0x03F5_66ED_2717_9461;

/// Maps the top six bits of `DEBRUIJN << i` back to `i`.
const DEBRUIJN_TABLE: [u8; 64] = {
    let mut table = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        table[((DEBRUIJN << i) >> 58) as usize] = i as u8;
        i += 1;
    }
    table
};

/// Clear the lowest set bit.
#[inline]
pub fn remove_rightmost(x: u64) -> u64 {
    x & x.wrapping_sub(1)
}

/// Keep only the lowest set bit.
#[inline]
pub fn extract_rightmost(x: u64) -> u64 {
    x & x.wrapping_neg()
}

/// Set every bit up to and including the lowest set bit, clear the rest.
/// All ones for zero.
#[inline]
pub fn smear_rightmost(x: u64) -> u64 {
    x ^ x.wrapping_sub(1)
}

/// Index of the lowest set bit. `x` must not be zero.
#[inline]
pub fn rightmost_index(x: u64) -> u32 {
    DEBRUIJN_TABLE[(extract_rightmost(x).wrapping_mul(DEBRUIJN) >> 58) as usize] as u32
}

#[inline]
pub fn popcount(mut x: u64) -> u32 {
    x -= (x >> 1) & 0x5555_5555_5555_5555;
    x = (x & 0x3333_3333_3333_3333) + ((x >> 2) & 0x3333_3333_3333_3333);
    x = (x + (x >> 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    (x.wrapping_mul(0x0101_0101_0101_0101) >> 56) as u32
}
