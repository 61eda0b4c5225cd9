//! Block representation helpers.

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes, laid out column-major as in FIPS-197.
pub type Block = [u8; BLOCK_SIZE];

/// The all-zero block.
pub const ZERO_BLOCK: Block = [0u8; BLOCK_SIZE];

/// XORs `rhs` into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs) {
        *d ^= *r;
    }
}

/// Returns `lhs ^ rhs` without touching either operand.
#[inline]
pub fn xor_blocks(lhs: &Block, rhs: &Block) -> Block {
    let mut out = *lhs;
    xor_in_place(&mut out, rhs);
    out
}
