//! AES round transformations.
//!
//! The state is a flat column-major [`Block`]: byte `4c + r` sits in row `r`,
//! column `c`. [`to_rows`] and [`from_rows`] are the only places that convert
//! between the flat layout and the row view.

use crate::block::{xor_in_place, Block};
use crate::sbox::sbox;

/// State viewed as four rows of four bytes.
pub type Rows = [[u8; 4]; 4];

/// Splits a column-major block into its rows.
#[inline]
pub fn to_rows(state: &Block) -> Rows {
    core::array::from_fn(|r| core::array::from_fn(|c| state[4 * c + r]))
}

/// Reassembles a column-major block from its rows.
#[inline]
pub fn from_rows(rows: &Rows) -> Block {
    core::array::from_fn(|i| rows[i % 4][i / 4])
}

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r` positions.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let mut rows = to_rows(state);
    for (r, row) in rows.iter_mut().enumerate() {
        row.rotate_left(r);
    }
    *state = from_rows(&rows);
}

/// Multiplies by `x` in GF(2^8) modulo the AES polynomial.
#[inline]
fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ 0x1b
    } else {
        shifted
    }
}

fn mix_single_column(col: &mut [u8]) {
    let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
    col[0] = xtime(a0) ^ (xtime(a1) ^ a1) ^ a2 ^ a3;
    col[1] = a0 ^ xtime(a1) ^ (xtime(a2) ^ a2) ^ a3;
    col[2] = a0 ^ a1 ^ xtime(a2) ^ (xtime(a3) ^ a3);
    col[3] = (xtime(a0) ^ a0) ^ a1 ^ a2 ^ xtime(a3);
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        mix_single_column(column);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}
