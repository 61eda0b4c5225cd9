//! Subkey generation (NIST SP 800-38B, section 6.1).

use core::fmt;

use aes_core::{encrypt_block, Block, RoundKeys, ZERO_BLOCK};

/// Reduction constant `R_128` for a 128-bit block.
const RB: u8 = 0x87;

/// CMAC subkeys `K1` (complete final block) and `K2` (padded final block).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Subkeys {
    /// Subkey XORed into a complete final block.
    pub k1: Block,
    /// Subkey XORed into a padded final block.
    pub k2: Block,
}

impl fmt::Debug for Subkeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subkeys").finish_non_exhaustive()
    }
}

/// Shifts a block left by one bit, returning the bit shifted out of byte 0.
fn shift_left_one(block: &Block) -> (Block, u8) {
    let mut out = [0u8; 16];
    let mut carry = 0u8;
    for (dst, &byte) in out.iter_mut().zip(block).rev() {
        *dst = (byte << 1) | carry;
        carry = byte >> 7;
    }
    (out, carry)
}

/// Doubles a block in GF(2^128): shift left one bit, reducing by `0x87` on overflow.
pub fn dbl(block: &Block) -> Block {
    let (mut out, msb) = shift_left_one(block);
    if msb != 0 {
        out[15] ^= RB;
    }
    out
}

/// Derives `K1 = dbl(L)` and `K2 = dbl(K1)` where `L = E_K(0^128)`.
pub fn derive_subkeys(round_keys: &RoundKeys) -> Subkeys {
    let l = encrypt_block(&ZERO_BLOCK, round_keys);
    let k1 = dbl(&l);
    let k2 = dbl(&k1);
    Subkeys { k1, k2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes_core::{expand_key, Aes128Key};
    use rand::RngCore;

    fn block_from_hex(s: &str) -> Block {
        let mut out = [0u8; 16];
        hex::decode_to_slice(s, &mut out).expect("valid hex");
        out
    }

    #[test]
    fn shift_carries_across_bytes() {
        let mut block = [0u8; 16];
        block[15] = 0x80;
        block[1] = 0x01;
        let (shifted, msb) = shift_left_one(&block);
        assert_eq!(msb, 0);
        assert_eq!(shifted[14], 0x01);
        assert_eq!(shifted[15], 0x00);
        assert_eq!(shifted[1], 0x02);
    }

    #[test]
    fn dbl_reduces_only_when_msb_set() {
        let mut high = [0u8; 16];
        high[0] = 0x80;
        let doubled = dbl(&high);
        let mut expected = [0u8; 16];
        expected[15] = 0x87;
        assert_eq!(doubled, expected);

        let mut low = [0u8; 16];
        low[15] = 0x01;
        let mut expected = [0u8; 16];
        expected[15] = 0x02;
        assert_eq!(dbl(&low), expected);
    }

    #[test]
    fn sp800_38b_example_subkeys() {
        let key = Aes128Key::from(block_from_hex("2b7e151628aed2a6abf7158809cf4f3c"));
        let round_keys = expand_key(&key);
        assert_eq!(
            encrypt_block(&ZERO_BLOCK, &round_keys),
            block_from_hex("7df76b0c1ab899b33e42f047b91b546f")
        );
        let subkeys = derive_subkeys(&round_keys);
        assert_eq!(subkeys.k1, block_from_hex("fbeed618357133667c85e08f7236a8de"));
        assert_eq!(subkeys.k2, block_from_hex("f7ddac306ae266ccf90bc11ee46d513b"));
    }

    #[test]
    fn subkeys_are_consistent_doublings_of_l() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let mut key_bytes = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            let round_keys = expand_key(&Aes128Key::from(key_bytes));
            let l = encrypt_block(&ZERO_BLOCK, &round_keys);
            let subkeys = derive_subkeys(&round_keys);
            assert_eq!(subkeys.k1, dbl(&l));
            assert_eq!(subkeys.k2, dbl(&subkeys.k1));
            assert_eq!(subkeys, derive_subkeys(&round_keys));
        }
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let subkeys = Subkeys {
            k1: [0xab; 16],
            k2: [0xcd; 16],
        };
        let rendered = format!("{subkeys:?}");
        assert!(!rendered.contains("171"));
        assert!(!rendered.contains("ab"));
    }
}
