//! CBC-MAC chaining with CMAC final-block handling (NIST SP 800-38B, section 6.2).

use core::fmt;

use aes_core::{encrypt_block, expand_key, xor_blocks, Aes128Key, Block, RoundKeys, ZERO_BLOCK};
use tracing::{debug, trace};

use crate::error::CmacError;
use crate::format::{format_last_block, leading_blocks};
use crate::subkey::{derive_subkeys, Subkeys};
use crate::tag::{Tag, TagLength};

/// Validates a raw key slice as an AES-128 key.
pub fn parse_key(key: &[u8]) -> Result<Aes128Key, CmacError> {
    let bytes: [u8; 16] = key.try_into().map_err(|_| {
        debug!(actual = key.len(), "rejecting key of wrong length");
        CmacError::InvalidKeyLength { actual: key.len() }
    })?;
    Ok(Aes128Key::from(bytes))
}

/// Key material derived once per key: the round-key schedule and both subkeys.
///
/// The value holds no interior mutability, so a single instance can be
/// shared by reference across threads.
#[derive(Clone, Copy)]
pub struct Cmac {
    round_keys: RoundKeys,
    subkeys: Subkeys,
}

impl fmt::Debug for Cmac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cmac").finish_non_exhaustive()
    }
}

impl Cmac {
    /// Expands `key` and derives its subkeys.
    pub fn new(key: &Aes128Key) -> Self {
        let round_keys = expand_key(key);
        let subkeys = derive_subkeys(&round_keys);
        Self {
            round_keys,
            subkeys,
        }
    }

    /// Like [`Cmac::new`], but takes an unchecked key slice.
    pub fn from_slice(key: &[u8]) -> Result<Self, CmacError> {
        parse_key(key).map(|key| Self::new(&key))
    }

    /// The expanded key schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// The cached `K1`/`K2` pair.
    pub fn subkeys(&self) -> &Subkeys {
        &self.subkeys
    }

    /// Computes the untruncated 128-bit MAC of `message`.
    pub fn compute_full(&self, message: &[u8]) -> Block {
        let last = format_last_block(message, &self.subkeys);
        trace!(
            len = message.len(),
            blocks = last.blocks,
            complete = last.complete,
            "chaining message blocks"
        );

        let x = leading_blocks(message).fold(ZERO_BLOCK, |x, block| {
            encrypt_block(&xor_blocks(&x, &block), &self.round_keys)
        });
        encrypt_block(&xor_blocks(&x, &last.block), &self.round_keys)
    }

    /// Computes the MAC of `message` truncated to `len` bits.
    pub fn compute(&self, message: &[u8], len: TagLength) -> Tag {
        Tag::from_block(&self.compute_full(message), len)
    }

    /// Recomputes the tag and compares it with `tag` in constant time.
    ///
    /// `tag` must hold exactly `ceil(len / 8)` bytes with unused low bits zero.
    pub fn verify(&self, message: &[u8], tag: &[u8], len: TagLength) -> bool {
        let ok = self.compute(message, len).matches(tag);
        trace!(tag_bits = len.bits(), ok, "verified tag");
        ok
    }
}

/// One-shot CMAC: validates key and tag length, then authenticates `message`.
pub fn compute_cmac(key: &[u8], message: &[u8], tag_bits: u32) -> Result<Tag, CmacError> {
    let len = TagLength::new(tag_bits)?;
    let cmac = Cmac::from_slice(key)?;
    Ok(cmac.compute(message, len))
}

/// One-shot verification counterpart of [`compute_cmac`].
pub fn verify_cmac(
    key: &[u8],
    message: &[u8],
    tag: &[u8],
    tag_bits: u32,
) -> Result<bool, CmacError> {
    let len = TagLength::new(tag_bits)?;
    let cmac = Cmac::from_slice(key)?;
    Ok(cmac.verify(message, tag, len))
}
