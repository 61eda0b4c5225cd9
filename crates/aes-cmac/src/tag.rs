//! Tag lengths, truncation and constant-time comparison.

use aes_core::Block;
use subtle::{Choice, ConstantTimeEq};

use crate::error::CmacError;

/// Largest tag length in bits (one full block).
pub const MAX_TAG_BITS: u32 = 128;

/// Validated tag length `Tlen` in bits, within `0..=128`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagLength(u32);

impl TagLength {
    /// The untruncated 128-bit tag.
    pub const FULL: Self = Self(MAX_TAG_BITS);

    /// Validates `bits`; anything above 128 is rejected rather than clamped.
    pub fn new(bits: u32) -> Result<Self, CmacError> {
        if bits > MAX_TAG_BITS {
            return Err(CmacError::InvalidTagLength { bits });
        }
        Ok(Self(bits))
    }

    /// Length in bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Number of bytes holding meaningful bits (`ceil(Tlen / 8)`).
    pub fn byte_len(self) -> usize {
        self.0.div_ceil(8) as usize
    }
}

impl Default for TagLength {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u32> for TagLength {
    type Error = CmacError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

/// Keeps the `len` most significant bits of `block` and zeroes the rest.
pub fn truncate(block: &Block, len: TagLength) -> Block {
    let mut out = *block;
    if len.bits() >= MAX_TAG_BITS {
        return out;
    }
    let full_bytes = (len.bits() / 8) as usize;
    let rem_bits = len.bits() % 8;
    let mut zero_from = full_bytes;
    if rem_bits != 0 {
        out[full_bytes] &= 0xFFu8 << (8 - rem_bits);
        zero_from += 1;
    }
    for byte in &mut out[zero_from..] {
        *byte = 0;
    }
    out
}

/// A CMAC tag: the `len` most significant bits of the final chaining value.
///
/// Equality is evaluated in constant time with respect to tag content.
#[derive(Clone, Copy, Debug)]
pub struct Tag {
    bytes: Block,
    len: TagLength,
}

impl Tag {
    /// Builds a tag from a full 128-bit chaining value.
    pub fn from_block(full: &Block, len: TagLength) -> Self {
        Self {
            bytes: truncate(full, len),
            len,
        }
    }

    /// The tag length.
    pub fn length(&self) -> TagLength {
        self.len
    }

    /// All 16 bytes; bits past the tag length are zero.
    pub fn as_bytes(&self) -> &Block {
        &self.bytes
    }

    /// Only the bytes that carry tag bits.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len.byte_len()]
    }

    /// Narrows the tag to `len` bits. Wider lengths leave it unchanged.
    pub fn truncated(&self, len: TagLength) -> Self {
        Self::from_block(&self.bytes, len.min(self.len))
    }

    /// Constant-time comparison against the meaningful bytes of a received tag.
    ///
    /// A candidate whose length differs from [`Tag::as_slice`] never matches.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        self.as_slice().ct_eq(candidate).into()
    }
}

impl ConstantTimeEq for Tag {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.len.0.ct_eq(&other.len.0) & self.bytes[..].ct_eq(&other.bytes[..])
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Tag {}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: Block = [0xff; 16];

    fn len(bits: u32) -> TagLength {
        TagLength::new(bits).expect("in range")
    }

    #[test]
    fn rejects_lengths_over_one_block() {
        assert_eq!(
            TagLength::new(129),
            Err(CmacError::InvalidTagLength { bits: 129 })
        );
        assert!(TagLength::try_from(u32::MAX).is_err());
        assert_eq!(TagLength::new(128), Ok(TagLength::FULL));
        assert_eq!(TagLength::default(), TagLength::FULL);
    }

    #[test]
    fn full_length_is_untouched() {
        assert_eq!(truncate(&FULL, TagLength::FULL), FULL);
    }

    #[test]
    fn zero_length_clears_everything() {
        assert_eq!(truncate(&FULL, len(0)), [0u8; 16]);
        assert_eq!(len(0).byte_len(), 0);
        assert!(Tag::from_block(&FULL, len(0)).as_slice().is_empty());
    }

    #[test]
    fn byte_aligned_length_skips_masking() {
        let out = truncate(&FULL, len(64));
        assert!(out[..8].iter().all(|&b| b == 0xff));
        assert!(out[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn partial_byte_keeps_top_bits() {
        let out = truncate(&FULL, len(53));
        assert!(out[..6].iter().all(|&b| b == 0xff));
        assert_eq!(out[6], 0xf8);
        assert!(out[7..].iter().all(|&b| b == 0));
        assert_eq!(len(53).byte_len(), 7);

        let out = truncate(&FULL, len(127));
        assert_eq!(out[15], 0xfe);
        let out = truncate(&FULL, len(1));
        assert_eq!(out[0], 0x80);
        assert!(out[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn truncated_never_widens() {
        let tag = Tag::from_block(&FULL, len(32));
        assert_eq!(tag.truncated(TagLength::FULL).length(), len(32));
        assert_eq!(tag.truncated(len(8)).as_slice(), &[0xff]);
    }

    #[test]
    fn matches_requires_exact_length_and_content() {
        let tag = Tag::from_block(&FULL, len(24));
        assert!(tag.matches(&[0xff, 0xff, 0xff]));
        assert!(!tag.matches(&[0xff, 0xff, 0xfe]));
        assert!(!tag.matches(&[0xff, 0xff]));
        assert!(!tag.matches(&[0xff; 16]));
    }

    #[test]
    fn equality_includes_length() {
        let a = Tag::from_block(&[0u8; 16], len(8));
        let b = Tag::from_block(&[0u8; 16], len(16));
        assert_ne!(a, b);
        assert_eq!(a, Tag::from_block(&[0u8; 16], len(8)));
    }
}
