//! Message formatting: block partitioning and final-block preparation.

use aes_core::{xor_in_place, Block, BLOCK_SIZE};

use crate::subkey::Subkeys;

/// The final message block after padding and subkey masking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LastBlock {
    /// Total number of blocks `n`, counting the final one (at least 1).
    pub blocks: usize,
    /// Whether the final block was a full 16 bytes of message data.
    pub complete: bool,
    /// `M_n ^ K1` when complete, `(M_n* || 10..0) ^ K2` otherwise.
    pub block: Block,
}

/// Number of blocks the message occupies; an empty message counts as one.
pub fn block_count(message: &[u8]) -> usize {
    message.len().div_ceil(BLOCK_SIZE).max(1)
}

/// True when the message is non-empty and ends on a block boundary.
pub fn is_complete(message: &[u8]) -> bool {
    !message.is_empty() && message.len() % BLOCK_SIZE == 0
}

/// Yields the first `n - 1` blocks verbatim.
pub fn leading_blocks(message: &[u8]) -> impl Iterator<Item = Block> + '_ {
    let end = (block_count(message) - 1) * BLOCK_SIZE;
    message[..end].chunks_exact(BLOCK_SIZE).map(|chunk| {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        block
    })
}

/// Pads (if needed) and masks the final block with the matching subkey.
pub fn format_last_block(message: &[u8], subkeys: &Subkeys) -> LastBlock {
    let blocks = block_count(message);
    let complete = is_complete(message);
    let tail = &message[(blocks - 1) * BLOCK_SIZE..];

    let mut block = [0u8; BLOCK_SIZE];
    block[..tail.len()].copy_from_slice(tail);
    if complete {
        xor_in_place(&mut block, &subkeys.k1);
    } else {
        block[tail.len()] = 0x80;
        xor_in_place(&mut block, &subkeys.k2);
    }

    LastBlock {
        blocks,
        complete,
        block,
    }
}
