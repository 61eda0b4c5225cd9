//! Error types for CMAC operations.

use thiserror::Error;

/// Errors raised at the API boundary before any block is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CmacError {
    /// The provided key is not an AES-128 key.
    #[error("invalid key length: AES-128 keys must be 16 bytes, got {actual}")]
    InvalidKeyLength {
        /// The actual length of the key provided.
        actual: usize,
    },
    /// The requested tag length does not fit in one block.
    #[error("invalid tag length: {bits} bits requested, at most 128 allowed")]
    InvalidTagLength {
        /// The requested tag length in bits.
        bits: u32,
    },
}
