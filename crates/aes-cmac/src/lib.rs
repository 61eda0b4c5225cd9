//! AES-128 CMAC as specified in NIST SP 800-38B.
//!
//! The crate layers the CMAC mode on top of [`aes_core`]:
//! - [`derive_subkeys`] computes `K1`/`K2` from an expanded key.
//! - [`format_last_block`] pads and masks the final message block.
//! - [`Cmac`] caches per-key material and chains blocks into a [`Tag`].
//!
//! Only whole messages are supported; there is no incremental interface.
//! Tags may be truncated to any bit length in `0..=128` via [`TagLength`].
//!
//! ```
//! use aes_cmac::{compute_cmac, verify_cmac};
//!
//! let key = [0u8; 16];
//! let tag = compute_cmac(&key, b"message", 64).unwrap();
//! assert_eq!(tag.as_slice().len(), 8);
//! assert!(verify_cmac(&key, b"message", tag.as_slice(), 64).unwrap());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod error;
mod format;
mod subkey;
mod tag;

pub use aes_core::{expand_key, Aes128Key, Block, RoundKeys};

pub use crate::engine::{compute_cmac, parse_key, verify_cmac, Cmac};
pub use crate::error::CmacError;
pub use crate::format::{block_count, format_last_block, is_complete, leading_blocks, LastBlock};
pub use crate::subkey::{dbl, derive_subkeys, Subkeys};
pub use crate::tag::{truncate, Tag, TagLength, MAX_TAG_BITS};
