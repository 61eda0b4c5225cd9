//! Table-driven AES-128 encryption used by the CMAC engine.
//!
//! This crate follows FIPS-197 and provides:
//! - Key schedule for AES-128.
//! - Single-block encryption.
//! - Block and key types shared across the workspace.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{xor_blocks, xor_in_place, Block, BLOCK_SIZE, ZERO_BLOCK};
pub use crate::cipher::{encrypt_block, expand_key, RCON};
pub use crate::key::{Aes128Key, RoundKeys, ROUND_KEY_COUNT, SCHEDULE_BYTES};
