//! Generalized Rijndael block cipher.
//!
//! This crate provides:
//! - GF(2^8) log/antilog tables, S-boxes and T-tables built once per process.
//! - The Rijndael key schedule for 128/192/256-bit keys and blocks.
//! - Single-block encryption and decryption; with 16-byte blocks this is AES.
//!
//! The implementation is table driven and makes no constant-time claims; it
//! should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
mod round;
mod tables;

pub use crate::block::{
    pack_word, unpack_word, xor_in_place, BlockSize, ShiftOffsets, MAX_BLOCK_WORDS,
};
pub use crate::cipher::Rijndael;
pub use crate::error::RijndaelError;
pub use crate::key::{expand_key, rounds, KeySchedule, KeySize, RoundKeys, MAX_ROUNDS};
pub use crate::tables::{gf_mul, tables, Field, GaloisTables};
