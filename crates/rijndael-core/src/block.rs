//! Block sizes and byte/word helpers.

use core::convert::TryFrom;

use crate::error::RijndaelError;

/// Largest block size in 32-bit words.
pub const MAX_BLOCK_WORDS: usize = 8;

/// Supported Rijndael block sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockSize {
    /// 16-byte block (standard AES).
    #[default]
    B128,
    /// 24-byte block.
    B192,
    /// 32-byte block.
    B256,
}

/// Column offsets used by the row shift of rows 1, 2 and 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftOffsets(pub [usize; 3]);

impl BlockSize {
    /// Block length in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            BlockSize::B128 => 16,
            BlockSize::B192 => 24,
            BlockSize::B256 => 32,
        }
    }

    /// Block length in 32-bit words (columns of the state).
    #[inline]
    pub const fn words(self) -> usize {
        self.bytes() / 4
    }

    /// Row shift offsets for the forward cipher.
    pub const fn encrypt_shifts(self) -> ShiftOffsets {
        match self {
            BlockSize::B128 | BlockSize::B192 => ShiftOffsets([1, 2, 3]),
            BlockSize::B256 => ShiftOffsets([1, 3, 4]),
        }
    }

    /// Row shift offsets for the inverse cipher.
    pub const fn decrypt_shifts(self) -> ShiftOffsets {
        match self {
            BlockSize::B128 => ShiftOffsets([3, 2, 1]),
            BlockSize::B192 => ShiftOffsets([5, 4, 3]),
            BlockSize::B256 => ShiftOffsets([7, 5, 4]),
        }
    }
}

impl TryFrom<usize> for BlockSize {
    type Error = RijndaelError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            16 => Ok(BlockSize::B128),
            24 => Ok(BlockSize::B192),
            32 => Ok(BlockSize::B256),
            other => Err(RijndaelError::InvalidBlockSize(other)),
        }
    }
}

/// Packs four bytes into a big-endian word.
#[inline]
pub fn pack_word(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Splits a word into its four big-endian bytes.
#[inline]
pub fn unpack_word(word: u32) -> [u8; 4] {
    word.to_be_bytes()
}

/// Returns byte `n` (0 = most significant) of a word.
#[inline]
pub fn word_byte(word: u32, n: usize) -> usize {
    unpack_word(word)[n] as usize
}

/// Reads the word at column `col` of a byte block.
#[inline]
pub fn read_word(block: &[u8], col: usize) -> u32 {
    let offset = col * 4;
    pack_word([
        block[offset],
        block[offset + 1],
        block[offset + 2],
        block[offset + 3],
    ])
}

/// Writes `word` at column `col` of a byte block.
#[inline]
pub fn write_word(block: &mut [u8], col: usize, word: u32) {
    let offset = col * 4;
    block[offset..offset + 4].copy_from_slice(&unpack_word(word));
}

/// XORs `rhs` into `dst`. Both slices must have the same length.
#[inline]
pub fn xor_in_place(dst: &mut [u8], rhs: &[u8]) {
    debug_assert_eq!(dst.len(), rhs.len());
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
