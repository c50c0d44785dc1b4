//! Table-driven Rijndael round transformations.
//!
//! The state is held as `block_size / 4` big-endian column words. A full
//! round fuses SubBytes, ShiftRows and MixColumns into four T-table lookups
//! per column; the final round drops MixColumns and substitutes bytes only.

use crate::block::{pack_word, word_byte, write_word, BlockSize, ShiftOffsets};
use crate::tables::GaloisTables;

/// Lookup tables and row shifts for one direction of the cipher.
#[derive(Clone, Copy)]
pub struct RoundLookups<'a> {
    mix: &'a [[u32; 256]; 4],
    sbox: &'a [u8; 256],
    shifts: ShiftOffsets,
}

impl<'a> RoundLookups<'a> {
    /// T1..T4, the S-box and forward shifts.
    pub fn forward(tables: &'a GaloisTables, block: BlockSize) -> Self {
        Self {
            mix: &tables.encrypt,
            sbox: &tables.sbox,
            shifts: block.encrypt_shifts(),
        }
    }

    /// T5..T8, the inverse S-box and inverse shifts.
    pub fn inverse(tables: &'a GaloisTables, block: BlockSize) -> Self {
        Self {
            mix: &tables.decrypt,
            sbox: &tables.inv_sbox,
            shifts: block.decrypt_shifts(),
        }
    }

    /// Source columns feeding output column `col`, one per row.
    #[inline]
    fn sources(&self, col: usize, bc: usize) -> [usize; 4] {
        let ShiftOffsets([s1, s2, s3]) = self.shifts;
        [col, (col + s1) % bc, (col + s2) % bc, (col + s3) % bc]
    }
}

/// XORs a round key into the state.
#[inline]
pub fn add_round_key(state: &mut [u32], round_key: &[u32]) {
    for (word, key) in state.iter_mut().zip(round_key.iter()) {
        *word ^= *key;
    }
}

/// One full round: `out[i] = T1[..] ^ T2[..] ^ T3[..] ^ T4[..] ^ key[i]`.
#[inline]
pub fn full_round(state: &[u32], out: &mut [u32], round_key: &[u32], lookups: &RoundLookups<'_>) {
    let bc = state.len();
    let mix = lookups.mix;
    for (col, dst) in out.iter_mut().enumerate() {
        let [c0, c1, c2, c3] = lookups.sources(col, bc);
        *dst = mix[0][word_byte(state[c0], 0)]
            ^ mix[1][word_byte(state[c1], 1)]
            ^ mix[2][word_byte(state[c2], 2)]
            ^ mix[3][word_byte(state[c3], 3)]
            ^ round_key[col];
    }
}

/// Final round: substitution and row shift only, written out as bytes.
#[inline]
pub fn final_round(state: &[u32], round_key: &[u32], lookups: &RoundLookups<'_>, out: &mut [u8]) {
    let bc = state.len();
    let sbox = lookups.sbox;
    for (col, key) in round_key.iter().enumerate() {
        let [c0, c1, c2, c3] = lookups.sources(col, bc);
        let substituted = pack_word([
            sbox[word_byte(state[c0], 0)],
            sbox[word_byte(state[c1], 1)],
            sbox[word_byte(state[c2], 2)],
            sbox[word_byte(state[c3], 3)],
        ]);
        write_word(out, col, substituted ^ key);
    }
}
