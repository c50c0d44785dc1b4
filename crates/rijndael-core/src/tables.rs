//! GF(2^8) arithmetic and the precomputed Rijndael lookup tables.
//!
//! Everything here is a pure function of the field definition (reduction
//! polynomial `0x11B`, generator `3`). The tables are built on first use and
//! shared read-only by every cipher instance in the process.

use once_cell::sync::Lazy;

use crate::block::pack_word;

/// Reduction polynomial `x^8 + x^4 + x^3 + x + 1`.
const REDUCTION_POLY: u16 = 0x11b;

/// Number of round constants produced; enough for 14 rounds with 4-word keys.
pub const RCON_LEN: usize = 30;

/// Rows of the affine transform applied after inversion. Row `i` selects the
/// input bits XORed into output bit `i` (bit 0 = least significant).
const AFFINE_ROWS: [u8; 8] = [0xf1, 0xe3, 0xc7, 0x8f, 0x1f, 0x3e, 0x7c, 0xf8];
const AFFINE_CONSTANT: u8 = 0x63;

/// MixColumns coefficients, one row per T-table.
pub const MIX_COLUMNS: [[u8; 4]; 4] = [[2, 1, 1, 3], [3, 2, 1, 1], [1, 3, 2, 1], [1, 1, 3, 2]];

/// Log/antilog tables for GF(2^8) with generator 3.
#[derive(Clone, Debug)]
pub struct Field {
    /// `alog[i] = 3^i`.
    pub alog: [u8; 256],
    /// Discrete logarithm base 3; `log[0]` is unused.
    pub log: [u8; 256],
}

impl Field {
    fn new() -> Self {
        let mut alog = [0u8; 256];
        alog[0] = 1;
        for i in 1..256 {
            let prev = alog[i - 1] as u16;
            let mut next = (prev << 1) ^ prev;
            if next & 0x100 != 0 {
                next ^= REDUCTION_POLY;
            }
            alog[i] = next as u8;
        }

        let mut log = [0u8; 256];
        for (i, &value) in alog.iter().enumerate().take(255).skip(1) {
            log[value as usize] = i as u8;
        }

        Self { alog, log }
    }

    /// Multiplies two field elements.
    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let idx = (self.log[a as usize] as usize + self.log[b as usize] as usize) % 255;
        self.alog[idx]
    }

    /// Divides `a` by a non-zero `b`.
    #[inline]
    pub fn div(&self, a: u8, b: u8) -> u8 {
        debug_assert!(b != 0, "division by zero in GF(2^8)");
        if a == 0 {
            return 0;
        }
        let idx = (255 + self.log[a as usize] as usize - self.log[b as usize] as usize) % 255;
        self.alog[idx]
    }

    /// Multiplicative inverse, with the inverse of 0 defined as 0.
    #[inline]
    pub fn inverse(&self, a: u8) -> u8 {
        match a {
            0 => 0,
            1 => 1,
            _ => self.alog[255 - self.log[a as usize] as usize],
        }
    }

    /// Multiplies `a` by each coefficient of `row` and packs the products
    /// into a big-endian word.
    fn mul_row(&self, a: u8, row: &[u8; 4]) -> u32 {
        pack_word([
            self.mul(a, row[0]),
            self.mul(a, row[1]),
            self.mul(a, row[2]),
            self.mul(a, row[3]),
        ])
    }
}

/// Process-wide Rijndael tables.
#[derive(Clone, Debug)]
pub struct GaloisTables {
    /// Log/antilog tables backing the field arithmetic.
    pub field: Field,
    /// Forward substitution box.
    pub sbox: [u8; 256],
    /// Inverse substitution box.
    pub inv_sbox: [u8; 256],
    /// T1..T4: S-box fused with the MixColumns rows.
    pub encrypt: [[u32; 256]; 4],
    /// T5..T8: inverse S-box fused with the inverse MixColumns rows.
    pub decrypt: [[u32; 256]; 4],
    /// U1..U4: inverse MixColumns rows alone, used on decryption round keys.
    pub inv_mix: [[u32; 256]; 4],
    /// Inverse of [`MIX_COLUMNS`] over GF(2^8).
    pub inv_mix_matrix: [[u8; 4]; 4],
    /// Round constants, `rcon[0] = 1`, `rcon[i] = 2 * rcon[i - 1]`.
    pub rcon: [u8; RCON_LEN],
}

static TABLES: Lazy<GaloisTables> = Lazy::new(GaloisTables::build);

/// Returns the shared tables, building them on first call.
#[inline]
pub fn tables() -> &'static GaloisTables {
    &TABLES
}

/// Multiplies two elements of GF(2^8).
pub fn gf_mul(a: u8, b: u8) -> u8 {
    tables().field.mul(a, b)
}

impl GaloisTables {
    fn build() -> Self {
        let field = Field::new();

        let mut sbox = [0u8; 256];
        let mut inv_sbox = [0u8; 256];
        for x in 0..=255u8 {
            let s = affine(field.inverse(x));
            sbox[x as usize] = s;
            inv_sbox[s as usize] = x;
        }

        let inv_mix_matrix = invert_matrix(&field, &MIX_COLUMNS);

        let mut encrypt = [[0u32; 256]; 4];
        let mut decrypt = [[0u32; 256]; 4];
        let mut inv_mix = [[0u32; 256]; 4];
        for x in 0..256 {
            for row in 0..4 {
                encrypt[row][x] = field.mul_row(sbox[x], &MIX_COLUMNS[row]);
                decrypt[row][x] = field.mul_row(inv_sbox[x], &inv_mix_matrix[row]);
                inv_mix[row][x] = field.mul_row(x as u8, &inv_mix_matrix[row]);
            }
        }

        let mut rcon = [0u8; RCON_LEN];
        rcon[0] = 1;
        for i in 1..RCON_LEN {
            rcon[i] = field.mul(2, rcon[i - 1]);
        }

        Self {
            field,
            sbox,
            inv_sbox,
            encrypt,
            decrypt,
            inv_mix,
            inv_mix_matrix,
            rcon,
        }
    }
}

/// Applies the S-box affine transform to an already inverted byte.
fn affine(inverse: u8) -> u8 {
    let mut out = 0u8;
    for (bit, row) in AFFINE_ROWS.iter().enumerate() {
        let parity = (row & inverse).count_ones() as u8 & 1;
        out |= parity << bit;
    }
    out ^ AFFINE_CONSTANT
}

/// Gauss-Jordan inversion of a 4x4 matrix over GF(2^8).
fn invert_matrix(field: &Field, matrix: &[[u8; 4]; 4]) -> [[u8; 4]; 4] {
    let mut aug = [[0u8; 8]; 4];
    for (i, row) in aug.iter_mut().enumerate() {
        row[..4].copy_from_slice(&matrix[i]);
        row[i + 4] = 1;
    }

    for col in 0..4 {
        if let Some(pivot) = (col..4).find(|&r| aug[r][col] != 0) {
            aug.swap(pivot, col);
        }
        let pivot = aug[col][col];
        debug_assert!(pivot != 0, "matrix is singular");
        for value in aug[col].iter_mut() {
            *value = field.div(*value, pivot);
        }
        for row in 0..4 {
            if row == col {
                continue;
            }
            let factor = aug[row][col];
            for j in col..8 {
                aug[row][j] ^= field.mul(aug[col][j], factor);
            }
        }
    }

    let mut inverse = [[0u8; 4]; 4];
    for (dst, src) in inverse.iter_mut().zip(aug.iter()) {
        dst.copy_from_slice(&src[4..]);
    }
    inverse
}
