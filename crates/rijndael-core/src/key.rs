//! Key sizes, round-key tables and the Rijndael key schedule.

use core::convert::TryFrom;

use crate::block::{pack_word, word_byte, BlockSize, MAX_BLOCK_WORDS};
use crate::error::RijndaelError;
use crate::tables::{tables, GaloisTables};

/// Largest round count over all key/block combinations.
pub const MAX_ROUNDS: usize = 14;

/// Largest key size in 32-bit words.
const MAX_KEY_WORDS: usize = 8;

/// Supported key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 16-byte key.
    Aes128,
    /// 24-byte key.
    Aes192,
    /// 32-byte key; its schedule applies an extra substitution mid-group.
    Aes256,
}

impl KeySize {
    /// Key length in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }

    /// Key length in 32-bit words.
    #[inline]
    pub const fn words(self) -> usize {
        self.bytes() / 4
    }
}

impl TryFrom<usize> for KeySize {
    type Error = RijndaelError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            other => Err(RijndaelError::InvalidKeyLength(other)),
        }
    }
}

/// Number of rounds for a key/block combination.
pub const fn rounds(key: KeySize, block: BlockSize) -> usize {
    match (key, block) {
        (KeySize::Aes128, BlockSize::B128) => 10,
        (KeySize::Aes128, BlockSize::B192)
        | (KeySize::Aes192, BlockSize::B128)
        | (KeySize::Aes192, BlockSize::B192) => 12,
        (_, BlockSize::B256) | (KeySize::Aes256, _) => 14,
    }
}

/// One round-key table (`Ke` or `Kd`): `rounds + 1` rows of block words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys {
    keys: [[u32; MAX_BLOCK_WORDS]; MAX_ROUNDS + 1],
    rounds: usize,
    words: usize,
}

impl RoundKeys {
    fn zeroed(rounds: usize, words: usize) -> Self {
        Self {
            keys: [[0u32; MAX_BLOCK_WORDS]; MAX_ROUNDS + 1],
            rounds,
            words,
        }
    }

    /// Returns the words of round `round` (0..=rounds).
    #[inline]
    pub fn get(&self, round: usize) -> &[u32] {
        &self.keys[round][..self.words]
    }

    /// Number of rounds covered by this table (rows minus one).
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

/// Encryption and decryption round keys derived from one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySchedule {
    /// Encryption round keys, in round order.
    pub encrypt: RoundKeys,
    /// Decryption round keys: reversed round order, inner rounds passed
    /// through inverse MixColumns.
    pub decrypt: RoundKeys,
}

/// Writes schedule words into both tables by absolute word position.
struct Placer {
    position: usize,
    total: usize,
    words: usize,
    rounds: usize,
}

impl Placer {
    fn done(&self) -> bool {
        self.position >= self.total
    }

    fn place(&mut self, group: &[u32], schedule: &mut KeySchedule) {
        for &word in group {
            if self.done() {
                break;
            }
            let round = self.position / self.words;
            let col = self.position % self.words;
            schedule.encrypt.keys[round][col] = word;
            schedule.decrypt.keys[self.rounds - round][col] = word;
            self.position += 1;
        }
    }
}

fn sub_word(t: &GaloisTables, word: u32) -> u32 {
    pack_word([
        t.sbox[word_byte(word, 0)],
        t.sbox[word_byte(word, 1)],
        t.sbox[word_byte(word, 2)],
        t.sbox[word_byte(word, 3)],
    ])
}

fn inv_mix_word(t: &GaloisTables, word: u32) -> u32 {
    t.inv_mix[0][word_byte(word, 0)]
        ^ t.inv_mix[1][word_byte(word, 1)]
        ^ t.inv_mix[2][word_byte(word, 2)]
        ^ t.inv_mix[3][word_byte(word, 3)]
}

/// Expands `key` into encryption and decryption round keys for `block`.
pub fn expand_key(key: &[u8], block: BlockSize) -> Result<KeySchedule, RijndaelError> {
    let key_size = KeySize::try_from(key.len())?;
    let t = tables();
    let rounds = rounds(key_size, block);
    let bc = block.words();
    let kc = key_size.words();

    let mut tk = [0u32; MAX_KEY_WORDS];
    for (word, chunk) in tk.iter_mut().zip(key.chunks_exact(4)) {
        *word = pack_word([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let mut schedule = KeySchedule {
        encrypt: RoundKeys::zeroed(rounds, bc),
        decrypt: RoundKeys::zeroed(rounds, bc),
    };
    let mut placer = Placer {
        position: 0,
        total: (rounds + 1) * bc,
        words: bc,
        rounds,
    };
    placer.place(&tk[..kc], &mut schedule);

    let mut rcon = t.rcon.iter();
    while !placer.done() {
        let last = tk[kc - 1];
        let constant = rcon.next().copied().unwrap_or_default();
        tk[0] ^= sub_word(t, last.rotate_left(8)) ^ (u32::from(constant) << 24);

        match key_size {
            KeySize::Aes128 | KeySize::Aes192 => {
                for i in 1..kc {
                    tk[i] ^= tk[i - 1];
                }
            }
            KeySize::Aes256 => {
                let half = kc / 2;
                for i in 1..half {
                    tk[i] ^= tk[i - 1];
                }
                tk[half] ^= sub_word(t, tk[half - 1]);
                for i in half + 1..kc {
                    tk[i] ^= tk[i - 1];
                }
            }
        }

        placer.place(&tk[..kc], &mut schedule);
    }

    for round in 1..rounds {
        for word in schedule.decrypt.keys[round][..bc].iter_mut() {
            *word = inv_mix_word(t, *word);
        }
    }

    Ok(schedule)
}
