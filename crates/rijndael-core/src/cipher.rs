//! Single-block Rijndael encryption and decryption.

use core::convert::TryFrom;

use log::debug;

use crate::block::{read_word, BlockSize, MAX_BLOCK_WORDS};
use crate::error::RijndaelError;
use crate::key::{expand_key, KeySchedule, RoundKeys};
use crate::round::{add_round_key, final_round, full_round, RoundLookups};
use crate::tables::tables;

/// A Rijndael cipher bound to one key and block size.
///
/// Round keys are derived once at construction and never change, so a single
/// instance can be shared across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rijndael {
    block_size: BlockSize,
    schedule: KeySchedule,
}

impl Rijndael {
    /// Builds a cipher with the standard 16-byte block.
    pub fn new(key: &[u8]) -> Result<Self, RijndaelError> {
        Self::with_block(key, BlockSize::default())
    }

    /// Builds a cipher with a block size given in bytes (16, 24 or 32).
    pub fn with_block_size(key: &[u8], block_size: usize) -> Result<Self, RijndaelError> {
        Self::with_block(key, BlockSize::try_from(block_size)?)
    }

    /// Builds a cipher with an already validated block size.
    pub fn with_block(key: &[u8], block_size: BlockSize) -> Result<Self, RijndaelError> {
        let schedule = expand_key(key, block_size)?;
        debug!(
            "rijndael: expanded {}-byte key for {}-byte blocks ({} rounds)",
            key.len(),
            block_size.bytes(),
            schedule.encrypt.rounds()
        );
        Ok(Self {
            block_size,
            schedule,
        })
    }

    /// Configured block size.
    #[inline]
    pub fn block(&self) -> BlockSize {
        self.block_size
    }

    /// Configured block size in bytes.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size.bytes()
    }

    /// Number of rounds for this key/block combination.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.schedule.encrypt.rounds()
    }

    /// Encrypts one block, returning the ciphertext.
    pub fn encrypt(&self, block: &[u8]) -> Result<Vec<u8>, RijndaelError> {
        let mut out = block.to_vec();
        self.encrypt_in_place(&mut out)?;
        Ok(out)
    }

    /// Decrypts one block, returning the plaintext.
    pub fn decrypt(&self, block: &[u8]) -> Result<Vec<u8>, RijndaelError> {
        let mut out = block.to_vec();
        self.decrypt_in_place(&mut out)?;
        Ok(out)
    }

    /// Encrypts one block in place. The buffer is untouched on error.
    pub fn encrypt_in_place(&self, block: &mut [u8]) -> Result<(), RijndaelError> {
        self.check_len(block)?;
        let lookups = RoundLookups::forward(tables(), self.block_size);
        transform(block, &self.schedule.encrypt, &lookups);
        Ok(())
    }

    /// Decrypts one block in place. The buffer is untouched on error.
    pub fn decrypt_in_place(&self, block: &mut [u8]) -> Result<(), RijndaelError> {
        self.check_len(block)?;
        let lookups = RoundLookups::inverse(tables(), self.block_size);
        transform(block, &self.schedule.decrypt, &lookups);
        Ok(())
    }

    fn check_len(&self, block: &[u8]) -> Result<(), RijndaelError> {
        let expected = self.block_size.bytes();
        if block.len() != expected {
            return Err(RijndaelError::BlockLengthMismatch {
                expected,
                actual: block.len(),
            });
        }
        Ok(())
    }
}

/// Runs the initial key addition, `rounds - 1` full rounds and the final
/// round over a block whose length has already been checked.
fn transform(block: &mut [u8], keys: &RoundKeys, lookups: &RoundLookups<'_>) {
    let bc = block.len() / 4;
    let rounds = keys.rounds();

    let mut state = [0u32; MAX_BLOCK_WORDS];
    let mut next = [0u32; MAX_BLOCK_WORDS];
    for (col, word) in state[..bc].iter_mut().enumerate() {
        *word = read_word(block, col);
    }
    add_round_key(&mut state[..bc], keys.get(0));

    for round in 1..rounds {
        full_round(&state[..bc], &mut next[..bc], keys.get(round), lookups);
        state = next;
    }

    final_round(&state[..bc], keys.get(rounds), lookups, block);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const FIPS_PLAIN: &str = "00112233445566778899aabbccddeeff";

    fn unhex(s: &str) -> Vec<u8> {
        hex::decode(s).expect("valid hex")
    }

    #[test]
    fn aes_known_answers_fips197() {
        let vectors = [
            (
                "000102030405060708090a0b0c0d0e0f",
                "69c4e0d86a7b0430d8cdb78070b4c55a",
            ),
            (
                "000102030405060708090a0b0c0d0e0f1011121314151617",
                "dda97ca4864cdfe06eaf70a0ec0d7191",
            ),
            (
                "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
                "8ea2b7ca516745bfeafc49904b496089",
            ),
        ];
        let plain = unhex(FIPS_PLAIN);
        for (key, cipher) in vectors {
            let rijndael = Rijndael::new(&unhex(key)).expect("valid key");
            let ct = rijndael.encrypt(&plain).expect("encrypt");
            assert_eq!(hex::encode(&ct), cipher);
            assert_eq!(rijndael.decrypt(&ct).expect("decrypt"), plain);
        }
    }

    #[test]
    fn wide_block_known_answers() {
        // key = 00 01 .. (key_len - 1), plaintext = 00 01 .. (block_len - 1)
        let vectors = [
            (16, 24, "54030626e366bba5827f46be060b53c75668fc25fb1a6074"),
            (
                16,
                32,
                "21c89c4a7ae37f185597362e5d20485f6144afed71bd4a798688662e6cde7dc4",
            ),
            (24, 24, "7a5a73c8fbdbb2aa6866cc951b3e059a631cfefc09c424cf"),
            (
                24,
                32,
                "d4cc0b070ebebd98ffa1c28e40bffa5db8bdb8fb5bfb6ccf23af2c1608967acc",
            ),
            (32, 24, "b5e5bb698a33a80e4daed256760f1a5f08cc6f181e67b5bc"),
            (
                32,
                32,
                "623d2bd4ca3796dc3d02ecf2f37fb637fd3da58509cebb67ab9265b04db51e7d",
            ),
        ];
        for (key_len, block_len, expected) in vectors {
            let key: Vec<u8> = (0..key_len as u8).collect();
            let plain: Vec<u8> = (0..block_len as u8).collect();
            let rijndael = Rijndael::with_block_size(&key, block_len).expect("valid sizes");
            let ct = rijndael.encrypt(&plain).expect("encrypt");
            assert_eq!(hex::encode(&ct), expected, "key {} block {}", key_len, block_len);
            assert_eq!(rijndael.decrypt(&ct).expect("decrypt"), plain);
        }
    }

    #[test]
    fn round_trip_all_sizes_random() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for key_len in [16usize, 24, 32] {
            for block_len in [16usize, 24, 32] {
                for _ in 0..25 {
                    let mut key = vec![0u8; key_len];
                    let mut block = vec![0u8; block_len];
                    rng.fill_bytes(&mut key);
                    rng.fill_bytes(&mut block);
                    let rijndael = Rijndael::with_block_size(&key, block_len).expect("valid sizes");
                    let ct = rijndael.encrypt(&block).expect("encrypt");
                    assert_ne!(ct, block);
                    assert_eq!(rijndael.decrypt(&ct).expect("decrypt"), block);
                }
            }
        }
    }

    #[test]
    fn construction_rejects_invalid_sizes() {
        assert_eq!(
            Rijndael::new(&[0u8; 20]),
            Err(RijndaelError::InvalidKeyLength(20))
        );
        assert_eq!(
            Rijndael::with_block_size(&[0u8; 16], 20),
            Err(RijndaelError::InvalidBlockSize(20))
        );
        assert_eq!(
            Rijndael::with_block_size(&[0u8; 16], 64),
            Err(RijndaelError::InvalidBlockSize(64))
        );
    }

    #[test]
    fn wrong_block_length_fails_without_output() {
        let rijndael = Rijndael::with_block_size(&[1u8; 32], 32).expect("valid sizes");
        for len in [0usize, 16, 31, 33, 64] {
            let mut block = vec![0xabu8; len];
            let err = rijndael.encrypt_in_place(&mut block).unwrap_err();
            assert_eq!(
                err,
                RijndaelError::BlockLengthMismatch {
                    expected: 32,
                    actual: len
                }
            );
            assert!(block.iter().all(|&b| b == 0xab));
            assert!(rijndael.decrypt(&block).is_err());
        }
    }

    #[test]
    fn reports_round_counts() {
        let rijndael = Rijndael::with_block_size(&[0u8; 16], 24).expect("valid sizes");
        assert_eq!(rijndael.rounds(), 12);
        assert_eq!(rijndael.block_size(), 24);
        assert_eq!(rijndael.block(), BlockSize::B192);
    }

    #[test]
    fn single_bit_flip_diffuses_across_block() {
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
        let rijndael = Rijndael::with_block_size(&[0x42u8; 32], 32).expect("valid sizes");
        let trials: u32 = 200;
        let mut total_bits = 0u32;
        for _ in 0..trials {
            let mut block = [0u8; 32];
            rng.fill_bytes(&mut block);
            let ct = rijndael.encrypt(&block).expect("encrypt");
            let bit = (rng.next_u32() % 256) as usize;
            block[bit / 8] ^= 1 << (bit % 8);
            let flipped = rijndael.encrypt(&block).expect("encrypt");
            let diff: u32 = ct
                .iter()
                .zip(flipped.iter())
                .map(|(a, b)| (a ^ b).count_ones())
                .sum();
            assert!(diff > 0);
            total_bits += diff;
        }
        let mean = f64::from(total_bits) / f64::from(trials);
        assert!((100.0..156.0).contains(&mean), "mean flipped bits {}", mean);
    }
}
