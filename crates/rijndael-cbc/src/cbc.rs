//! Cipher Block Chaining over the Rijndael block cipher.

use core::convert::TryFrom;

use rijndael_core::{xor_in_place, BlockSize, Rijndael, RijndaelError};

use crate::padding::PaddingScheme;

/// Configuration for a CBC instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CbcConfig {
    /// Cipher block size; the IV must have the same length.
    pub block_size: BlockSize,
    /// Padding applied on encrypt and stripped on decrypt.
    pub padding: PaddingScheme,
}

/// Rijndael in CBC mode with a fixed IV and padding scheme.
///
/// Holds no state between calls: every `encrypt`/`decrypt` starts chaining
/// from the IV again.
#[derive(Clone, Debug)]
pub struct RijndaelCbc {
    cipher: Rijndael,
    iv: Vec<u8>,
    padding: PaddingScheme,
}

impl RijndaelCbc {
    /// Creates a CBC instance; `block_size` is in bytes.
    pub fn new(
        key: &[u8],
        iv: &[u8],
        padding: PaddingScheme,
        block_size: usize,
    ) -> Result<Self, RijndaelError> {
        let config = CbcConfig {
            block_size: BlockSize::try_from(block_size)?,
            padding,
        };
        Self::with_config(key, iv, config)
    }

    /// Creates a CBC instance with explicit configuration.
    pub fn with_config(key: &[u8], iv: &[u8], config: CbcConfig) -> Result<Self, RijndaelError> {
        let expected = config.block_size.bytes();
        if iv.len() != expected {
            return Err(RijndaelError::InvalidIvLength {
                expected,
                actual: iv.len(),
            });
        }
        let cipher = Rijndael::with_block(key, config.block_size)?;
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
            padding: config.padding,
        })
    }

    /// Underlying block cipher.
    pub fn cipher(&self) -> &Rijndael {
        &self.cipher
    }

    /// Configured block size in bytes.
    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Configured padding scheme.
    pub fn padding(&self) -> PaddingScheme {
        self.padding
    }

    /// Pads and encrypts `plaintext`. The output length is a multiple of the
    /// block size.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, RijndaelError> {
        let block = self.cipher.block();
        let block_size = block.bytes();
        let mut buf = self.padding.encoded(plaintext, block);

        for start in (0..buf.len()).step_by(block_size) {
            let (done, rest) = buf.split_at_mut(start);
            let chain = if start == 0 {
                self.iv.as_slice()
            } else {
                &done[start - block_size..]
            };
            let chunk = &mut rest[..block_size];
            xor_in_place(chunk, chain);
            self.cipher.encrypt_in_place(chunk)?;
        }
        Ok(buf)
    }

    /// Decrypts `ciphertext` and strips the padding.
    ///
    /// Fails before any block is processed if the length is not a multiple of
    /// the block size.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, RijndaelError> {
        let block = self.cipher.block();
        let block_size = block.bytes();
        if ciphertext.len() % block_size != 0 {
            return Err(RijndaelError::UnalignedCiphertext {
                block_size,
                len: ciphertext.len(),
            });
        }

        let mut buf = ciphertext.to_vec();
        let previous =
            core::iter::once(self.iv.as_slice()).chain(ciphertext.chunks_exact(block_size));
        for (chunk, chain) in buf.chunks_exact_mut(block_size).zip(previous) {
            self.cipher.decrypt_in_place(chunk)?;
            xor_in_place(chunk, chain);
        }

        self.padding.decode(&mut buf, block);
        Ok(buf)
    }
}
