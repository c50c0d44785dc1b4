//! Error types for the Rijndael engine.

use thiserror::Error;

/// Errors produced while building or driving a Rijndael cipher.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RijndaelError {
    /// Key length is not 16, 24 or 32 bytes.
    #[error("Invalid key size: {0} (expected 16, 24 or 32 bytes)")]
    InvalidKeyLength(usize),
    /// Block size is not 16, 24 or 32 bytes.
    #[error("Invalid block size: {0} (expected 16, 24 or 32 bytes)")]
    InvalidBlockSize(usize),
    /// Initialization vector does not match the block size.
    #[error("Wrong IV length, expected {expected} got {actual}")]
    InvalidIvLength {
        /// Configured block size in bytes.
        expected: usize,
        /// Length of the supplied IV.
        actual: usize,
    },
    /// A single block passed to encrypt/decrypt has the wrong length.
    #[error("Wrong block length, expected {expected} got {actual}")]
    BlockLengthMismatch {
        /// Configured block size in bytes.
        expected: usize,
        /// Length of the supplied block.
        actual: usize,
    },
    /// Chained ciphertext is not a whole number of blocks.
    #[error("Ciphertext length {len} is not a multiple of the block size {block_size}")]
    UnalignedCiphertext {
        /// Configured block size in bytes.
        block_size: usize,
        /// Length of the supplied ciphertext.
        len: usize,
    },
}

impl RijndaelError {
    /// Returns true for errors raised while constructing a cipher, as opposed
    /// to length mismatches on individual calls.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RijndaelError::InvalidKeyLength(_)
                | RijndaelError::InvalidBlockSize(_)
                | RijndaelError::InvalidIvLength { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_block_length_mismatch() {
        let err = RijndaelError::BlockLengthMismatch {
            expected: 32,
            actual: 31,
        };
        assert_eq!(format!("{}", err), "Wrong block length, expected 32 got 31");
    }

    #[test]
    fn display_unaligned_ciphertext() {
        let err = RijndaelError::UnalignedCiphertext {
            block_size: 16,
            len: 17,
        };
        assert_eq!(
            format!("{}", err),
            "Ciphertext length 17 is not a multiple of the block size 16"
        );
    }

    #[test]
    fn display_invalid_key_length() {
        assert_eq!(
            RijndaelError::InvalidKeyLength(20).to_string(),
            "Invalid key size: 20 (expected 16, 24 or 32 bytes)"
        );
    }

    #[test]
    fn configuration_family() {
        assert!(RijndaelError::InvalidKeyLength(15).is_configuration());
        assert!(RijndaelError::InvalidBlockSize(20).is_configuration());
        assert!(RijndaelError::InvalidIvLength {
            expected: 16,
            actual: 8
        }
        .is_configuration());
        assert!(!RijndaelError::BlockLengthMismatch {
            expected: 16,
            actual: 8
        }
        .is_configuration());
    }
}
