//! Decryption of colon-separated multi-field secrets.

use std::string::FromUtf8Error;
use std::time::Instant;

use log::debug;
use rijndael_core::{BlockSize, RijndaelError};
use thiserror::Error;

use crate::cbc::{CbcConfig, RijndaelCbc};
use crate::padding::PaddingScheme;

/// Block size used for blobs.
pub const BLOB_BLOCK_SIZE: BlockSize = BlockSize::B256;

/// Separator between blob fields.
pub const FIELD_SEPARATOR: char = ':';

/// Errors produced by [`decrypt_blob`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlobError {
    /// Invalid key/IV or misaligned ciphertext.
    #[error("blob decryption failed: {0}")]
    Cipher(#[from] RijndaelError),
    /// The decrypted bytes are not valid UTF-8.
    #[error("decrypted blob is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Decrypts a Rijndael-256-CBC blob (32-byte blocks, zero padding) and splits
/// the text on `:` into its ordered fields.
pub fn decrypt_blob(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<String>, BlobError> {
    let start = Instant::now();
    let cbc = RijndaelCbc::with_config(
        key,
        iv,
        CbcConfig {
            block_size: BLOB_BLOCK_SIZE,
            padding: PaddingScheme::Zero,
        },
    )?;
    let plain = String::from_utf8(cbc.decrypt(data)?)?;
    let fields: Vec<String> = plain.split(FIELD_SEPARATOR).map(String::from).collect();
    debug!(
        "blob: decrypted {} bytes into {} fields, time spent: {:?}",
        data.len(),
        fields.len(),
        start.elapsed()
    );
    Ok(fields)
}
