//! Chained-mode runtime for the Rijndael block cipher.
//!
//! Wraps [`rijndael_core::Rijndael`] in Cipher Block Chaining with a fixed IV
//! and one of two padding schemes, and provides [`decrypt_blob`] for
//! colon-separated secrets encrypted with 32-byte blocks.
//!
//! There is no authentication: tampered ciphertext decrypts to garbage rather
//! than failing.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod blob;
mod cbc;
mod padding;

pub use crate::blob::{decrypt_blob, BlobError, BLOB_BLOCK_SIZE, FIELD_SEPARATOR};
pub use crate::cbc::{CbcConfig, RijndaelCbc};
pub use crate::padding::PaddingScheme;
pub use rijndael_core::{BlockSize, Rijndael, RijndaelError};
