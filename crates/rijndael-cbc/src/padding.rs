//! Byte padding schemes for chained modes.

use rijndael_core::BlockSize;

/// Padding applied before chaining and stripped after.
///
/// Neither scheme authenticates anything:
/// - `Zero` cannot tell trailing zero data bytes from padding, so such bytes
///   are lost on decode.
/// - `Pkcs7` trusts the final byte as the pad length and does not check the
///   other pad bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaddingScheme {
    /// Zero bytes up to the next block boundary (ISO/IEC 9797-1 method 1).
    /// Block-aligned input, including empty input, gets no padding.
    Zero,
    /// `n` bytes of value `n` (RFC 2315); always adds between 1 and
    /// `block_size` bytes.
    #[default]
    Pkcs7,
}

impl PaddingScheme {
    /// Pads `buf` in place to a multiple of the block size.
    pub fn encode(self, buf: &mut Vec<u8>, block: BlockSize) {
        let block_size = block.bytes();
        match self {
            PaddingScheme::Zero => {
                let pad = block_size - ((buf.len() + block_size - 1) % block_size + 1);
                buf.resize(buf.len() + pad, 0);
            }
            PaddingScheme::Pkcs7 => {
                let pad = block_size - buf.len() % block_size;
                buf.resize(buf.len() + pad, pad as u8);
            }
        }
    }

    /// Strips padding from `buf` in place.
    pub fn decode(self, buf: &mut Vec<u8>, block: BlockSize) {
        match self {
            PaddingScheme::Zero => {
                let block_size = block.bytes();
                let len = buf.len();
                if len == 0 {
                    return;
                }
                let last_block = len - ((len - 1) % block_size + 1);
                let keep = buf[last_block..]
                    .iter()
                    .rposition(|&b| b != 0)
                    .map_or(last_block, |pos| last_block + pos + 1);
                buf.truncate(keep);
            }
            PaddingScheme::Pkcs7 => {
                let Some(&pad) = buf.last() else {
                    return;
                };
                let keep = buf.len().saturating_sub(pad as usize);
                buf.truncate(keep);
            }
        }
    }

    /// Returns a padded copy of `data`.
    pub fn encoded(self, data: &[u8], block: BlockSize) -> Vec<u8> {
        let mut buf = Vec::with_capacity(data.len() + block.bytes());
        buf.extend_from_slice(data);
        self.encode(&mut buf, block);
        buf
    }

    #[cfg(test)]
    fn decoded(self, data: &[u8], block: BlockSize) -> Vec<u8> {
        let mut buf = data.to_vec();
        self.decode(&mut buf, block);
        buf
    }
}
