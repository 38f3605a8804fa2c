//! compression/types.rs
//! Decompressor trait, stream kinds and the compression error type.
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::compression::constants::signatures;
use crate::utils::enum_name_or_hex;

/// Known stream encodings, keyed by their leading signature.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum StreamCodec {
    Lzr = signatures::LZR,
}

impl StreamCodec {
    /// Detect the codec from the first four bytes of a stream.
    pub fn detect(buf: &[u8]) -> Option<Self> {
        let head: [u8; 4] = buf.get(..4)?.try_into().ok()?;
        StreamCodec::try_from_primitive(u32::from_le_bytes(head)).ok()
    }

    pub fn name(self) -> &'static str {
        match self {
            StreamCodec::Lzr => "lzr",
        }
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    /// Input ran out, or an instruction does not fit the declared block length.
    #[error("malformed stream at byte {offset}: {reason}")]
    MalformedStream { offset: usize, reason: String },

    /// A back-reference resolved before the start of the decoded output.
    #[error("back-reference at byte {offset} reaches {distance} bytes back, only {available} decoded")]
    UnsupportedBackReference {
        offset: usize,
        distance: usize,
        available: usize,
    },

    #[error("unsupported stream signature: {}", signature_name(.signature))]
    UnsupportedCodec { signature: u32 },
}

fn signature_name(raw: &u32) -> String {
    enum_name_or_hex::<StreamCodec>(*raw)
}

impl CompressionError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        CompressionError::MalformedStream {
            offset,
            reason: reason.into(),
        }
    }

    /// Byte offset in the compressed input where decoding stopped, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            CompressionError::MalformedStream { offset, .. }
            | CompressionError::UnsupportedBackReference { offset, .. } => Some(*offset),
            CompressionError::UnsupportedCodec { .. } => None,
        }
    }
}

/// Output of one block decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStats {
    /// Input bytes consumed by the codec's own instructions.
    pub consumed: usize,
    /// Bytes appended to the output.
    pub produced: usize,
}

pub trait Decompressor {
    /// Decode one block from the front of `input`, appending exactly
    /// `uncompressed_len` bytes to `out`.
    ///
    /// `base_offset` is the position of `input[0]` in the whole stream and is
    /// only used to report error offsets.
    fn decompress_block(
        &mut self,
        input: &[u8],
        base_offset: usize,
        uncompressed_len: usize,
        out: &mut Vec<u8>,
    ) -> Result<BlockStats, CompressionError>;
}
