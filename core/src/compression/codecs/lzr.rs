//! codecs/lzr.rs
//! LZR block decoder: byte-oriented literal runs and back-references.
//!
//! Instruction set (one control byte `code` each):
//!
//! ```text
//! code > 15   back-reference
//!             length = code & 0x0F, or 15 + extension when the nibble is 0
//!             offset = (code >> 4) | (next_byte << 4)        (12 bits)
//!             copy `length` bytes from `output_len - offset`, forward, overlapping
//!
//! code 1..=15 literal run of `code` bytes
//! code 0      15 literal bytes, then an extension giving the remaining run length
//!
//! extension   every 0x00 byte adds 255, the first non-zero byte is added and ends it
//! ```
//!
//! A block ends as soon as the declared uncompressed length has been produced.

use crate::compression::constants::{EXTENSION_BASE, EXTENSION_STEP, LITERAL_CODE_MAX};
use crate::compression::types::{BlockStats, CompressionError, Decompressor};

/// Cursor over the encoded bytes of one block.
struct BlockReader<'a> {
    input: &'a [u8],
    pos: usize,
    base_offset: usize,
}

impl<'a> BlockReader<'a> {
    fn new(input: &'a [u8], base_offset: usize) -> Self {
        Self { input, pos: 0, base_offset }
    }

    #[inline]
    fn stream_offset(&self) -> usize {
        self.base_offset + self.pos
    }

    #[inline]
    fn byte(&mut self) -> Result<u8, CompressionError> {
        let b = *self.input.get(self.pos).ok_or_else(|| {
            CompressionError::malformed(self.stream_offset(), "input exhausted inside block")
        })?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CompressionError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.input.len());
        match end {
            Some(end) => {
                let run = &self.input[self.pos..end];
                self.pos = end;
                Ok(run)
            }
            None => Err(CompressionError::malformed(
                self.stream_offset(),
                format!(
                    "literal run of {} bytes, only {} left",
                    n,
                    self.input.len() - self.pos
                ),
            )),
        }
    }

    /// Zero-run length extension starting from `base`.
    fn extension(&mut self, base: usize) -> Result<usize, CompressionError> {
        let mut len = base;
        loop {
            match self.byte()? {
                0 => len += EXTENSION_STEP,
                b => return Ok(len + b as usize),
            }
        }
    }
}

/// Decode one block into a fresh buffer of exactly `uncompressed_len` bytes.
pub fn decode_block(input: &[u8], uncompressed_len: usize) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::with_capacity(uncompressed_len);
    decode_block_into(input, 0, uncompressed_len, &mut out)?;
    Ok(out)
}

/// Decode one block, appending to `out`.
///
/// Back-references are resolved against this block's output only; bytes already
/// in `out` from earlier blocks are never referenced.
pub fn decode_block_into(
    input: &[u8],
    base_offset: usize,
    uncompressed_len: usize,
    out: &mut Vec<u8>,
) -> Result<BlockStats, CompressionError> {
    let block_start = out.len();
    let target = block_start + uncompressed_len;
    out.reserve(uncompressed_len);

    let mut reader = BlockReader::new(input, base_offset);

    while out.len() < target {
        let code_offset = reader.stream_offset();
        let code = reader.byte()?;

        if code > LITERAL_CODE_MAX {
            let match_len = match (code & 0x0F) as usize {
                0 => reader.extension(EXTENSION_BASE)?,
                n => n,
            };
            let offset = (code >> 4) as usize | (reader.byte()? as usize) << 4;

            // offset 0 repeats the previous byte, same as offset 1
            let distance = offset.max(1);
            let available = out.len() - block_start;
            if distance > available {
                return Err(CompressionError::UnsupportedBackReference {
                    offset: code_offset,
                    distance: offset,
                    available,
                });
            }
            check_fits(code_offset, out.len(), match_len, target)?;

            // Forward byte copy: the source may overlap bytes pushed by this loop.
            let mut src = out.len() - distance;
            for _ in 0..match_len {
                let b = out[src];
                out.push(b);
                src += 1;
            }
        } else {
            let run_len = if code == 0 {
                check_fits(code_offset, out.len(), EXTENSION_BASE, target)?;
                let fixed = reader.take(EXTENSION_BASE)?;
                out.extend_from_slice(fixed);
                reader.extension(0)?
            } else {
                code as usize
            };
            check_fits(code_offset, out.len(), run_len, target)?;
            let run = reader.take(run_len)?;
            out.extend_from_slice(run);
        }
    }

    Ok(BlockStats {
        consumed: reader.pos,
        produced: uncompressed_len,
    })
}

#[inline]
fn check_fits(
    code_offset: usize,
    current: usize,
    len: usize,
    target: usize,
) -> Result<(), CompressionError> {
    if current + len > target {
        return Err(CompressionError::malformed(
            code_offset,
            format!("instruction writes {} bytes past the block end", current + len - target),
        ));
    }
    Ok(())
}

/// LZR implementation of [`Decompressor`].
#[derive(Debug, Default)]
pub struct LzrDecompressor;

impl LzrDecompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Decompressor for LzrDecompressor {
    fn decompress_block(
        &mut self,
        input: &[u8],
        base_offset: usize,
        uncompressed_len: usize,
        out: &mut Vec<u8>,
    ) -> Result<BlockStats, CompressionError> {
        decode_block_into(input, base_offset, uncompressed_len, out)
    }
}
