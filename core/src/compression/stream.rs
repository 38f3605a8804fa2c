//! compression/stream.rs
//! Framed stream decoding with verbatim passthrough for raw containers.
//!
//! Layout of a compressed stream:
//!
//! ```text
//! [ signature (4) ][ uncompressed total (4) ]
//! repeated:
//!   [ compiled length (4) ][ uncompressed length (4) ][ compiled length bytes ]
//! ```

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use bytes::Bytes;
use tracing::trace;

use crate::compression::registry::create_decompressor;
use crate::compression::types::{CompressionError, StreamCodec};

/// What one `decompress` call did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    /// `None` when the stream was passed through unchanged.
    pub codec: Option<StreamCodec>,
    pub frames: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// True when `buf` starts with a known compressed-stream signature.
pub fn is_compressed(buf: &[u8]) -> bool {
    StreamCodec::detect(buf).is_some()
}

/// Decode a whole stream, or return it unchanged when it is not compressed.
pub fn decompress(input: impl Into<Bytes>) -> Result<Bytes, CompressionError> {
    decompress_with_stats(input).map(|(out, _)| out)
}

pub fn decompress_with_stats(
    input: impl Into<Bytes>,
) -> Result<(Bytes, StreamStats), CompressionError> {
    let input: Bytes = input.into();

    let Some(codec) = StreamCodec::detect(&input) else {
        let stats = StreamStats {
            codec: None,
            frames: 0,
            bytes_in: input.len() as u64,
            bytes_out: input.len() as u64,
        };
        return Ok((input, stats));
    };

    let mut decoder = create_decompressor(codec);
    let mut cursor = Cursor::new(&input[..]);
    cursor.set_position(4);

    let total = read_u32(&mut cursor, "uncompressed total")? as usize;
    let mut out = Vec::with_capacity(total);
    let mut frames = 0u64;

    while out.len() < total {
        let compiled_len = read_u32(&mut cursor, "frame compiled length")? as usize;
        let block_len = read_u32(&mut cursor, "frame uncompressed length")? as usize;
        let frame_start = cursor.position() as usize;

        let block = input.get(frame_start..).unwrap_or(&[]);
        let stats = decoder.decompress_block(block, frame_start, block_len, &mut out)?;
        frames += 1;

        trace!(
            frame = frames,
            at = frame_start,
            compiled_len,
            consumed = stats.consumed,
            produced = stats.produced,
            "decoded {} frame",
            codec.name()
        );

        // compiled length is authoritative for the next frame; padding is skipped
        cursor.set_position((frame_start + compiled_len) as u64);
    }

    let stats = StreamStats {
        codec: Some(codec),
        frames,
        bytes_in: input.len() as u64,
        bytes_out: out.len() as u64,
    };
    Ok((Bytes::from(out), stats))
}

fn read_u32(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<u32, CompressionError> {
    let at = cursor.position() as usize;
    cursor.read_u32::<LittleEndian>().map_err(|_| {
        CompressionError::malformed(at, format!("stream ended before {}", what))
    })
}
