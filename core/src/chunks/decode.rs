//! chunks/decode.rs
//!
//! Container parsing.
//!
//! Design notes:
//! - Only the top level is walked; each chunk keeps its nested children as
//!   opaque bytes inside its span.
//! - The root descriptor (bytes 4..12) is not trusted; parsing always runs to
//!   the end of the buffer.

use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;

use crate::chunks::types::{Chunk, ChunkError};
use crate::constants::{header_offsets, CHUNK_HEADER_LEN, FIRST_CHUNK_OFFSET, P3D_SIGNATURE};

/// Root descriptor as found in a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootHeader {
    pub children_size: u32,
    pub total_size: u32,
}

/// Check the signature and read the root descriptor.
pub fn parse_root_header(buf: &[u8]) -> Result<RootHeader, ChunkError> {
    if buf.len() < CHUNK_HEADER_LEN {
        let mut head = [0u8; 4];
        let n = buf.len().min(4);
        head[..n].copy_from_slice(&buf[..n]);
        return Err(ChunkError::InvalidFormat {
            offset: 0,
            found: u32::from_le_bytes(head),
        });
    }

    let signature = LittleEndian::read_u32(&buf[0..4]);
    if signature != P3D_SIGNATURE {
        return Err(ChunkError::InvalidFormat { offset: 0, found: signature });
    }

    Ok(RootHeader {
        children_size: LittleEndian::read_u32(&buf[header_offsets::CHILDREN_SIZE..]),
        total_size: LittleEndian::read_u32(&buf[header_offsets::TOTAL_SIZE..]),
    })
}

/// Split a decompressed container into its top-level chunks, in file order.
pub fn parse_container(buf: &Bytes) -> Result<Vec<Chunk>, ChunkError> {
    parse_root_header(buf)?;

    let mut chunks = Vec::new();
    let mut pos = FIRST_CHUNK_OFFSET;
    while pos < buf.len() {
        let chunk = parse_chunk_at(buf, pos)?;
        pos += chunk.len();
        chunks.push(chunk);
    }
    Ok(chunks)
}

/// Read the chunk whose header starts at `pos`.
pub fn parse_chunk_at(buf: &Bytes, pos: usize) -> Result<Chunk, ChunkError> {
    let have = buf.len().saturating_sub(pos);
    if have < CHUNK_HEADER_LEN {
        return Err(ChunkError::TruncatedChunk {
            offset: pos,
            need: CHUNK_HEADER_LEN,
            have,
        });
    }

    let id = LittleEndian::read_u32(&buf[pos + header_offsets::ID..]);
    let size = LittleEndian::read_u32(&buf[pos + header_offsets::TOTAL_SIZE..]);

    // a size below the header length would never advance the cursor
    if (size as usize) < CHUNK_HEADER_LEN {
        return Err(ChunkError::UndersizedChunk { offset: pos, id, size });
    }
    if size as usize > have {
        return Err(ChunkError::TruncatedChunk {
            offset: pos,
            need: size as usize,
            have,
        });
    }

    Ok(Chunk::from_parts(id, buf.slice(pos..pos + size as usize)))
}
