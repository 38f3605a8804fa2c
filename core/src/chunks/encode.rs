//! chunks/encode.rs
//! Chunk header writing, in-place size patching and the history chunk.

use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;

use crate::chunks::types::{Chunk, ChunkError, ChunkKind};
use crate::constants::{header_offsets, history, CHUNK_HEADER_LEN};
use crate::utils::align_up;

/// Append `[id][children size][total size]`.
#[inline]
pub fn put_chunk_header(out: &mut Vec<u8>, id: u32, children_size: u32, total_size: u32) {
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&children_size.to_le_bytes());
    out.extend_from_slice(&total_size.to_le_bytes());
}

/// Overwrite a little-endian u32 already written at `at`.
#[inline]
pub fn patch_u32(out: &mut [u8], at: usize, value: u32) {
    LittleEndian::write_u32(&mut out[at..at + 4], value);
}

/// Split one line into pieces of at most `max` bytes without cutting a UTF-8 sequence.
fn split_line(line: &str, max: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let mut end = rest.len().min(max);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        pieces.push(&rest[..end]);
        rest = &rest[end..];
    }
    pieces
}

/// History records for `lines`: every piece NUL-padded to a multiple of 4.
///
/// Long lines become several records; empty lines produce none.
pub fn history_records<S: AsRef<str>>(lines: &[S]) -> Vec<Vec<u8>> {
    lines
        .iter()
        .flat_map(|line| split_line(line.as_ref(), history::MAX_RECORD_LEN))
        .map(|piece| {
            let mut record = piece.as_bytes().to_vec();
            record.resize(align_up(piece.len(), history::RECORD_ALIGN), 0);
            record
        })
        .collect()
}

/// Build the history chunk:
///
/// ```text
/// [ 0x7000 ][ size ][ size ]
/// [ record count (u16) ]
/// per record: [ padded length (u8) ][ padded bytes ]
/// ```
pub fn encode_history<S: AsRef<str>>(lines: &[S]) -> Result<Chunk, ChunkError> {
    let records = history_records(lines);
    let count = u16::try_from(records.len())
        .map_err(|_| ChunkError::HistoryOverflow { records: records.len() })?;

    let id = ChunkKind::History.id();
    let payload_len: usize = 2 + records.iter().map(|r| 1 + r.len()).sum::<usize>();
    let mut out = Vec::with_capacity(CHUNK_HEADER_LEN + payload_len);

    put_chunk_header(&mut out, id, CHUNK_HEADER_LEN as u32, CHUNK_HEADER_LEN as u32);
    out.extend_from_slice(&count.to_le_bytes());
    for record in &records {
        // padded length never exceeds MAX_RECORD_LEN
        out.push(record.len() as u8);
        out.extend_from_slice(record);
    }

    let size = out.len() as u32;
    patch_u32(&mut out, header_offsets::CHILDREN_SIZE, size);
    patch_u32(&mut out, header_offsets::TOTAL_SIZE, size);

    Ok(Chunk::from_parts(id, Bytes::from(out)))
}

/// Read history lines back out of a history chunk payload.
///
/// Trailing NUL padding is stripped; pieces of a split line stay separate.
pub fn decode_history(chunk: &Chunk) -> Result<Vec<String>, ChunkError> {
    let payload = chunk.payload();
    let truncated = |offset: usize, need: usize| ChunkError::TruncatedChunk {
        offset: CHUNK_HEADER_LEN + offset,
        need,
        have: payload.len().saturating_sub(offset),
    };

    if payload.len() < 2 {
        return Err(truncated(0, 2));
    }
    let count = LittleEndian::read_u16(&payload[..2]) as usize;

    let mut lines = Vec::with_capacity(count);
    let mut pos = 2;
    for _ in 0..count {
        let len = *payload.get(pos).ok_or_else(|| truncated(pos, 1))? as usize;
        pos += 1;
        let text = payload.get(pos..pos + len).ok_or_else(|| truncated(pos, len))?;
        pos += len;
        let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
        lines.push(String::from_utf8_lossy(&text[..end]).into_owned());
    }
    Ok(lines)
}
