//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use bytes::Bytes;
use p3d_merge::chunks::Chunk;
use p3d_merge::compression::signatures;
use p3d_merge::constants::P3D_SIGNATURE;

/// Encode `data` as plain literal runs of at most 15 bytes.
pub fn lzr_literals(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 15 + 1);
    for run in data.chunks(15) {
        out.push(run.len() as u8);
        out.extend_from_slice(run);
    }
    out
}

/// One frame: encoded block, its decoded length and trailing padding.
pub struct Frame {
    pub encoded: Vec<u8>,
    pub uncompressed_len: u32,
    pub padding: usize,
}

impl Frame {
    pub fn new(encoded: Vec<u8>, uncompressed_len: usize) -> Self {
        Self { encoded, uncompressed_len: uncompressed_len as u32, padding: 0 }
    }

    pub fn padded(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }
}

/// `[signature][total][compiled][uncompressed][block + padding]...`
pub fn lzr_stream(frames: &[Frame]) -> Vec<u8> {
    let total: u32 = frames.iter().map(|f| f.uncompressed_len).sum();
    let mut out = Vec::new();
    out.extend_from_slice(&signatures::LZR.to_le_bytes());
    out.extend_from_slice(&total.to_le_bytes());
    for f in frames {
        let compiled = (f.encoded.len() + f.padding) as u32;
        out.extend_from_slice(&compiled.to_le_bytes());
        out.extend_from_slice(&f.uncompressed_len.to_le_bytes());
        out.extend_from_slice(&f.encoded);
        out.extend(std::iter::repeat(0xEEu8).take(f.padding));
    }
    out
}

/// Whole container compressed as a single all-literal frame.
pub fn compress_literal(container: &[u8]) -> Vec<u8> {
    lzr_stream(&[Frame::new(lzr_literals(container), container.len())])
}

/// Raw chunk span with explicit header fields.
pub fn raw_chunk(id: u32, children_size: u32, payload: &[u8]) -> Vec<u8> {
    let total = (12 + payload.len()) as u32;
    let mut span = Vec::new();
    span.extend_from_slice(&id.to_le_bytes());
    span.extend_from_slice(&children_size.to_le_bytes());
    span.extend_from_slice(&total.to_le_bytes());
    span.extend_from_slice(payload);
    span
}

/// Container around already-encoded chunk spans.
pub fn container_from_spans(spans: &[&[u8]]) -> Vec<u8> {
    let body: usize = spans.iter().map(|s| s.len()).sum();
    let mut out = Vec::with_capacity(12 + body);
    out.extend_from_slice(&P3D_SIGNATURE.to_le_bytes());
    out.extend_from_slice(&12u32.to_le_bytes());
    out.extend_from_slice(&((12 + body) as u32).to_le_bytes());
    for s in spans {
        out.extend_from_slice(s);
    }
    out
}

pub fn container(chunks: &[Chunk]) -> Bytes {
    let spans: Vec<&[u8]> = chunks.iter().map(Chunk::as_bytes).collect();
    Bytes::from(container_from_spans(&spans))
}

pub fn u32_at(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(buf[at..at + 4].try_into().unwrap())
}
