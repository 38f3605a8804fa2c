//! compression/registry.rs
//! Codec registry and factory functions.

use crate::compression::codecs::lzr;
use crate::compression::types::{CompressionError, Decompressor, StreamCodec};

pub struct CodecInfo {
    pub name: &'static str,
    pub signature: u32,
}

pub fn resolve(signature: u32) -> Result<CodecInfo, CompressionError> {
    match StreamCodec::try_from(signature) {
        Ok(codec) => Ok(CodecInfo { name: codec.name(), signature }),
        Err(_) => Err(CompressionError::UnsupportedCodec { signature }),
    }
}

pub fn create_decompressor(codec: StreamCodec) -> Box<dyn Decompressor> {
    match codec {
        StreamCodec::Lzr => Box::new(lzr::LzrDecompressor::new()),
    }
}
