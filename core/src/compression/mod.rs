//! compression/mod.rs
//! Decoding of compressed P3D streams.
//!
//! Notes:
//! - A stream either starts with a known codec signature or is returned verbatim.
//! - Compressed streams are a sequence of independent frames; back-references
//!   never cross a frame boundary.
//! - Registry resolves stream signatures to decoder implementations.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;
pub mod stream;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use stream::{decompress, decompress_with_stats, is_compressed, StreamStats};
