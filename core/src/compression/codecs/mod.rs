//! compression/codecs/mod.rs
//! Block codecs. Only LZR decoding exists; the merge core never compresses.

pub mod lzr;

pub use lzr::*;
