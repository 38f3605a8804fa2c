//! chunks/mod.rs
//! P3D chunk model: parsing, the merge table, priority ordering and encoding.
//!
//! Responsibilities:
//! - Split a decompressed container into top-level chunk spans
//! - Fold chunks from many files into one ordered, optionally deduplicated table
//! - Encode chunk headers and the history chunk
//!
//! Non-responsibilities:
//! - Decompression
//! - File IO
//! - Anything nested below the top-level chunk header

pub mod types;
pub mod decode;
pub mod encode;
pub mod priority;
pub mod table;

pub use types::{Chunk, ChunkError, ChunkKind};
pub use decode::{parse_container, parse_root_header, RootHeader};
pub use encode::{decode_history, encode_history, history_records};
pub use priority::{rank, sort_by_priority, PRIORITY};
pub use table::{ChunkTable, FoldStats};
