//! p3d-merge-core
//!
//! Decompression and merging of P3D asset containers.
//! No CLI, no console output; callers supply paths, options and history text.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod compression;
pub mod chunks;
pub mod telemetry;

pub mod merge;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::chunks::{parse_container, Chunk, ChunkError, ChunkKind, ChunkTable};
    pub use crate::compression::{decompress, CompressionError};
    pub use crate::merge::{merge, merge_files, MergeOptions, MergeReport};
    pub use crate::types::{InputError, MergeError};
}
