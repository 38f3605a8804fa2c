/// Container signature "P3D\xFF" (u32, little-endian on the wire).
pub const P3D_SIGNATURE: u32 = 0xFF44_3350;

/// Every chunk header, including the root descriptor: `[id][children size][total size]`.
pub const CHUNK_HEADER_LEN: usize = 12;

/// Offset of the first top-level chunk in a container.
pub const FIRST_CHUNK_OFFSET: usize = CHUNK_HEADER_LEN;

/// Header field offsets relative to the start of a chunk.
pub mod header_offsets {
    pub const ID: usize = 0;
    pub const CHILDREN_SIZE: usize = 4;
    pub const TOTAL_SIZE: usize = 8;
}

/// Offset of the root "total size" field; holds the final file length.
pub const FILE_LENGTH_OFFSET: usize = header_offsets::TOTAL_SIZE;

/// History chunk limits.
pub mod history {
    /// Longest piece a single history record may carry (already a multiple of 4).
    pub const MAX_RECORD_LEN: usize = 252;
    /// Record payloads are NUL-padded to this alignment.
    pub const RECORD_ALIGN: usize = 4;
}
