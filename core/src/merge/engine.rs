//! merge/engine.rs
//! Serialization of a chunk table into one container.
//!
//! Output layout:
//!
//! ```text
//! [ P3D signature ][ 12 ][ file length ]      root descriptor
//! [ history chunk ]                           optional
//! [ chunk ]*                                  file order, or priority order
//! ```

use tracing::debug;

use crate::chunks::encode::{encode_history, patch_u32, put_chunk_header};
use crate::chunks::{Chunk, ChunkError, ChunkTable};
use crate::constants::{CHUNK_HEADER_LEN, FILE_LENGTH_OFFSET, P3D_SIGNATURE};
use crate::merge::options::MergeOptions;

/// Encoded container plus what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub bytes: Vec<u8>,
    pub chunks_written: usize,
    pub history_records: usize,
}

/// Fold `files` in order and serialize the result.
pub fn merge(files: Vec<Vec<Chunk>>, options: &MergeOptions) -> Result<Vec<u8>, ChunkError> {
    let table = ChunkTable::fold(files, options.dedupe);
    Ok(serialize(&table, options)?.bytes)
}

pub fn serialize(table: &ChunkTable, options: &MergeOptions) -> Result<Container, ChunkError> {
    let mut out = Vec::with_capacity(CHUNK_HEADER_LEN + table.total_bytes());
    let root_size = CHUNK_HEADER_LEN as u32;
    put_chunk_header(&mut out, P3D_SIGNATURE, root_size, root_size);

    let mut history_records = 0;
    if options.include_history {
        let history = encode_history(&options.history_lines)?;
        history_records = history_record_count(&history);
        out.extend_from_slice(history.as_bytes());
    }

    let chunks: Box<dyn Iterator<Item = &Chunk> + '_> = if options.sort_by_priority {
        Box::new(table.in_priority_order())
    } else {
        Box::new(table.in_encounter_order())
    };

    let mut chunks_written = 0;
    for chunk in chunks {
        out.extend_from_slice(chunk.as_bytes());
        chunks_written += 1;
    }

    let len = u32::try_from(out.len()).map_err(|_| ChunkError::ContainerTooLarge { len: out.len() })?;
    patch_u32(&mut out, FILE_LENGTH_OFFSET, len);

    debug!(
        chunks = chunks_written,
        history_records,
        sorted = options.sort_by_priority,
        len,
        "serialized container"
    );

    Ok(Container {
        bytes: out,
        chunks_written,
        history_records,
    })
}

fn history_record_count(history: &Chunk) -> usize {
    let payload = history.payload();
    u16::from_le_bytes([payload[0], payload[1]]) as usize
}
