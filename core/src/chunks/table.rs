//! chunks/table.rs
//! Ordered multimap of chunks, folded from parsed files.
//!
//! Notes:
//! - Id order is first encounter across all files, in file order.
//! - A separate encounter sequence keeps the global parse order of kept chunks,
//!   which is what unsorted output emits.
//! - With dedupe on, a BLAKE3 digest index narrows candidates; equality is
//!   always confirmed byte for byte.

use std::collections::HashMap;

use tracing::trace;

use crate::chunks::priority::sort_by_priority;
use crate::chunks::types::Chunk;

/// Result of folding one file into the table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FoldStats {
    pub parsed: u64,
    pub kept: u64,
    pub discarded: u64,
}

#[derive(Debug, Default)]
pub struct ChunkTable {
    dedupe: bool,
    ids: Vec<u32>,
    by_id: HashMap<u32, Vec<Chunk>>,
    /// (id, index into `by_id[id]`) for every kept chunk.
    sequence: Vec<(u32, usize)>,
    digests: HashMap<(u32, blake3::Hash), Vec<usize>>,
    discarded: u64,
}

impl ChunkTable {
    pub fn new(dedupe: bool) -> Self {
        Self { dedupe, ..Default::default() }
    }

    /// Fold parsed files, in order, into a fresh table.
    pub fn fold<I>(files: I, dedupe: bool) -> Self
    where
        I: IntoIterator<Item = Vec<Chunk>>,
    {
        let mut table = Self::new(dedupe);
        for chunks in files {
            table.extend_from_file(chunks);
        }
        table
    }

    /// Move one file's chunks into the table, in parse order.
    pub fn extend_from_file(&mut self, chunks: Vec<Chunk>) -> FoldStats {
        let mut stats = FoldStats::default();
        for chunk in chunks {
            stats.parsed += 1;
            if self.insert(chunk) {
                stats.kept += 1;
            } else {
                stats.discarded += 1;
            }
        }
        stats
    }

    /// Insert one chunk. Returns `false` when it was discarded as a duplicate.
    pub fn insert(&mut self, chunk: Chunk) -> bool {
        let id = chunk.id();

        let digest = if self.dedupe {
            let digest = blake3::hash(chunk.as_bytes());
            if self.is_duplicate(id, &digest, &chunk) {
                self.discarded += 1;
                trace!(chunk = %chunk.name(), len = chunk.len(), "discarding duplicate chunk");
                return false;
            }
            Some(digest)
        } else {
            None
        };

        let list = self.by_id.entry(id).or_insert_with(|| {
            self.ids.push(id);
            Vec::new()
        });
        let index = list.len();
        list.push(chunk);
        self.sequence.push((id, index));

        if let Some(digest) = digest {
            self.digests.entry((id, digest)).or_default().push(index);
        }
        true
    }

    fn is_duplicate(&self, id: u32, digest: &blake3::Hash, chunk: &Chunk) -> bool {
        let (Some(candidates), Some(kept)) =
            (self.digests.get(&(id, *digest)), self.by_id.get(&id))
        else {
            return false;
        };
        candidates
            .iter()
            .any(|&i| kept[i].as_bytes() == chunk.as_bytes())
    }

    /// Ids in first-encounter order.
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Kept chunks of `id`, in encounter order.
    pub fn get(&self, id: u32) -> &[Chunk] {
        self.by_id.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of kept chunks.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Chunks dropped as duplicates so far.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Sum of all kept span lengths.
    pub fn total_bytes(&self) -> usize {
        self.by_id.values().flatten().map(Chunk::len).sum()
    }

    /// Kept chunks in global encounter order.
    pub fn in_encounter_order(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.sequence
            .iter()
            .map(move |&(id, index)| &self.by_id[&id][index])
    }

    /// Kept chunks grouped by id: listed ids by priority, then the rest by first encounter.
    pub fn in_priority_order(&self) -> impl Iterator<Item = &Chunk> + '_ {
        let mut ids = self.ids.clone();
        sort_by_priority(&mut ids);
        ids.into_iter().flat_map(move |id| self.get(id).iter())
    }
}
