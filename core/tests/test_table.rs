// Chunk table folding: id order, encounter order and deduplication.

#[cfg(test)]
mod tests {
    use p3d_merge::chunks::{Chunk, ChunkKind, ChunkTable, FoldStats};

    fn ids_of<'a>(chunks: impl Iterator<Item = &'a Chunk>) -> Vec<u32> {
        chunks.map(Chunk::id).collect()
    }

// # ✅ Ordering

    #[test]
    fn ids_keep_first_encounter_order() {
        let table = ChunkTable::fold(
            vec![
                vec![Chunk::build(3, b"a"), Chunk::build(1, b"b")],
                vec![Chunk::build(2, b"c"), Chunk::build(3, b"d")],
            ],
            false,
        );
        assert_eq!(table.ids(), &[3, 1, 2]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(3).len(), 2);
        assert!(table.get(99).is_empty());
    }

    #[test]
    fn encounter_order_is_global_parse_order() {
        let table = ChunkTable::fold(
            vec![
                vec![Chunk::build(3, b"a"), Chunk::build(1, b"b")],
                vec![Chunk::build(3, b"c")],
            ],
            false,
        );
        let payloads: Vec<&[u8]> = table.in_encounter_order().map(Chunk::payload).collect();
        assert_eq!(payloads, vec![&b"a"[..], &b"b"[..], &b"c"[..]]);
    }

    #[test]
    fn priority_order_groups_by_id() {
        let mesh = ChunkKind::Mesh.id();
        let texture = ChunkKind::Texture.id();
        let table = ChunkTable::fold(
            vec![
                vec![Chunk::build(0xDEAD_0001, b"u"), Chunk::build(mesh, b"m1")],
                vec![Chunk::build(texture, b"t"), Chunk::build(mesh, b"m2")],
            ],
            false,
        );
        assert_eq!(
            ids_of(table.in_priority_order()),
            vec![texture, mesh, mesh, 0xDEAD_0001]
        );
        let meshes: Vec<&[u8]> = table.get(mesh).iter().map(Chunk::payload).collect();
        assert_eq!(meshes, vec![&b"m1"[..], &b"m2"[..]]);
    }

    #[test]
    fn empty_table() {
        let table = ChunkTable::new(true);
        assert!(table.is_empty());
        assert_eq!(table.total_bytes(), 0);
        assert_eq!(table.in_priority_order().count(), 0);
    }

// # ✅ Deduplication

    #[test]
    fn identical_chunks_are_dropped_with_dedupe() {
        let mut table = ChunkTable::new(true);
        let stats = table.extend_from_file(vec![
            Chunk::build(7, b"same"),
            Chunk::build(7, b"same"),
            Chunk::build(7, b"other"),
        ]);

        assert_eq!(stats, FoldStats { parsed: 3, kept: 2, discarded: 1 });
        assert_eq!(table.len(), 2);
        assert_eq!(table.discarded(), 1);
        assert_eq!(table.total_bytes(), 16 + 17);
    }

    #[test]
    fn duplicates_across_files_are_dropped() {
        let table = ChunkTable::fold(
            vec![vec![Chunk::build(7, b"x")], vec![Chunk::build(7, b"x")]],
            true,
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.discarded(), 1);
    }

    #[test]
    fn same_bytes_under_different_ids_are_kept() {
        let mut table = ChunkTable::new(true);
        assert!(table.insert(Chunk::build(1, b"payload")));
        assert!(table.insert(Chunk::build(2, b"payload")));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn without_dedupe_everything_is_kept() {
        let mut table = ChunkTable::new(false);
        assert!(table.insert(Chunk::build(7, b"same")));
        assert!(table.insert(Chunk::build(7, b"same")));
        assert_eq!(table.len(), 2);
        assert_eq!(table.discarded(), 0);
    }

    #[test]
    fn first_copy_keeps_its_position() {
        let table = ChunkTable::fold(
            vec![
                vec![Chunk::build(1, b"a"), Chunk::build(2, b"b")],
                vec![Chunk::build(2, b"c"), Chunk::build(1, b"a")],
            ],
            true,
        );
        let payloads: Vec<&[u8]> = table.in_encounter_order().map(Chunk::payload).collect();
        assert_eq!(payloads, vec![&b"a"[..], &b"b"[..], &b"c"[..]]);
    }
}
