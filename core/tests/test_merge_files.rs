// File-level merge: compressed and raw inputs, append mode, failures and options.

mod common;

#[cfg(test)]
mod tests {
    use std::fs;

    use bytes::Bytes;
    use tempfile::tempdir;

    use p3d_merge::chunks::{parse_container, Chunk, ChunkKind};
    use p3d_merge::merge::{merge_files, merge_sources, InputSource, MergeOptions, OutputSink};
    use p3d_merge::telemetry::Stage;
    use p3d_merge::types::{InputError, MergeError};

    use crate::common::{compress_literal, container, u32_at};

    fn plain() -> MergeOptions {
        MergeOptions::default().include_history(false)
    }

// # ✅ Happy path

    #[test]
    fn compressed_and_raw_inputs_merge() {
        let dir = tempdir().unwrap();
        let packed = dir.path().join("packed.p3d");
        let raw = dir.path().join("raw.p3d");
        let out = dir.path().join("out.p3d");

        let first = Chunk::build(ChunkKind::Mesh.id(), b"compressed mesh");
        let second = Chunk::build(ChunkKind::Camera.id(), b"raw camera");
        fs::write(&packed, compress_literal(&container(&[first.clone()]))).unwrap();
        fs::write(&raw, container(&[second.clone()])).unwrap();

        let report = merge_files(&[&packed, &raw], &out, &plain()).unwrap();

        let written = Bytes::from(fs::read(&out).unwrap());
        assert_eq!(u32_at(&written, 8) as usize, written.len());
        assert_eq!(parse_container(&written).unwrap(), vec![first, second]);

        let c = &report.counters;
        assert_eq!(c.files_read, 2);
        assert_eq!(c.files_compressed, 1);
        assert_eq!(c.frames_decoded, 1);
        assert_eq!(c.chunks_parsed, 2);
        assert_eq!(c.chunks_kept, 2);
        assert_eq!(c.bytes_written, written.len() as u64);
        assert!(report.output.is_none());
        assert!(report.sanity_check());
        assert!(report.has_all_stages(&[
            Stage::Read,
            Stage::Decompress,
            Stage::Parse,
            Stage::Merge,
            Stage::Write,
        ]));
    }

    #[test]
    fn output_is_overwritten_without_append() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.p3d");
        let out = dir.path().join("out.p3d");

        fs::write(&input, container(&[Chunk::build(1, b"new")])).unwrap();
        fs::write(&out, container(&[Chunk::build(2, b"old")])).unwrap();

        merge_files(&[&input], &out, &plain()).unwrap();

        let chunks = parse_container(&Bytes::from(fs::read(&out).unwrap())).unwrap();
        assert_eq!(chunks, vec![Chunk::build(1, b"new")]);
    }

    #[test]
    fn append_merges_existing_output_first() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.p3d");
        let out = dir.path().join("out.p3d");

        fs::write(&input, container(&[Chunk::build(1, b"new")])).unwrap();
        fs::write(&out, container(&[Chunk::build(2, b"old")])).unwrap();

        let report = merge_files(&[&input], &out, &plain().append(true)).unwrap();
        assert_eq!(report.counters.files_read, 2);

        let chunks = parse_container(&Bytes::from(fs::read(&out).unwrap())).unwrap();
        assert_eq!(chunks, vec![Chunk::build(2, b"old"), Chunk::build(1, b"new")]);
    }

    #[test]
    fn append_without_existing_output_is_a_plain_merge() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.p3d");
        let out = dir.path().join("fresh.p3d");
        fs::write(&input, container(&[Chunk::build(1, b"only")])).unwrap();

        let report = merge_files(&[&input], &out, &plain().append(true)).unwrap();
        assert_eq!(report.counters.files_read, 1);
        assert!(out.is_file());
    }

    #[test]
    fn memory_sources_and_sink() {
        let sources = [
            InputSource::memory("a", container(&[Chunk::build(7, b"dup")])),
            InputSource::memory("b", compress_literal(&container(&[Chunk::build(7, b"dup")]))),
        ];

        let report = merge_sources(&sources, &OutputSink::Memory, &plain().dedupe(true)).unwrap();

        let out = report.output.clone().unwrap();
        assert_eq!(out.len() as u64, report.output_bytes());
        assert_eq!(parse_container(&Bytes::from(out)).unwrap().len(), 1);
        assert_eq!(report.counters.chunks_deduplicated, 1);
        assert_eq!(report.dedupe_ratio, 0.5);
        assert!(report.sanity_check());
    }

// # ❌ Failures

    #[test]
    fn bad_input_names_file_and_leaves_no_output() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.p3d");
        let bad = dir.path().join("bad.p3d");
        let out = dir.path().join("out.p3d");

        fs::write(&good, container(&[Chunk::build(1, b"ok")])).unwrap();
        fs::write(&bad, b"not a container at all").unwrap();

        let err = merge_files(&[&good, &bad], &out, &plain()).unwrap_err();
        match &err {
            MergeError::Input { path, source: InputError::Chunk(_) } => assert_eq!(path, &bad),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.offset(), Some(0));
        assert!(err.to_string().contains("bad.p3d"));
        assert!(!out.exists());
    }

    #[test]
    fn corrupt_compressed_input_reports_stream_offset() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.p3d");
        let out = dir.path().join("out.p3d");

        let mut stream = compress_literal(&container(&[Chunk::build(1, b"payload")]));
        stream.truncate(stream.len() - 4);
        fs::write(&bad, &stream).unwrap();

        let err = merge_files(&[&bad], &out, &plain()).unwrap_err();
        assert!(matches!(
            err,
            MergeError::Input { source: InputError::Compression(_), .. }
        ));
        assert!(err.offset().is_some());
        assert!(!out.exists());
    }

    #[test]
    fn missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.p3d");
        let out = dir.path().join("out.p3d");

        let err = merge_files(&[&missing], &out, &plain()).unwrap_err();
        match err {
            MergeError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!out.exists());
    }

// # Options

    #[test]
    fn options_from_json_fill_defaults() {
        let options = MergeOptions::from_json_str(r#"{ "dedupe": true }"#).unwrap();
        assert!(options.dedupe);
        assert!(!options.sort_by_priority);
        assert!(options.include_history);
        assert!(options.history_lines.is_empty());
        assert!(!options.append);

        let full = MergeOptions::from_json_str(
            r#"{ "sort_by_priority": true, "include_history": false, "history_lines": ["a"] }"#,
        )
        .unwrap();
        assert_eq!(
            full,
            MergeOptions::default()
                .sort_by_priority(true)
                .include_history(false)
                .history_lines(["a"])
        );
    }

    #[test]
    fn invalid_options_json_is_config_error() {
        let err = MergeOptions::from_json_str("{ dedupe: yes }").unwrap_err();
        assert!(matches!(err, MergeError::Config(_)));
    }
}
