//! merge/io.rs
//! Input/output normalization and the file-level merge entry points.
//!
//! Every input is read, decoded and parsed before the output is touched, so a
//! bad input never leaves a partial output behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, info};

use crate::chunks::{parse_container, Chunk, ChunkTable};
use crate::compression::{decompress_with_stats, StreamStats};
use crate::merge::engine::serialize;
use crate::merge::options::MergeOptions;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::MergeError;

/// Summary of a finished merge.
pub type MergeReport = TelemetrySnapshot;

/// Canonical input abstraction
#[derive(Debug, Clone)]
pub enum InputSource {
    File(PathBuf),
    Memory { name: String, bytes: Bytes },
}

impl InputSource {
    pub fn memory(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        InputSource::Memory {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Path used in errors and logs.
    pub fn label(&self) -> PathBuf {
        match self {
            InputSource::File(p) => p.clone(),
            InputSource::Memory { name, .. } => PathBuf::from(format!("<memory:{}>", name)),
        }
    }

    fn read(&self) -> Result<Bytes, MergeError> {
        match self {
            InputSource::File(p) => fs::read(p)
                .map(Bytes::from)
                .map_err(|e| MergeError::io(p, e)),
            InputSource::Memory { bytes, .. } => Ok(bytes.clone()),
        }
    }
}

/// Canonical output abstraction
#[derive(Debug, Clone)]
pub enum OutputSink {
    File(PathBuf),
    /// Keep the container in the report (`TelemetrySnapshot::output`).
    Memory,
}

/// Read, decompress and parse one input.
pub fn load_input(
    src: &InputSource,
    timer: &mut TelemetryTimer,
) -> Result<(Vec<Chunk>, StreamStats), MergeError> {
    let label = src.label();

    let raw = timer.time(Stage::Read, || src.read())?;
    let (container, stream) = timer
        .time(Stage::Decompress, || decompress_with_stats(raw))
        .map_err(|e| MergeError::input(&label, e))?;
    let chunks = timer
        .time(Stage::Parse, || parse_container(&container))
        .map_err(|e| MergeError::input(&label, e))?;

    debug!(
        input = %label.display(),
        codec = stream.codec.map(|c| c.name()).unwrap_or("raw"),
        frames = stream.frames,
        bytes_in = stream.bytes_in,
        bytes_out = stream.bytes_out,
        chunks = chunks.len(),
        "loaded input"
    );
    Ok((chunks, stream))
}

/// Merge `inputs` in order into `sink`.
pub fn merge_sources(
    inputs: &[InputSource],
    sink: &OutputSink,
    options: &MergeOptions,
) -> Result<MergeReport, MergeError> {
    let mut timer = TelemetryTimer::new();
    let mut counters = TelemetryCounters::default();

    let mut files = Vec::with_capacity(inputs.len());
    for src in inputs {
        let (chunks, stream) = load_input(src, &mut timer)?;
        counters.add_input(&stream);
        files.push(chunks);
    }

    let container = timer.time(Stage::Merge, || -> Result<_, MergeError> {
        let mut table = ChunkTable::new(options.dedupe);
        for chunks in files {
            let fold = table.extend_from_file(chunks);
            counters.add_fold(&fold);
        }
        Ok(serialize(&table, options)?)
    })?;

    counters.add_output(container.history_records, container.bytes.len());

    let output = match sink {
        OutputSink::File(path) => {
            timer.time(Stage::Write, || write_output(path, &container.bytes))?;
            None
        }
        OutputSink::Memory => Some(container.bytes),
    };

    timer.finish();
    let mut report = TelemetrySnapshot::from(&counters, &timer);
    if let Some(bytes) = output {
        report.attach_output(bytes);
    }

    info!(
        inputs = counters.files_read,
        kept = counters.chunks_kept,
        deduplicated = counters.chunks_deduplicated,
        bytes = counters.bytes_written,
        "merge complete"
    );
    Ok(report)
}

/// Merge container files into `output`.
///
/// With `options.append` set and `output` present, the existing output is
/// merged as the first input.
pub fn merge_files<P, Q>(
    inputs: &[P],
    output: Q,
    options: &MergeOptions,
) -> Result<MergeReport, MergeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let output = output.as_ref();

    let mut sources = Vec::with_capacity(inputs.len() + 1);
    if options.append && output.is_file() {
        debug!(output = %output.display(), "appending to existing output");
        sources.push(InputSource::File(output.to_path_buf()));
    }
    sources.extend(inputs.iter().map(|p| InputSource::File(p.as_ref().to_path_buf())));

    merge_sources(&sources, &OutputSink::File(output.to_path_buf()), options)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), MergeError> {
    let mut file = File::create(path).map_err(|e| MergeError::io(path, e))?;
    file.write_all(bytes).map_err(|e| MergeError::io(path, e))?;
    file.flush().map_err(|e| MergeError::io(path, e))
}
