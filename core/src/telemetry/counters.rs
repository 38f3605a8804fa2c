//! telemetry/counters.rs
//! Mutable counters used during a merge run.
//!
//! Summary: Collects per-file decode counts and per-chunk fold counts.
//! Converted into an immutable TelemetrySnapshot at the end of the run.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::chunks::FoldStats;
use crate::compression::StreamStats;

/// Deterministic counters collected during one merge
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub files_read: u64,
    pub files_compressed: u64,
    pub frames_decoded: u64,
    pub bytes_read: u64,
    pub bytes_decompressed: u64,
    pub chunks_parsed: u64,
    pub chunks_kept: u64,
    pub chunks_deduplicated: u64,
    pub history_records: u64,
    pub bytes_written: u64,
}

impl TelemetryCounters {
    /// Record one input after stream decoding.
    pub fn add_input(&mut self, stream: &StreamStats) {
        self.files_read += 1;
        if stream.codec.is_some() {
            self.files_compressed += 1;
        }
        self.frames_decoded += stream.frames;
        self.bytes_read += stream.bytes_in;
        self.bytes_decompressed += stream.bytes_out;
    }

    /// Record one file folded into the chunk table.
    pub fn add_fold(&mut self, fold: &FoldStats) {
        self.chunks_parsed += fold.parsed;
        self.chunks_kept += fold.kept;
        self.chunks_deduplicated += fold.discarded;
    }

    pub fn add_output(&mut self, history_records: usize, bytes_written: usize) {
        self.history_records += history_records as u64;
        self.bytes_written += bytes_written as u64;
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.files_read += other.files_read;
        self.files_compressed += other.files_compressed;
        self.frames_decoded += other.frames_decoded;
        self.bytes_read += other.bytes_read;
        self.bytes_decompressed += other.bytes_decompressed;
        self.chunks_parsed += other.chunks_parsed;
        self.chunks_kept += other.chunks_kept;
        self.chunks_deduplicated += other.chunks_deduplicated;
        self.history_records += other.history_records;
        self.bytes_written += other.bytes_written;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
