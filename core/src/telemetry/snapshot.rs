//! telemetry/snapshot.rs
//!
//! Immutable summary of one merge run, returned to callers as the merge report.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: TelemetryCounters,
    /// Discarded duplicates over parsed chunks.
    pub dedupe_ratio: f64,
    /// Decompressed bytes over bytes read (1.0 when nothing was compressed).
    pub expansion_ratio: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
    /// Merged container, when the run wrote to memory.
    #[serde(skip)]
    pub output: Option<Vec<u8>>,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let dedupe_ratio = if counters.chunks_parsed > 0 {
            counters.chunks_deduplicated as f64 / counters.chunks_parsed as f64
        } else {
            0.0
        };

        let expansion_ratio = if counters.bytes_read > 0 {
            counters.bytes_decompressed as f64 / counters.bytes_read as f64
        } else {
            1.0
        };

        Self {
            counters: counters.clone(),
            dedupe_ratio,
            expansion_ratio,
            elapsed: timer.elapsed(),
            stage_times: timer.stage_times.clone(),
            output: None,
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal invariants:
    /// - every parsed chunk was either kept or discarded
    /// - stage times fit inside the elapsed time
    pub fn sanity_check(&self) -> bool {
        let c = &self.counters;
        c.chunks_parsed == c.chunks_kept + c.chunks_deduplicated
            && self.total_stage_time() <= self.elapsed
    }

    pub fn attach_output(&mut self, bytes: Vec<u8>) {
        self.output = Some(bytes);
    }

    pub fn output_bytes(&self) -> u64 {
        self.counters.bytes_written
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
