//! merge/options.rs
//! Merge configuration.

use serde::{Deserialize, Serialize};

use crate::types::MergeError;

/// Options for one merge run.
///
/// Missing fields take their defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Drop chunks byte-identical to one already kept under the same id.
    pub dedupe: bool,
    /// Emit chunks grouped by the fixed type priority instead of file order.
    pub sort_by_priority: bool,
    /// Write a history chunk right after the root header.
    pub include_history: bool,
    /// History text; supplied by the caller.
    pub history_lines: Vec<String>,
    /// Merge an existing output file as the first input.
    pub append: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            dedupe: false,
            sort_by_priority: false,
            include_history: true,
            history_lines: Vec::new(),
            append: false,
        }
    }
}

impl MergeOptions {
    pub fn from_json_str(s: &str) -> Result<Self, MergeError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn dedupe(mut self, on: bool) -> Self {
        self.dedupe = on;
        self
    }

    pub fn sort_by_priority(mut self, on: bool) -> Self {
        self.sort_by_priority = on;
        self
    }

    pub fn include_history(mut self, on: bool) -> Self {
        self.include_history = on;
        self
    }

    pub fn history_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn append(mut self, on: bool) -> Self {
        self.append = on;
        self
    }
}
