use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{chunks::ChunkError, compression::CompressionError};

/// Failure while turning one input into chunks.
///
/// Compression offsets point into the file as stored; chunk offsets point into
/// the decompressed container.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("decompression failed: {0}")]
    Compression(#[from] CompressionError),

    #[error("container parse failed: {0}")]
    Chunk(#[from] ChunkError),
}

impl InputError {
    pub fn offset(&self) -> Option<usize> {
        match self {
            InputError::Compression(e) => e.offset(),
            InputError::Chunk(e) => e.offset(),
        }
    }
}

/// Unified merge error.
/// - Every variant names the file it concerns, where there is one.
/// - `From` impls let the lower layers use `?` up to `merge_files`.
#[derive(Debug, Error)]
pub enum MergeError {
    /// An input could not be decoded or parsed. Nothing has been written.
    #[error("{}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: InputError,
    },

    /// Reading an input or writing the output failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The merged container could not be encoded.
    #[error("output encoding failed: {0}")]
    Output(#[from] ChunkError),

    /// Merge options failed to load.
    #[error("invalid merge options: {0}")]
    Config(String),
}

impl MergeError {
    pub(crate) fn input(path: impl Into<PathBuf>, source: impl Into<InputError>) -> Self {
        MergeError::Input {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MergeError::Io {
            path: path.into(),
            source,
        }
    }

    /// Byte offset that triggered an input failure.
    pub fn offset(&self) -> Option<usize> {
        match self {
            MergeError::Input { source, .. } => source.offset(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MergeError {
    fn from(e: serde_json::Error) -> Self {
        MergeError::Config(e.to_string())
    }
}
