//! merge/mod.rs
//! Merge engine: options, container serialization and file-level entry points.

pub mod options;
pub mod engine;
pub mod io;

pub use options::MergeOptions;
pub use engine::{merge, serialize, Container};
pub use io::{load_input, merge_files, merge_sources, InputSource, MergeReport, OutputSink};
