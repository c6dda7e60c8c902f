//! File merging: walk a tree, frame every qualifying file, write one output

pub mod core;
pub mod types;
pub mod walker;
pub mod writer;

// Re-export main types for easier access
pub use self::core::Aggregator;
pub use types::MergeReport;
pub use walker::{CandidateWalker, has_extension};
pub use writer::FramedWriter;
