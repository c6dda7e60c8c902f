//! # srcmerge - Merge a source tree into one file
//!
//! Walks a directory tree, selects every file whose name ends with a
//! configured extension (`.java` by default), and writes each one into a
//! single output file between Start/End marker comments.
//!
//! ## Quick Start
//!
//! ```bash
//! # Merge ./**/*.java into ./merged_sources.txt
//! srcmerge
//!
//! # Point it somewhere else
//! SRCMERGE_ROOT_DIR=/srv/app/src SRCMERGE_OUTPUT_FILE=/tmp/app.txt srcmerge
//! ```
//!
//! ## Library use
//!
//! ```rust,no_run
//! use srcmerge::{Aggregator, MergeConfig};
//!
//! let config = MergeConfig::new("src", "all_sources.txt");
//! let report = Aggregator::new(config).run()?;
//! println!("{}", report.summary_line());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod merge;

pub use cli::{Cli, Output};
pub use config::MergeConfig;
pub use merge::{Aggregator, MergeReport};

