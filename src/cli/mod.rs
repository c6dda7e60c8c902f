//! Command-line interface for srcmerge
//!
//! There are no positional arguments: root, output and extension come from
//! configuration. The flags only choose an extra config file and how chatty
//! the run is.

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod output;

pub use output::Output;

use crate::config::MergeConfig;
use crate::merge::Aggregator;

#[derive(Parser)]
#[command(
    name = "srcmerge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Merge every file with a given extension under a directory into one file",
    long_about = "srcmerge walks a directory tree, selects files whose name ends with the \
                  configured extension, and writes each one into a single output file \
                  between Start/End marker comments. Paths and the extension are read \
                  from srcmerge.toml, --config, or SRCMERGE_* environment variables."
)]
pub struct Cli {
    /// Use custom configuration file
    #[arg(short, long, value_name = "FILE", env = "SRCMERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);

        let config = MergeConfig::load_with_custom_config(self.config.as_deref())?;
        output.verbose_step("📂", &format!("Root: {}", config.root_dir.display()));
        output.verbose_step("📄", &format!("Output: {}", config.output_file.display()));
        output.verbose_step("🔎", &format!("Extension: {}", config.extension));

        let report = Aggregator::new(config).run()?;

        output.verbose_summary("✔", "Files merged", report.files_merged);
        output.verbose_breakdown("bytes copied", report.bytes_copied as usize);
        if report.walk_errors > 0 {
            output.verbose_breakdown("walk errors skipped", report.walk_errors);
        }

        output.completion(&report.summary_line());
        Ok(())
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
