use std::path::PathBuf;

/// Outcome of a successful merge run
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Output path as configured
    pub output_file: PathBuf,
    /// Absolute output path actually written
    pub output_path: PathBuf,
    pub extension: String,
    pub files_merged: usize,
    /// Source bytes copied, excluding markers
    pub bytes_copied: u64,
    /// Total bytes written to the output, markers included
    pub bytes_written: u64,
    pub walk_errors: usize,
    pub duration_ms: u64,
}

impl MergeReport {
    /// The completion line printed after a successful run
    pub fn summary_line(&self) -> String {
        format!(
            "All {} files have been combined into {}",
            self.extension,
            self.output_file.display()
        )
    }
}
