use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{self, Path};
use std::time::Instant;

use super::types::MergeReport;
use super::walker::CandidateWalker;
use super::writer::FramedWriter;
use crate::config::MergeConfig;

/// Concatenates every qualifying file under the root into one output file
///
/// The run is single-threaded: the output handle is held for the whole run
/// and each input is read fully and closed before the next one is opened.
/// Walk errors are logged and skipped; a file that cannot be read aborts the
/// run, leaving whatever was already written.
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: MergeConfig,
}

impl Aggregator {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<MergeReport> {
        let start_time = Instant::now();

        let root = absolute(&self.config.root_dir)?;
        let output_path = absolute(&self.config.output_file)?;

        let mut walker = CandidateWalker::new(&root, &self.config)?;
        walker.skip_path(output_path.clone());

        let file = File::create(&output_path)
            .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;
        let mut writer = FramedWriter::new(BufWriter::new(file), self.config.comment_prefix.as_str());

        tracing::info!(
            "Merging {} files under {} into {}",
            self.config.extension,
            root.display(),
            output_path.display()
        );

        let mut files_merged = 0;
        let mut bytes_copied = 0u64;
        let mut walk_errors = 0;

        let candidates = walker.walk(|err| {
            walk_errors += 1;
            tracing::warn!("Walk error: {}", err);
        });

        for path in candidates {
            let content =
                fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;

            writer.write_file(&path, &content).with_context(|| {
                format!(
                    "Failed to write {} to {}",
                    path.display(),
                    output_path.display()
                )
            })?;

            tracing::debug!("Merged {} ({} bytes)", path.display(), content.len());
            files_merged += 1;
            bytes_copied += content.len() as u64;
        }

        let bytes_written = writer.bytes_written();
        writer
            .finish()
            .with_context(|| format!("Failed to flush output file: {}", output_path.display()))?;

        let report = MergeReport {
            output_file: self.config.output_file.clone(),
            output_path,
            extension: self.config.extension.clone(),
            files_merged,
            bytes_copied,
            bytes_written,
            walk_errors,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Merged {} files ({} bytes) in {}ms",
            report.files_merged,
            report.bytes_copied,
            report.duration_ms
        );

        Ok(report)
    }
}

fn absolute(path: &Path) -> Result<std::path::PathBuf> {
    path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup_tree(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = temp_dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        temp_dir
    }

    fn run_into(root: &Path, output: &Path) -> MergeReport {
        Aggregator::new(MergeConfig::new(root, output)).run().unwrap()
    }

    #[test]
    fn test_concrete_scenario() {
        let tree = setup_tree(&[("pkg/Foo.java", "class Foo {}")]);
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");

        let report = run_into(tree.path(), &output);

        let foo = tree.path().join("pkg/Foo.java");
        let expected = format!(
            "\n\n// ====== Start of {0} ======\nclass Foo {{}}\n// ====== End of {0} ======\n",
            foo.display()
        );
        assert_eq!(fs::read_to_string(&output).unwrap(), expected);
        assert_eq!(report.files_merged, 1);
        assert_eq!(report.bytes_copied, 12);
        assert_eq!(report.bytes_written, expected.len() as u64);
        assert_eq!(report.walk_errors, 0);
    }

    #[test]
    fn test_only_matching_extension_is_merged() {
        let tree = setup_tree(&[
            ("A.java", "class A {}"),
            ("sub/B.java", "class B {}"),
            ("C.txt", "plain text C"),
            ("D.JAVA", "class D {}"),
        ]);
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");

        let report = run_into(tree.path(), &output);
        let merged = fs::read_to_string(&output).unwrap();

        assert_eq!(report.files_merged, 2);
        assert!(merged.contains(&format!("Start of {}", tree.path().join("A.java").display())));
        assert!(merged.contains(&format!("End of {}", tree.path().join("sub/B.java").display())));
        assert!(merged.contains("class A {}"));
        assert!(merged.contains("class B {}"));
        assert!(!merged.contains("C.txt"));
        assert!(!merged.contains("plain text C"));
        assert!(!merged.contains("D.JAVA"));
    }

    #[test]
    fn test_empty_root_produces_empty_output() {
        let tree = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");
        fs::write(&output, "stale contents").unwrap();

        let report = run_into(tree.path(), &output);

        assert_eq!(report.files_merged, 0);
        assert_eq!(fs::read(&output).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_missing_root_is_not_an_error() {
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");

        let report = run_into(&out_dir.path().join("nowhere"), &output);

        assert_eq!(report.files_merged, 0);
        assert_eq!(report.walk_errors, 1);
        assert!(output.exists());
        assert_eq!(fs::metadata(&output).unwrap().len(), 0);
    }

    #[test]
    fn test_runs_are_idempotent() {
        let tree = setup_tree(&[
            ("z/Z.java", "z"),
            ("a/A.java", "a"),
            ("m/n/M.java", "m"),
        ]);
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");

        run_into(tree.path(), &output);
        let first = fs::read(&output).unwrap();
        run_into(tree.path(), &output);
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_content_round_trips_byte_for_byte() {
        let tree = TempDir::new().unwrap();
        let source = tree.path().join("Weird.java");
        let content: &[u8] = b"class Weird {\r\n  // \xe9\xff\r\n}\r\n";
        fs::write(&source, content).unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");

        run_into(tree.path(), &output);

        let merged = fs::read(&output).unwrap();
        let header = format!("\n\n// ====== Start of {} ======\n", source.display());
        let footer = format!("\n// ====== End of {} ======\n", source.display());
        assert_eq!(&merged[..header.len()], header.as_bytes());
        assert_eq!(&merged[header.len()..header.len() + content.len()], content);
        assert_eq!(&merged[header.len() + content.len()..], footer.as_bytes());
    }

    #[test]
    fn test_output_inside_root_is_not_merged_into_itself() {
        let tree = setup_tree(&[("A.java", "class A {}")]);
        let output = tree.path().join("Combined.java");

        let report = run_into(tree.path(), &output);
        let merged = fs::read_to_string(&output).unwrap();

        assert_eq!(report.files_merged, 1);
        assert!(!merged.contains("Combined.java"));
    }

    #[test]
    fn test_output_reached_through_dotdot_root_is_not_merged() {
        let tree = setup_tree(&[("A.java", "class A {}")]);
        fs::create_dir(tree.path().join("w")).unwrap();
        let output = tree.path().join("Combined.java");

        let report = run_into(&tree.path().join("w/.."), &output);
        let merged = fs::read_to_string(&output).unwrap();

        assert_eq!(report.files_merged, 1);
        assert!(!merged.contains("Combined.java"));
        assert!(merged.contains("class A {}"));
    }

    #[test]
    fn test_custom_extension_and_prefix() {
        let tree = setup_tree(&[("lib/util.py", "x = 1\n"), ("Main.java", "class Main {}")]);
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");

        let mut config = MergeConfig::new(tree.path(), &output).with_extension(".py");
        config.comment_prefix = "#".to_string();
        let report = Aggregator::new(config).run().unwrap();

        let merged = fs::read_to_string(&output).unwrap();
        assert_eq!(report.files_merged, 1);
        assert!(merged.starts_with("\n\n# ====== Start of "));
        assert!(merged.ends_with("util.py ======\n"));
        assert!(!merged.contains("class Main"));
    }

    #[test]
    fn test_relative_paths_are_made_absolute() {
        let report = Aggregator::new(MergeConfig::new(
            PathBuf::from("definitely-missing-dir"),
            std::env::temp_dir().join(format!("srcmerge-rel-{}.txt", std::process::id())),
        ))
        .run()
        .unwrap();

        assert!(report.output_path.is_absolute());
        fs::remove_file(&report.output_path).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_candidate_is_fatal() {
        let tree = setup_tree(&[("A.java", "class A {}")]);
        std::os::unix::fs::symlink(tree.path().join("gone"), tree.path().join("Broken.java"))
            .unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");

        let err = Aggregator::new(MergeConfig::new(tree.path(), &output))
            .run()
            .unwrap_err();

        assert!(err.to_string().contains("Broken.java"));
        // A.java sorts before Broken.java and was already written
        assert!(fs::read_to_string(&output).unwrap().contains("class A {}"));
    }

    #[test]
    fn test_invalid_exclude_pattern_fails_before_touching_output() {
        let tree = setup_tree(&[("A.java", "class A {}")]);
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("all.txt");

        let mut config = MergeConfig::new(tree.path(), &output);
        config.exclude_dirs = vec!["[bad".to_string()];

        assert!(Aggregator::new(config).run().is_err());
        assert!(!output.exists());
    }
}
