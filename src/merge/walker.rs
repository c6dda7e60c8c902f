use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::MergeConfig;

/// Discovers qualifying files under a root directory
///
/// Every subdirectory is descended into: hidden entries, `.gitignore`,
/// `.ignore` and git excludes are not honoured. The only pruning is the
/// opt-in `exclude_dirs` glob list, matched against directory names.
#[derive(Debug, Clone)]
pub struct CandidateWalker {
    root: PathBuf,
    extension: String,
    sort_by_name: bool,
    follow_links: bool,
    exclude_dirs: Option<GlobSet>,
    skip: Vec<PathBuf>,
}

impl CandidateWalker {
    pub fn new(root: impl Into<PathBuf>, config: &MergeConfig) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            extension: config.extension.clone(),
            sort_by_name: config.sort_by_name,
            follow_links: config.follow_links,
            exclude_dirs: build_exclude_set(&config.exclude_dirs)?,
            skip: Vec::new(),
        })
    }

    /// Never yield `path`, even if it qualifies
    ///
    /// Matching is by resolved location, so `w/../out.java` or a symlink to
    /// the skipped file is skipped too. Paths that do not exist yet when
    /// `walk` starts are compared as given.
    pub fn skip_path(&mut self, path: PathBuf) {
        self.skip.push(path);
    }

    /// Lazily yield qualifying files in walk order
    ///
    /// Walk errors (missing root, unreadable directory, symlink loop while
    /// following links) are handed to `on_error` and otherwise skipped.
    pub fn walk<F>(self, mut on_error: F) -> impl Iterator<Item = PathBuf>
    where
        F: FnMut(ignore::Error),
    {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(self.follow_links);

        if self.sort_by_name {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }

        if let Some(exclude) = self.exclude_dirs.clone() {
            builder.filter_entry(move |entry| !is_excluded_dir(entry, &exclude));
        }

        let extension = self.extension;
        let skip: Vec<PathBuf> = self
            .skip
            .into_iter()
            .map(|path| fs::canonicalize(&path).unwrap_or(path))
            .collect();

        builder.build().filter_map(move |entry| match entry {
            Ok(entry) => {
                if !is_candidate(&entry) || !has_extension(entry.path(), &extension) {
                    return None;
                }
                if is_skipped(entry.path(), &skip) {
                    tracing::debug!("Skipping output file {}", entry.path().display());
                    return None;
                }
                Some(entry.into_path())
            }
            Err(err) => {
                on_error(err);
                None
            }
        })
    }
}

/// Case-sensitive suffix match on the file name
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(extension.as_bytes()))
}

fn is_skipped(path: &Path, skip: &[PathBuf]) -> bool {
    if skip.is_empty() {
        return false;
    }
    if skip.iter().any(|skipped| skipped == path) {
        return true;
    }
    fs::canonicalize(path).is_ok_and(|resolved| skip.contains(&resolved))
}

/// Anything that is not a directory is a candidate, including symlinks that
/// do not resolve; reading those later is what fails.
fn is_candidate(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        _ => false,
    }
}

fn is_excluded_dir(entry: &DirEntry, exclude: &GlobSet) -> bool {
    entry.depth() > 0
        && entry.file_type().is_some_and(|ft| ft.is_dir())
        && exclude.is_match(entry.file_name())
}

fn build_exclude_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("Invalid exclude_dirs pattern: {pattern}"))?;
        builder.add(glob);
    }

    Ok(Some(builder.build().context("Failed to compile exclude_dirs patterns")?))
}
