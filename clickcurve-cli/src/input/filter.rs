//! Click-mode and dataset filtering of container paths

use std::path::{Path, PathBuf};

/// Substring filters applied to container file stems
#[derive(Debug, Clone, Default)]
pub struct SelectionFilter {
    modes: Vec<String>,
    datasets: Vec<String>,
}

impl SelectionFilter {
    /// Build a filter; empty entries are dropped
    ///
    /// No modes keeps every mode, and no datasets keeps every dataset.
    pub fn new<M, D>(modes: M, datasets: D) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let non_empty = |s: &String| !s.trim().is_empty();
        Self {
            modes: modes.into_iter().map(Into::into).filter(non_empty).collect(),
            datasets: datasets
                .into_iter()
                .map(Into::into)
                .map(|s: String| s.trim().to_string())
                .filter(non_empty)
                .collect(),
        }
    }

    /// Whether the file stem names a requested mode and dataset
    pub fn matches(&self, path: &Path) -> bool {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        let any_in = |needles: &[String]| {
            needles.is_empty() || needles.iter().any(|needle| stem.contains(needle.as_str()))
        };
        any_in(self.modes.as_slice()) && any_in(self.datasets.as_slice())
    }

    /// Keep matching files, sorted and deduplicated
    pub fn apply(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = files.into_iter().filter(|f| self.matches(f)).collect();
        files.sort();
        files.dedup();
        files
    }
}
