//! Output file naming

use crate::error::{CliError, CliResult};
use crate::input::glob_resolver::escaped_dir;
use anyhow::Context;
use glob::{glob, Pattern};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of the written figures
pub const FIGURE_EXTENSION: &str = "png";

/// Create the output directory and its parents
pub fn ensure_dir(dir: &Path) -> CliResult<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

/// Index encoded in `<name>_<digits>.png`, if `file` has that form
fn figure_index(file: &Path, name: &str) -> Option<u64> {
    let stem = file.file_stem()?.to_str()?;
    let digits = stem.strip_prefix(name)?.strip_prefix('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Next free figure path `<dir>/<name>_<NNN>.png`
///
/// The index is one past the highest index already present for `name`,
/// starting at 000.
pub fn next_figure_path(dir: &Path, name: &str) -> CliResult<PathBuf> {
    let pattern = format!(
        "{}{}_*.{}",
        escaped_dir(dir),
        Pattern::escape(name),
        FIGURE_EXTENSION
    );
    let entries = glob(&pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern}: {e}")))?;

    let mut next = 0;
    for entry in entries {
        let path = entry.with_context(|| format!("Error resolving pattern: {}", pattern))?;
        if let Some(index) = figure_index(&path, name) {
            let after = index.checked_add(1).ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "no figure index left after {}",
                    path.display()
                ))
            })?;
            next = next.max(after);
        }
    }

    Ok(dir.join(format!("{name}_{next:03}.{FIGURE_EXTENSION}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_figure() {
        let temp_dir = TempDir::new().unwrap();
        let path = next_figure_path(temp_dir.path(), "GrabCut").unwrap();
        assert_eq!(path, temp_dir.path().join("GrabCut_000.png"));
    }

    #[test]
    fn test_indices_increase() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        let mut written = Vec::new();
        for _ in 0..3 {
            let path = next_figure_path(dir, "GrabCut").unwrap();
            fs::write(&path, b"png").unwrap();
            written.push(path.file_name().unwrap().to_str().unwrap().to_string());
        }
        assert_eq!(
            written,
            vec!["GrabCut_000.png", "GrabCut_001.png", "GrabCut_002.png"]
        );
    }

    #[test]
    fn test_highest_index_wins_over_gaps() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("SBD_000.png"), b"").unwrap();
        fs::write(dir.join("SBD_007.png"), b"").unwrap();
        fs::write(dir.join("SBD_1000.png"), b"").unwrap();

        let path = next_figure_path(dir, "SBD").unwrap();
        assert_eq!(path, dir.join("SBD_1001.png"));
    }

    #[test]
    fn test_other_datasets_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("COCO_MVal_004.png"), b"").unwrap();
        fs::write(dir.join("COCO_MVal_notes_009.png"), b"").unwrap();
        fs::write(dir.join("COCO_005.png"), b"").unwrap();

        assert_eq!(
            next_figure_path(dir, "COCO_MVal").unwrap(),
            dir.join("COCO_MVal_005.png")
        );
        assert_eq!(
            next_figure_path(dir, "COCO").unwrap(),
            dir.join("COCO_006.png")
        );
    }

    #[test]
    fn test_index_beyond_u32() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("GrabCut_4294967295.png"), b"").unwrap();

        assert_eq!(
            next_figure_path(dir, "GrabCut").unwrap(),
            dir.join("GrabCut_4294967296.png")
        );
    }

    #[test]
    fn test_exhausted_index_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join(format!("GrabCut_{}.png", u64::MAX)), b"").unwrap();

        let err = next_figure_path(dir, "GrabCut").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_display_name_with_space() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("Pascal VOC_000.png"), b"").unwrap();

        assert_eq!(
            next_figure_path(dir, "Pascal VOC").unwrap(),
            dir.join("Pascal VOC_001.png")
        );
    }

    #[test]
    fn test_ensure_dir_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("evaluation_logs/iou_analysis");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
