//! Result containers produced by the evaluation runs

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// File extension of result containers
pub const CONTAINER_EXTENSION: &str = "json";

/// Per-image IoU sequences of one model evaluated on one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultContainer {
    /// Dataset the model was evaluated on
    pub dataset_name: String,
    /// Name of the evaluated model (checkpoint and click mode)
    pub model_name: String,
    /// One IoU sequence per image, indexed by click starting at 1
    pub all_ious: Vec<Vec<f64>>,
}

impl ResultContainer {
    /// Decode a container from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let container: ResultContainer = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| CoreError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!(
            "Decoded {} ({} on {}, {} images)",
            path.display(),
            container.model_name,
            container.dataset_name,
            container.all_ious.len()
        );
        Ok(container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("GrabCut_NoBRS.json");
        fs::write(
            &path,
            r#"{"dataset_name": "GrabCut", "model_name": "m_NoBRS", "all_ious": [[0.5, 0.9], [0.7, 0.8]], "extra": 1}"#,
        )
        .unwrap();

        let container = ResultContainer::from_path(&path).unwrap();
        assert_eq!(container.dataset_name, "GrabCut");
        assert_eq!(container.model_name, "m_NoBRS");
        assert_eq!(container.all_ious, vec![vec![0.5, 0.9], vec![0.7, 0.8]]);
    }

    #[test]
    fn test_missing_field_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, r#"{"dataset_name": "GrabCut", "model_name": "m"}"#).unwrap();

        let err = ResultContainer::from_path(&path).unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ResultContainer::from_path(Path::new("/nonexistent/run.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }
}
