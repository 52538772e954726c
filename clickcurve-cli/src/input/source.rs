//! Where result containers are looked up

use super::glob_resolver::{container_files, resolve_experiment};
use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Subdirectory of a model or experiment directory holding its containers
pub const PLOTS_DIR: &str = "plots";

/// Experiment path fragment paired with a checkpoint-name prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpModel {
    /// Path relative to the evaluation logs, completed by glob
    pub path: String,
    /// Leading part of the container file names to keep
    pub checkpoint_prefix: String,
}

impl FromStr for ExpModel {
    type Err = CliError;

    /// Parse `PATH:PREFIX`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            CliError::InvalidArgument(format!(
                "'{s}' is not of the form PATH:CHECKPOINT_PREFIX"
            ))
        };
        let (path, checkpoint_prefix) = s.split_once(':').ok_or_else(invalid)?;
        if path.is_empty() || checkpoint_prefix.contains(':') {
            return Err(invalid());
        }

        Ok(Self {
            path: path.to_string(),
            checkpoint_prefix: checkpoint_prefix.to_string(),
        })
    }
}

/// Source of result containers
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Every container directly under a folder
    Folder(PathBuf),
    /// Explicit container paths, taken as given
    Files(Vec<PathBuf>),
    /// Containers under `<dir>/plots` of each model directory
    ModelDirs(Vec<PathBuf>),
    /// Checkpoint containers of experiments under the evaluation logs
    ExpModels(Vec<ExpModel>),
}

impl InputSource {
    /// Pick the source among mutually exclusive command-line values
    pub fn from_parts(
        folder: Option<PathBuf>,
        files: Option<Vec<PathBuf>>,
        model_dirs: Option<Vec<PathBuf>>,
        exp_models: Option<Vec<String>>,
    ) -> CliResult<Self> {
        if let Some(folder) = folder {
            Ok(InputSource::Folder(folder))
        } else if let Some(files) = files {
            Ok(InputSource::Files(files))
        } else if let Some(dirs) = model_dirs {
            Ok(InputSource::ModelDirs(dirs))
        } else if let Some(specs) = exp_models {
            let models = specs
                .iter()
                .map(|spec| spec.parse::<ExpModel>())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(InputSource::ExpModels(models))
        } else {
            Err(CliError::NoInputSource.into())
        }
    }

    /// Get the display name for the input source
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Folder(path) => format!("folder {}", path.display()),
            InputSource::Files(files) => format!("{} files", files.len()),
            InputSource::ModelDirs(dirs) => format!("{} model directories", dirs.len()),
            InputSource::ExpModels(models) => format!("{} experiment models", models.len()),
        }
    }

    /// Whether resolving needs the evaluation logs directory
    pub fn needs_evaluation_logs(&self) -> bool {
        matches!(self, InputSource::ExpModels(_))
    }

    /// Container paths of this source, before filtering
    ///
    /// `evaluation_logs` is required for [`InputSource::ExpModels`]. Every
    /// experiment is resolved before any container is listed.
    pub fn resolve(&self, evaluation_logs: Option<&Path>) -> CliResult<Vec<PathBuf>> {
        match self {
            InputSource::Folder(folder) => container_files(folder, ""),
            InputSource::Files(files) => Ok(files.clone()),
            InputSource::ModelDirs(dirs) => {
                let mut files = Vec::new();
                for dir in dirs {
                    let plots = dir.join(PLOTS_DIR);
                    log::info!("Listing {}", plots.display());
                    files.extend(container_files(&plots, "")?);
                }
                Ok(files)
            }
            InputSource::ExpModels(models) => {
                let base = evaluation_logs.ok_or_else(|| {
                    CliError::ConfigError(
                        "--exp-models needs --config-path to locate the experiments".to_string(),
                    )
                })?;

                let experiments = models
                    .iter()
                    .map(|model| resolve_experiment(base, &model.path))
                    .collect::<CliResult<Vec<_>>>()?;

                let mut files = Vec::new();
                for (model, experiment) in models.iter().zip(&experiments) {
                    log::info!("Resolved {} to {}", model.path, experiment.display());
                    files.extend(container_files(
                        &experiment.join(PLOTS_DIR),
                        &model.checkpoint_prefix,
                    )?);
                }
                Ok(files)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_exp_model_parse() {
        let model: ExpModel = "sbd/h18_itermask:checkpoint_054".parse().unwrap();
        assert_eq!(model.path, "sbd/h18_itermask");
        assert_eq!(model.checkpoint_prefix, "checkpoint_054");

        let empty_prefix: ExpModel = "sbd/h18:".parse().unwrap();
        assert_eq!(empty_prefix.checkpoint_prefix, "");
    }

    #[test]
    fn test_exp_model_parse_errors() {
        assert!("sbd/h18".parse::<ExpModel>().is_err());
        assert!(":ckpt".parse::<ExpModel>().is_err());
        assert!("a:b:c".parse::<ExpModel>().is_err());
    }

    #[test]
    fn test_from_parts_requires_a_source() {
        let err = InputSource::from_parts(None, None, None, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NoInputSource)
        ));
    }

    #[test]
    fn test_from_parts_picks_given_source() {
        let source =
            InputSource::from_parts(None, None, Some(vec![PathBuf::from("runs/a")]), None).unwrap();
        assert!(matches!(source, InputSource::ModelDirs(ref dirs) if dirs.len() == 1));
        assert_eq!(source.display_name(), "1 model directories");
        assert!(!source.needs_evaluation_logs());
    }

    #[test]
    fn test_files_are_not_validated() {
        let source = InputSource::Files(vec![PathBuf::from("/nonexistent/a.json")]);
        assert_eq!(
            source.resolve(None).unwrap(),
            vec![PathBuf::from("/nonexistent/a.json")]
        );
    }

    #[test]
    fn test_model_dirs_read_plots_subdir() {
        let temp_dir = TempDir::new().unwrap();
        let model = temp_dir.path().join("model_a");
        fs::create_dir_all(model.join(PLOTS_DIR)).unwrap();
        fs::write(model.join("top_GrabCut.json"), "{}").unwrap();
        fs::write(model.join(PLOTS_DIR).join("m_GrabCut.json"), "{}").unwrap();

        let files = InputSource::ModelDirs(vec![model.clone()]).resolve(None).unwrap();
        assert_eq!(files, vec![model.join(PLOTS_DIR).join("m_GrabCut.json")]);
    }

    #[test]
    fn test_exp_models_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let logs = temp_dir.path();
        let plots = logs.join("sbd/h18_2024").join(PLOTS_DIR);
        fs::create_dir_all(&plots).unwrap();
        fs::write(plots.join("ckpt54_GrabCut.json"), "{}").unwrap();
        fs::write(plots.join("ckpt10_GrabCut.json"), "{}").unwrap();

        let source = InputSource::ExpModels(vec!["sbd/h18:ckpt54".parse().unwrap()]);
        let files = source.resolve(Some(logs)).unwrap();
        assert_eq!(files, vec![plots.join("ckpt54_GrabCut.json")]);
    }

    #[test]
    fn test_exp_models_need_evaluation_logs() {
        let source = InputSource::ExpModels(vec!["sbd/h18:ckpt".parse().unwrap()]);
        assert!(source.needs_evaluation_logs());
        let err = source.resolve(None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }
}
