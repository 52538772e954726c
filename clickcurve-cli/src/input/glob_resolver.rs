//! Container and experiment resolution using glob

use crate::error::{CliError, CliResult};
use anyhow::Context;
use clickcurve_core::CONTAINER_EXTENSION;
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// Run a glob pattern and keep the paths accepted by `keep`
fn glob_paths(pattern: &str, keep: impl Fn(&Path) -> bool) -> CliResult<Vec<PathBuf>> {
    let paths = glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern}: {e}")))?;

    let mut matches = Vec::new();
    for path_result in paths {
        let path = path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

        if keep(&path) {
            matches.push(path);
        }
    }

    log::debug!("{} matched {} paths", pattern, matches.len());
    Ok(matches)
}

/// Escaped glob prefix for `dir` with a trailing separator
pub(crate) fn escaped_dir(dir: &Path) -> String {
    let mut prefix = Pattern::escape(&dir.to_string_lossy());
    if !prefix.is_empty() && !prefix.ends_with(std::path::MAIN_SEPARATOR) {
        prefix.push(std::path::MAIN_SEPARATOR);
    }
    prefix
}

/// Container files directly under `dir` whose names start with `prefix`
///
/// A missing directory yields no files.
pub fn container_files(dir: &Path, prefix: &str) -> CliResult<Vec<PathBuf>> {
    let pattern = format!(
        "{}{}*.{}",
        escaped_dir(dir),
        Pattern::escape(prefix),
        CONTAINER_EXTENSION
    );
    let mut files = glob_paths(&pattern, Path::is_file)?;
    files.sort();
    Ok(files)
}

/// The single directory matching `<base>/<fragment>*`
///
/// Only the last component of `fragment` is completed; zero or several
/// matching directories are an error.
pub fn resolve_experiment(base: &Path, fragment: &str) -> CliResult<PathBuf> {
    let prefix = base.join(fragment);
    let (Some(parent), Some(stem)) = (prefix.parent(), prefix.file_name()) else {
        return Err(CliError::InvalidArgument(format!(
            "experiment path '{fragment}' has no final component"
        ))
        .into());
    };

    let pattern = format!(
        "{}{}*",
        escaped_dir(parent),
        Pattern::escape(&stem.to_string_lossy())
    );
    let mut candidates = glob_paths(&pattern, Path::is_dir)?;

    match candidates.len() {
        1 => Ok(candidates.remove(0)),
        0 => Err(CliError::ExperimentNotFound(pattern).into()),
        matches => Err(CliError::AmbiguousExperiment { pattern, matches }.into()),
    }
}
