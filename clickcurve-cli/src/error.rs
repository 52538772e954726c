//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// None of the input source flags was given
    NoInputSource,
    /// Malformed command-line value
    InvalidArgument(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Experiment glob matched no directory
    ExperimentNotFound(String),
    /// Experiment glob matched several directories
    AmbiguousExperiment {
        /// Glob pattern that was searched
        pattern: String,
        /// Number of matching directories
        matches: usize,
    },
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInputSource => write!(
                f,
                "No input given: use one of --folder, --files, --model-dirs or --exp-models"
            ),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ExperimentNotFound(pattern) => {
                write!(f, "Invalid experiment path: no directory matches {pattern}")
            }
            CliError::AmbiguousExperiment { pattern, matches } => write!(
                f,
                "Invalid experiment path: {matches} directories match {pattern}, expected exactly one"
            ),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_source_display() {
        let error = CliError::NoInputSource;
        assert!(error.to_string().starts_with("No input given"));
        assert!(error.to_string().contains("--exp-models"));
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("missing field `exps_path`".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: missing field `exps_path`"
        );
    }

    #[test]
    fn test_experiment_errors_display() {
        let missing = CliError::ExperimentNotFound("/logs/foo/bar*".to_string());
        assert_eq!(
            missing.to_string(),
            "Invalid experiment path: no directory matches /logs/foo/bar*"
        );

        let ambiguous = CliError::AmbiguousExperiment {
            pattern: "/logs/foo/bar*".to_string(),
            matches: 2,
        };
        assert_eq!(
            ambiguous.to_string(),
            "Invalid experiment path: 2 directories match /logs/foo/bar*, expected exactly one"
        );
    }

    #[test]
    fn test_error_downcasts_through_anyhow() {
        let failure: CliResult<()> = Err(CliError::NoInputSource.into());
        let err = failure.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NoInputSource)
        ));
    }
}
