//! Plot command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{InputSource, SelectionFilter};
use crate::output::{ensure_dir, next_figure_path};
use crate::progress::ProgressReporter;
use crate::render::render_dataset;
use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use clickcurve_core::{summarize, Aggregator, ClickCap, DisplayTables};
use std::path::PathBuf;

/// Plot mIoU against the number of clicks for interactive segmentation results
#[derive(Debug, Parser)]
#[command(name = "clickcurve", version, about)]
#[command(group(ArgGroup::new("source").multiple(false)))]
pub struct PlotArgs {
    /// Folder with result containers
    #[arg(long, value_name = "PATH", group = "source")]
    pub folder: Option<PathBuf>,

    /// Result container files
    #[arg(long, value_name = "PATH", num_args = 1.., group = "source")]
    pub files: Option<Vec<PathBuf>>,

    /// Model directories with a 'plots' folder of result containers
    #[arg(long, value_name = "PATH", num_args = 1.., group = "source")]
    pub model_dirs: Option<Vec<PathBuf>>,

    /// Experiment paths relative to <exps_path>/evaluation_logs, each with a
    /// checkpoint prefix after ':'
    #[arg(long, value_name = "PATH:PREFIX", num_args = 1.., group = "source")]
    pub exp_models: Option<Vec<String>>,

    /// Click modes to keep (substring of the file name)
    #[arg(long, value_enum, num_args = 0..)]
    pub mode: Vec<ClickMode>,

    /// Comma-separated dataset names to keep (substring of the file name)
    #[arg(long, default_value = "GrabCut")]
    pub datasets: String,

    /// Configuration file defining exps_path
    #[arg(long, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Maximum number of clicks to plot (-1 for all)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub n_clicks: i64,

    /// Output directory [default: <exps_path>/evaluation_logs/iou_analysis]
    #[arg(long, value_name = "PATH")]
    pub plots_path: Option<PathBuf>,

    /// Suppress logging and progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Click-handling modes of the evaluation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClickMode {
    /// No backpropagating refinement
    #[value(name = "NoBRS")]
    NoBrs,
    /// BRS on the input image
    #[value(name = "RGB-BRS")]
    RgbBrs,
    /// BRS on the distance maps
    #[value(name = "DistMap-BRS")]
    DistMapBrs,
    /// Feature BRS, variant A
    #[value(name = "f-BRS-A")]
    FBrsA,
    /// Feature BRS, variant B
    #[value(name = "f-BRS-B")]
    FBrsB,
    /// Feature BRS, variant C
    #[value(name = "f-BRS-C")]
    FBrsC,
}

impl ClickMode {
    /// Name as it appears in container file names
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickMode::NoBrs => "NoBRS",
            ClickMode::RgbBrs => "RGB-BRS",
            ClickMode::DistMapBrs => "DistMap-BRS",
            ClickMode::FBrsA => "f-BRS-A",
            ClickMode::FBrsB => "f-BRS-B",
            ClickMode::FBrsC => "f-BRS-C",
        }
    }
}

impl PlotArgs {
    /// Execute the plot command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting click-curve analysis");
        log::debug!("Arguments: {:?}", self);

        let source = self.input_source()?;
        let config = self.load_config()?;
        if source.needs_evaluation_logs() && config.is_none() {
            return Err(CliError::ConfigError(
                "--exp-models needs --config-path to locate the experiments".to_string(),
            )
            .into());
        }
        let tables = match &config {
            Some(config) => config.display_tables()?,
            None => DisplayTables::builtin(),
        };

        let plots_path = self.resolve_plots_path(config.as_ref())?;
        println!("{}", plots_path.display());
        ensure_dir(&plots_path)?;

        println!("Processing {}", source.display_name());
        let evaluation_logs = config.as_ref().map(CliConfig::evaluation_logs);
        let files = self
            .selection_filter()
            .apply(source.resolve(evaluation_logs.as_deref())?);
        for file in &files {
            println!("{}", file.display());
        }
        if files.is_empty() {
            log::warn!("No result containers matched the selection");
        }

        let cap = ClickCap::from_arg(self.n_clicks);
        log::info!("Averaging {} containers over {}", files.len(), cap);

        let mut aggregator = Aggregator::new(cap);
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_containers(files.len() as u64);
        for file in &files {
            aggregator
                .add_file(file)
                .with_context(|| format!("Failed to load result container: {}", file.display()))?;
            progress.container_loaded(&file.file_name().unwrap_or_default().to_string_lossy());
        }
        progress.finish();

        for dataset in summarize(&aggregator.finish(), cap, &tables) {
            for curve in &dataset.curves {
                println!(
                    "{} on {}:\n{}\n",
                    curve.model_name,
                    dataset.dataset_name,
                    curve.milestone_line()
                );
            }

            let name = dataset.display_name();
            let axis = tables.axis_range(name)?;
            let figure = next_figure_path(&plots_path, name)?;
            render_dataset(&figure, &dataset, axis)
                .with_context(|| format!("Failed to render {}", figure.display()))?;
            println!("Saved {}", figure.display());
        }

        Ok(())
    }

    /// Input source selected on the command line
    pub fn input_source(&self) -> Result<InputSource> {
        InputSource::from_parts(
            self.folder.clone(),
            self.files.clone(),
            self.model_dirs.clone(),
            self.exp_models.clone(),
        )
    }

    /// Mode and dataset filters selected on the command line
    pub fn selection_filter(&self) -> SelectionFilter {
        SelectionFilter::new(
            self.mode.iter().map(ClickMode::as_str),
            self.datasets.split(','),
        )
    }

    fn load_config(&self) -> Result<Option<CliConfig>> {
        self.config_path
            .as_deref()
            .map(CliConfig::from_file)
            .transpose()
    }

    fn resolve_plots_path(&self, config: Option<&CliConfig>) -> Result<PathBuf> {
        match (&self.plots_path, config) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(config)) => Ok(config.default_plots_path()),
            (None, None) => Err(CliError::ConfigError(
                "--plots-path is required when no --config-path is given".to_string(),
            )
            .into()),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_command_definition() {
        PlotArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = PlotArgs::try_parse_from(["clickcurve", "--folder", "runs"]).unwrap();
        assert_eq!(args.folder, Some(PathBuf::from("runs")));
        assert_eq!(args.datasets, "GrabCut");
        assert_eq!(args.n_clicks, -1);
        assert!(args.mode.is_empty());
        assert!(args.plots_path.is_none());
    }

    #[test]
    fn test_sources_are_mutually_exclusive() {
        let result = PlotArgs::try_parse_from([
            "clickcurve",
            "--folder",
            "runs",
            "--files",
            "a.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_modes_and_negative_clicks() {
        let args = PlotArgs::try_parse_from([
            "clickcurve",
            "--files",
            "a.json",
            "b.json",
            "--mode",
            "NoBRS",
            "f-BRS-B",
            "--n-clicks",
            "-1",
        ])
        .unwrap();
        assert_eq!(args.files.as_ref().map(Vec::len), Some(2));
        assert_eq!(args.mode, vec![ClickMode::NoBrs, ClickMode::FBrsB]);
        assert_eq!(args.n_clicks, -1);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result =
            PlotArgs::try_parse_from(["clickcurve", "--folder", "runs", "--mode", "BRS-X"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_source_is_reported() {
        let args = PlotArgs::try_parse_from(["clickcurve", "--plots-path", "out"]).unwrap();
        let err = args.input_source().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NoInputSource)
        ));
    }

    #[test]
    fn test_plots_path_needs_config_or_flag() {
        let args = PlotArgs::try_parse_from(["clickcurve", "--folder", "runs"]).unwrap();
        assert!(args.resolve_plots_path(None).is_err());

        let args =
            PlotArgs::try_parse_from(["clickcurve", "--folder", "runs", "--plots-path", "out"])
                .unwrap();
        assert_eq!(args.resolve_plots_path(None).unwrap(), PathBuf::from("out"));
    }

    #[test]
    fn test_exp_models_without_config_fail_before_output() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");
        let args = PlotArgs::try_parse_from([
            OsStr::new("clickcurve"),
            OsStr::new("--exp-models"),
            OsStr::new("sbd/001:epoch"),
            OsStr::new("--plots-path"),
            out.as_os_str(),
            OsStr::new("--quiet"),
        ])
        .unwrap();

        let err = args.execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_quiet_runs_repeat_in_process() {
        let temp_dir = TempDir::new().unwrap();
        let runs = temp_dir.path().join("runs");
        let out = temp_dir.path().join("out");
        fs::create_dir_all(&runs).unwrap();
        fs::write(
            runs.join("mine_Berkeley_NoBRS.json"),
            r#"{"dataset_name": "Berkeley", "model_name": "mine", "all_ious": [[0.85, 0.9]]}"#,
        )
        .unwrap();

        let args = PlotArgs::try_parse_from([
            OsStr::new("clickcurve"),
            OsStr::new("--folder"),
            runs.as_os_str(),
            OsStr::new("--datasets"),
            OsStr::new("Berkeley"),
            OsStr::new("--plots-path"),
            out.as_os_str(),
            OsStr::new("-q"),
        ])
        .unwrap();
        args.execute().unwrap();
        args.execute().unwrap();

        assert!(out.join("Berkeley_000.png").is_file());
        assert!(out.join("Berkeley_001.png").is_file());
    }

    #[test]
    fn test_execute_writes_figure() {
        let temp_dir = TempDir::new().unwrap();
        let runs = temp_dir.path().join("runs");
        let out = temp_dir.path().join("out/nested");
        fs::create_dir_all(&runs).unwrap();
        fs::write(
            runs.join("mine_GrabCut_NoBRS.json"),
            r#"{"dataset_name": "GrabCut", "model_name": "mine_NoBRS", "all_ious": [[0.85, 0.9, 0.95], [0.87, 0.92, 0.97]]}"#,
        )
        .unwrap();

        let args = PlotArgs::try_parse_from([
            OsStr::new("clickcurve"),
            OsStr::new("--folder"),
            runs.as_os_str(),
            OsStr::new("--plots-path"),
            out.as_os_str(),
            OsStr::new("--quiet"),
        ])
        .unwrap();
        args.execute().unwrap();

        assert!(out.join("GrabCut_000.png").is_file());
    }
}
