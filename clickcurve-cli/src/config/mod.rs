//! Configuration module

use crate::error::{CliError, CliResult};
use anyhow::Context;
use clickcurve_core::{AxisRange, DisplayTables, SeriesStyle};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the experiments path holding evaluation outputs
pub const EVALUATION_LOGS_DIR: &str = "evaluation_logs";

/// Default output directory, relative to the evaluation logs
pub const IOU_ANALYSIS_DIR: &str = "iou_analysis";

/// CLI configuration structure
#[derive(Debug, Deserialize)]
pub struct CliConfig {
    /// Root of the experiments tree
    #[serde(alias = "EXPS_PATH")]
    pub exps_path: PathBuf,

    /// Extra model-name to legend-label entries
    #[serde(default)]
    pub labels: HashMap<String, String>,

    /// Extra legend-label to style entries
    #[serde(default)]
    pub styles: HashMap<String, StyleConfig>,

    /// Extra dataset to `[min, max, step]` y-axis entries
    #[serde(default)]
    pub axis_ranges: HashMap<String, [f64; 3]>,
}

/// Style entry of the configuration file
#[derive(Debug, Deserialize)]
pub struct StyleConfig {
    /// `#rrggbb`, or empty for the default color
    #[serde(default)]
    pub color: String,

    /// `-`, `--`, `:` or `-.`
    #[serde(default = "default_line")]
    pub line: String,
}

fn default_line() -> String {
    "-".to_string()
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            anyhow::Error::from(CliError::ConfigError(format!("{}: {e}", path.display())))
        })
    }

    /// Directory holding the evaluation logs of every experiment
    pub fn evaluation_logs(&self) -> PathBuf {
        self.exps_path.join(EVALUATION_LOGS_DIR)
    }

    /// Output directory used when none is given on the command line
    pub fn default_plots_path(&self) -> PathBuf {
        self.evaluation_logs().join(IOU_ANALYSIS_DIR)
    }

    /// Built-in display tables extended with the entries of this file
    pub fn display_tables(&self) -> CliResult<DisplayTables> {
        let mut tables = DisplayTables::builtin();

        for (model, label) in &self.labels {
            tables = tables.with_label(model, label);
        }
        for (label, style) in &self.styles {
            let parsed = SeriesStyle::parse(&style.color, &style.line)
                .with_context(|| format!("Invalid style for '{label}'"))?;
            tables = tables.with_style(label, parsed);
        }
        for (dataset, &[min, max, step]) in &self.axis_ranges {
            let range = AxisRange::new(min, max, step)
                .with_context(|| format!("Invalid axis range for '{dataset}'"))?;
            tables = tables.with_axis_range(dataset, range);
        }

        Ok(tables)
    }
}
