//! Per-model summaries combining metrics and display lookups

use crate::aggregate::Aggregation;
use crate::clicks::ClickCap;
use crate::display::{display_dataset_name, DisplayTables, SeriesStyle};
use crate::metrics::{self, Milestone};
use std::fmt::Write;

/// Everything needed to report and draw one model's curve
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSummary {
    /// Model name as stored in the container
    pub model_name: String,
    /// Legend label
    pub label: String,
    /// Color and stroke
    pub style: SeriesStyle,
    /// mIoU per click in percent
    pub percent: Vec<f64>,
    /// Milestone mIoU values in percent
    pub milestones: Vec<Milestone>,
    /// Normalized AUC on the [0, 1] scale
    pub auc: Option<f64>,
}

impl CurveSummary {
    /// Summarize an averaged curve, truncated to `cap`
    pub fn new(model_name: &str, curve: &[f64], cap: ClickCap, tables: &DisplayTables) -> Self {
        let curve = cap.truncate(curve);
        let label = tables.label_for(model_name).to_string();
        let style = tables.style_for(&label);
        let percent = metrics::to_percent(curve);

        Self {
            model_name: model_name.to_string(),
            milestones: metrics::milestones(&percent),
            auc: metrics::normalized_auc(curve),
            percent,
            label,
            style,
        }
    }

    /// Number of clicks on the curve
    pub fn n_clicks(&self) -> usize {
        self.percent.len()
    }

    /// Legend entry: label followed by the normalized AUC
    pub fn legend(&self) -> String {
        match self.auc {
            Some(auc) => format!("{} [{auc:.3}]", self.label),
            None => format!("{} [n/a]", self.label),
        }
    }

    /// Milestones as `mIoU@1=85.13%; mIoU@3=90.02%; ...`
    pub fn milestone_line(&self) -> String {
        let mut line = String::new();
        for (i, milestone) in self.milestones.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            let _ = write!(line, "mIoU@{}={:.2}%;", milestone.click, milestone.value);
        }
        line
    }
}

/// Summaries of every model evaluated on one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    /// Dataset key as stored in the containers
    pub dataset_name: String,
    /// One entry per model, ordered by model name
    pub curves: Vec<CurveSummary>,
}

impl DatasetSummary {
    /// Name used in titles, axis-range lookups and file names
    pub fn display_name(&self) -> &str {
        display_dataset_name(&self.dataset_name)
    }

    /// Longest curve among the models
    pub fn max_clicks(&self) -> usize {
        self.curves.iter().map(CurveSummary::n_clicks).max().unwrap_or(0)
    }
}

/// Summarize every dataset of an aggregation
pub fn summarize(
    aggregation: &Aggregation,
    cap: ClickCap,
    tables: &DisplayTables,
) -> Vec<DatasetSummary> {
    aggregation
        .datasets()
        .map(|(dataset_name, models)| DatasetSummary {
            dataset_name: dataset_name.clone(),
            curves: models
                .iter()
                .map(|(model, curve)| CurveSummary::new(model, curve, cap, tables))
                .collect(),
        })
        .collect()
}
