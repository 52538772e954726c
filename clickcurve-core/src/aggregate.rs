//! Per-click averaging of result containers

use crate::clicks::ClickCap;
use crate::container::ResultContainer;
use crate::error::{CoreError, Result};
use std::collections::btree_map::{self, BTreeMap};
use std::path::Path;

/// Element-wise mean of per-image IoU sequences after applying `cap`
///
/// Every truncated sequence must have the same length. An empty input
/// yields an empty curve.
pub fn mean_curve(sequences: &[Vec<f64>], cap: ClickCap) -> Result<Vec<f64>> {
    let Some(first) = sequences.first() else {
        return Ok(Vec::new());
    };
    let expected = cap.truncate(first).len();
    let mut sums = vec![0.0; expected];

    for (image, sequence) in sequences.iter().enumerate() {
        let clicks = cap.truncate(sequence);
        if clicks.len() != expected {
            return Err(CoreError::RaggedSequences {
                image,
                expected,
                found: clicks.len(),
            });
        }
        for (sum, iou) in sums.iter_mut().zip(clicks) {
            *sum += iou;
        }
    }

    let n_images = sequences.len() as f64;
    Ok(sums.into_iter().map(|sum| sum / n_images).collect())
}

/// Averaged curves keyed by dataset name, then model name
///
/// Both levels iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    datasets: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
}

impl Aggregation {
    /// Create an empty aggregation
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a curve, returning the one it replaced
    pub fn insert(
        &mut self,
        dataset: impl Into<String>,
        model: impl Into<String>,
        curve: Vec<f64>,
    ) -> Option<Vec<f64>> {
        self.datasets
            .entry(dataset.into())
            .or_default()
            .insert(model.into(), curve)
    }

    /// Curve of one model on one dataset
    pub fn get(&self, dataset: &str, model: &str) -> Option<&[f64]> {
        self.datasets
            .get(dataset)
            .and_then(|models| models.get(model))
            .map(Vec::as_slice)
    }

    /// Datasets with their per-model curves
    pub fn datasets(&self) -> btree_map::Iter<'_, String, BTreeMap<String, Vec<f64>>> {
        self.datasets.iter()
    }

    /// Number of datasets
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether no curve has been stored
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Folds result containers into an [`Aggregation`]
#[derive(Debug, Default)]
pub struct Aggregator {
    cap: ClickCap,
    aggregation: Aggregation,
}

impl Aggregator {
    /// Create an aggregator truncating sequences to `cap`
    pub fn new(cap: ClickCap) -> Self {
        Self {
            cap,
            aggregation: Aggregation::new(),
        }
    }

    /// Average one container; a later container for the same pair wins
    pub fn add(&mut self, container: ResultContainer) -> Result<()> {
        if container.all_ious.is_empty() {
            return Err(CoreError::EmptyContainer {
                dataset: container.dataset_name,
                model: container.model_name,
            });
        }

        let curve = mean_curve(&container.all_ious, self.cap)?;
        let replaced = self.aggregation.insert(
            container.dataset_name.as_str(),
            container.model_name.as_str(),
            curve,
        );
        if replaced.is_some() {
            log::warn!(
                "Results for {} on {} were loaded twice; keeping the later file",
                container.model_name,
                container.dataset_name
            );
        }
        Ok(())
    }

    /// Decode and average one container file
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let container = ResultContainer::from_path(path)?;
        self.add(container)
    }

    /// Finish and return the aggregated curves
    pub fn finish(self) -> Aggregation {
        self.aggregation
    }
}
