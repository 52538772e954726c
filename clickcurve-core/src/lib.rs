//! Aggregation and metrics for interactive segmentation click curves
//!
//! Result containers hold one IoU sequence per evaluated image, indexed by
//! click. This crate averages them per click, summarizes the curves with
//! milestone mIoU values and a normalized AUC, and resolves how each curve
//! is labelled and styled.
//!
//! # Example
//!
//! ```
//! use clickcurve_core::{Aggregator, ClickCap, DisplayTables, ResultContainer, summarize};
//!
//! let mut aggregator = Aggregator::new(ClickCap::from_arg(2));
//! aggregator.add(ResultContainer {
//!     dataset_name: "GrabCut".to_string(),
//!     model_name: "RITM-HRNet18_NoBRS".to_string(),
//!     all_ious: vec![vec![0.8, 0.9, 0.95], vec![0.6, 0.9, 0.97]],
//! })?;
//!
//! let summaries = summarize(&aggregator.finish(), ClickCap::from_arg(2), &DisplayTables::builtin());
//! assert_eq!(summaries[0].curves[0].label, "RITM-HRNet18 (SBD)");
//! assert_eq!(summaries[0].curves[0].percent.len(), 2);
//! # Ok::<(), clickcurve_core::CoreError>(())
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod clicks;
pub mod container;
pub mod display;
pub mod error;
pub mod metrics;
pub mod report;

pub use aggregate::{mean_curve, Aggregation, Aggregator};
pub use clicks::{ClickCap, MILESTONE_CLICKS};
pub use container::{ResultContainer, CONTAINER_EXTENSION};
pub use display::{display_dataset_name, AxisRange, DisplayTables, LineStyle, Rgb, SeriesStyle};
pub use error::{CoreError, Result};
pub use report::{summarize, CurveSummary, DatasetSummary};
