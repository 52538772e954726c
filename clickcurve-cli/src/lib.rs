//! clickcurve CLI library
//!
//! Command-line front end that averages interactive-segmentation results
//! per click and plots mIoU-vs-clicks curves.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod render;

pub use error::{CliError, CliResult};
