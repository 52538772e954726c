//! CLI command implementations

pub mod plot;

pub use plot::{ClickMode, PlotArgs};
