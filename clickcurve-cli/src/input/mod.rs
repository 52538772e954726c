//! Input handling module

pub mod filter;
pub mod glob_resolver;
pub mod source;

pub use filter::SelectionFilter;
pub use glob_resolver::{container_files, resolve_experiment};
pub use source::{ExpModel, InputSource, PLOTS_DIR};
