//! Click-count cap applied to IoU sequences

use std::fmt;
use std::num::NonZeroUsize;

/// Milestone clicks reported for every curve
pub const MILESTONE_CLICKS: [usize; 5] = [1, 3, 5, 10, 20];

/// Maximum number of clicks kept from each sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickCap {
    /// Keep every click
    #[default]
    Unbounded,
    /// Keep the first `n` clicks
    Limit(NonZeroUsize),
}

impl ClickCap {
    /// Build a cap from a command-line value; zero or negative means unbounded
    pub fn from_arg(n_clicks: i64) -> Self {
        usize::try_from(n_clicks)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(ClickCap::Unbounded, ClickCap::Limit)
    }

    /// Leading part of `values` allowed by the cap
    pub fn truncate<'a>(&self, values: &'a [f64]) -> &'a [f64] {
        match self {
            ClickCap::Unbounded => values,
            ClickCap::Limit(n) => &values[..values.len().min(n.get())],
        }
    }
}

impl fmt::Display for ClickCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickCap::Unbounded => write!(f, "all clicks"),
            ClickCap::Limit(n) => write!(f, "{n} clicks"),
        }
    }
}
