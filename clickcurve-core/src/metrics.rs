//! Curve metrics: percentage scale, milestones and normalized AUC

use crate::clicks::MILESTONE_CLICKS;

/// mIoU after a given number of clicks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    /// Click index, starting at 1
    pub click: usize,
    /// mIoU on the scale of the input curve
    pub value: f64,
}

/// Scale IoU values in [0, 1] to percentages
pub fn to_percent(curve: &[f64]) -> Vec<f64> {
    curve.iter().map(|iou| iou * 100.0).collect()
}

/// Values at the milestone clicks that fit inside the curve
pub fn milestones(curve: &[f64]) -> Vec<Milestone> {
    MILESTONE_CLICKS
        .iter()
        .filter(|&&click| click <= curve.len())
        .map(|&click| Milestone {
            click,
            value: curve[click - 1],
        })
        .collect()
}

/// Trapezoidal-rule area under `y` sampled at `x`
///
/// Both slices are read up to the shorter length.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}

/// Area under `y` over `x` relative to the area under a constant 1.0
///
/// `None` when fewer than two points span a non-empty interval.
pub fn normalized_auc_over(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let x = &x[..n];
    let total = trapezoid(x, &vec![1.0; n]);
    if total == 0.0 {
        return None;
    }
    Some(trapezoid(x, &y[..n]) / total)
}

/// Normalized AUC of a curve sampled at clicks 1..=N
pub fn normalized_auc(curve: &[f64]) -> Option<f64> {
    normalized_auc_over(&click_axis(curve.len()), curve)
}

/// Click indices 1..=n as plot coordinates
pub fn click_axis(n: usize) -> Vec<f64> {
    (1..=n).map(|click| click as f64).collect()
}
