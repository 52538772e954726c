//! PNG rendering of mIoU-vs-clicks figures

use crate::error::CliResult;
use clickcurve_core::metrics::click_axis;
use clickcurve_core::{AxisRange, CurveSummary, DatasetSummary, LineStyle, Rgb};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// Figure size in pixels
pub const FIGURE_SIZE: (u32, u32) = (1200, 700);

const FONT: &str = "sans-serif";
const STROKE_WIDTH: u32 = 2;
// Share of the data span added on each side of an axis
const MARGIN: f64 = 0.05;

/// Pad `lo..hi` on both sides; a degenerate span gets a fixed half-width
fn padded(lo: f64, hi: f64, degenerate_half_width: f64) -> (f64, f64) {
    if hi > lo {
        let pad = (hi - lo) * MARGIN;
        (lo - pad, hi + pad)
    } else {
        (lo - degenerate_half_width, hi + degenerate_half_width)
    }
}

/// y view covering the table ticks and every data point
fn y_view(summary: &DatasetSummary, ticks: &[f64], axis: AxisRange) -> (f64, f64) {
    let values = summary.curves.iter().flat_map(|c| c.percent.iter().copied());
    let (lo, hi) = values
        .chain(ticks.iter().copied())
        .fold((axis.min, axis.min), |(lo, hi), v| (lo.min(v), hi.max(v)));
    padded(lo, hi, axis.step)
}

/// x view covering clicks 1..=max_clicks
fn x_view(max_clicks: usize) -> (f64, f64) {
    padded(1.0, max_clicks.max(1) as f64, 0.5)
}

/// Linear f64 axis whose key points are a fixed list of ticks
struct TickedAxis {
    coord: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedAxis {
    fn new((lo, hi): (f64, f64), ticks: Vec<f64>) -> Self {
        Self {
            coord: (lo..hi).into(),
            ticks,
        }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

fn series_style(curve: &CurveSummary, default_index: &mut usize) -> ShapeStyle {
    match curve.style.color {
        Some(Rgb(r, g, b)) => RGBColor(r, g, b).stroke_width(STROKE_WIDTH),
        None => {
            let color = Palette99::pick(*default_index);
            *default_index += 1;
            color.stroke_width(STROKE_WIDTH)
        }
    }
}

/// Draw every model of a dataset into a PNG at `path`
///
/// y key points come from `axis`; x key points sit at every click.
pub fn render_dataset(
    path: &Path,
    summary: &DatasetSummary,
    axis: AxisRange,
) -> CliResult<()> {
    let max_clicks = summary.max_clicks();
    let y_ticks = axis.ticks();
    let y_axis = TickedAxis::new(y_view(summary, &y_ticks, axis), y_ticks);
    let x_axis = TickedAxis::new(x_view(max_clicks), click_axis(max_clicks));

    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(summary.display_name(), (FONT, 40))
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(x_axis, y_axis)?;

    chart
        .configure_mesh()
        .x_desc("Number of Clicks")
        .y_desc("mIoU score (%)")
        .x_label_formatter(&|x: &f64| format!("{:.0}", x))
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .label_style((FONT, 22).into_font())
        .axis_desc_style((FONT, 24).into_font())
        .draw()?;

    let mut default_index = 0;
    for curve in &summary.curves {
        let style = series_style(curve, &mut default_index);
        let points: Vec<(f64, f64)> = click_axis(curve.n_clicks())
            .into_iter()
            .zip(curve.percent.iter().copied())
            .collect();

        let series = match curve.style.line {
            LineStyle::Solid => chart.draw_series(LineSeries::new(points, style))?,
            LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(points, 14, 8, style))?,
            LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(points, 3, 5, style))?,
            LineStyle::DashDot => chart.draw_series(DashedLineSeries::new(points, 10, 5, style))?,
        };
        series
            .label(curve.legend())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .label_font((FONT, 22).into_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
