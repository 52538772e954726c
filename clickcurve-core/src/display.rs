//! Display tables: legend labels, series styles and y-axis ranges

use crate::error::{CoreError, Result};
use std::collections::HashMap;
use std::str::FromStr;

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = CoreError;

    /// Parse `#rrggbb`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidStyle(format!("color '{s}' is not of the form #rrggbb"));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Stroke pattern of a curve, written with the usual one/two character codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// `-`
    #[default]
    Solid,
    /// `--`
    Dashed,
    /// `:`
    Dotted,
    /// `-.`
    DashDot,
}

impl FromStr for LineStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            other => Err(CoreError::InvalidStyle(format!(
                "unknown line style '{other}'"
            ))),
        }
    }
}

/// Color and stroke of one curve; no color means the plotting default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesStyle {
    /// Stroke color
    pub color: Option<Rgb>,
    /// Stroke pattern
    pub line: LineStyle,
}

impl SeriesStyle {
    /// Parse a style from a color (empty for default) and a line code
    pub fn parse(color: &str, line: &str) -> Result<Self> {
        let color = if color.is_empty() {
            None
        } else {
            Some(color.parse()?)
        };
        Ok(Self {
            color,
            line: line.parse()?,
        })
    }
}

/// Percentage y-axis layout: ticks at `min, min + step, ...` below `max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// First tick
    pub min: f64,
    /// Exclusive upper bound of the ticks
    pub max: f64,
    /// Distance between ticks
    pub step: f64,
}

impl AxisRange {
    /// Create a range, rejecting empty spans and non-positive steps
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        if !(step > 0.0) || !(min < max) {
            return Err(CoreError::InvalidAxisRange(format!(
                "({min}, {max}, {step})"
            )));
        }
        Ok(Self { min, max, step })
    }

    /// Tick positions; `max` itself is excluded
    pub fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).ceil() as usize;
        (0..count)
            .map(|i| self.min + i as f64 * self.step)
            .filter(|&tick| tick < self.max)
            .collect()
    }
}

/// Name a dataset is shown under in titles, lookups and file names
pub fn display_dataset_name(dataset: &str) -> &str {
    match dataset {
        "PascalVOC" => "Pascal VOC",
        other => other,
    }
}

const MODEL_LABELS: &[(&str, &str)] = &[
    ("SimpleClick(ViT-B)_NoBRS", "SimpleClick-ViT-B (SBD)"),
    ("MFP_SimpleClick_V8_NoBRS", "Ours-ViT-B (SBD)"),
    ("GPCIS-ResNet50_Baseline", "GPCIS-ResNet34 (SBD)"),
    ("RITM-HRNet18_NoBRS", "RITM-HRNet18 (SBD)"),
    ("CDNet-HRNet18_CDNet", "CDNet-ResNet34 (SBD)"),
    ("cocolvis_vitl_epoch_54_NoBRS", "Ours-ViT-L (C+L)"),
    ("cocolvis_vith_epoch_52_NoBRS", "Ours-ViT-H (C+L)"),
    ("052_NoBRS", "Ours-ViT-H (C+L)"),
    ("sbd_h18_itermask_NoBRS", "RITM-HRNet18 (SBD)"),
    ("coco_lvis_h32_itermask_NoBRS", "RITM-HRNet32 (C+L)"),
    ("cocolvis_segformer_b3_s2_FocalClick", "FocalClick-SegF-B3 (C+L)"),
    ("cocolvis_segformer_b0_s2_FocalClick", "FocalClick-SegF-B0 (C+L)"),
    ("sbd_cdnet_resnet34_CDNet", "CDNet-ResNet-34 (SBD)"),
    ("cocolvis_cdnet_resnet34_CDNet", "CDNet-ResNet-34 (C+L)"),
];

const SOLID: LineStyle = LineStyle::Solid;
const DOTTED: LineStyle = LineStyle::Dotted;

const LABEL_STYLES: &[(&str, Option<Rgb>, LineStyle)] = &[
    ("Ours-ViT-B (SBD)", Some(Rgb(0x00, 0x00, 0xff)), SOLID),
    ("SimpleClick-ViT-B (SBD)", Some(Rgb(0xff, 0x80, 0x00)), SOLID),
    ("GPCIS-ResNet34 (SBD)", Some(Rgb(0x00, 0x80, 0xff)), SOLID),
    ("CDNet-ResNet34 (SBD)", Some(Rgb(0x00, 0x80, 0x00)), SOLID),
    ("Ours-ViT-L (C+L)", Some(Rgb(0x80, 0x00, 0xff)), SOLID),
    ("Ours-ViT-H (C+L)", Some(Rgb(0xff, 0x80, 0x00)), SOLID),
    ("RITM-HRNet18 (SBD)", Some(Rgb(0x44, 0x44, 0x44)), SOLID),
    ("RITM-HRNet32 (C+L)", Some(Rgb(0x44, 0x44, 0x44)), DOTTED),
    ("FocalClick-SegF-B0 (C+L)", Some(Rgb(0x88, 0x88, 0x88)), DOTTED),
    ("FocalClick-SegF-B3 (C+L)", Some(Rgb(0x88, 0x88, 0x88)), DOTTED),
    ("CDNet-ResNet-34 (SBD)", None, DOTTED),
    ("CDNet-ResNet-34 (C+L)", None, DOTTED),
];

const AXIS_RANGES: &[(&str, f64, f64, f64)] = &[
    ("SBD", 65.0, 96.0, 3.0),
    ("DAVIS", 66.0, 97.0, 3.0),
    ("Pascal VOC", 66.0, 100.0, 3.0),
    ("COCO_MVal", 60.0, 97.0, 3.0),
    ("BraTS", 10.0, 100.0, 10.0),
    ("OAIZIB", 0.0, 85.0, 10.0),
    ("ssTEM", 5.0, 100.0, 10.0),
    ("GrabCut", 80.0, 100.0, 2.0),
    ("Berkeley", 80.0, 100.0, 2.0),
];

/// Lookup tables consulted when labelling and rendering curves
///
/// Built once at startup and passed to the stages that need it.
#[derive(Debug, Clone, Default)]
pub struct DisplayTables {
    labels: HashMap<String, String>,
    styles: HashMap<String, SeriesStyle>,
    axis_ranges: HashMap<String, AxisRange>,
}

impl DisplayTables {
    /// Tables with no entries; every lookup falls back
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tables for the published interactive segmentation baselines
    pub fn builtin() -> Self {
        let labels = MODEL_LABELS
            .iter()
            .map(|&(model, label)| (model.to_string(), label.to_string()))
            .collect();
        let styles = LABEL_STYLES
            .iter()
            .map(|&(label, color, line)| (label.to_string(), SeriesStyle { color, line }))
            .collect();
        let axis_ranges = AXIS_RANGES
            .iter()
            .map(|&(dataset, min, max, step)| (dataset.to_string(), AxisRange { min, max, step }))
            .collect();

        Self {
            labels,
            styles,
            axis_ranges,
        }
    }

    /// Add or replace a model label
    pub fn with_label(mut self, model: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(model.into(), label.into());
        self
    }

    /// Add or replace the style of a label
    pub fn with_style(mut self, label: impl Into<String>, style: SeriesStyle) -> Self {
        self.styles.insert(label.into(), style);
        self
    }

    /// Add or replace the axis range of a dataset display name
    pub fn with_axis_range(mut self, dataset: impl Into<String>, range: AxisRange) -> Self {
        self.axis_ranges.insert(dataset.into(), range);
        self
    }

    /// Legend label of a model, or the model name itself
    pub fn label_for<'a>(&'a self, model: &'a str) -> &'a str {
        self.labels.get(model).map_or(model, String::as_str)
    }

    /// Style of a label, or the default style
    pub fn style_for(&self, label: &str) -> SeriesStyle {
        self.styles.get(label).copied().unwrap_or_default()
    }

    /// Axis range of a dataset display name
    pub fn axis_range(&self, dataset: &str) -> Result<AxisRange> {
        self.axis_ranges
            .get(dataset)
            .copied()
            .ok_or_else(|| CoreError::MissingAxisRange(dataset.to_string()))
    }
}
