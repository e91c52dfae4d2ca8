#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::core::{ChartSpec, ConfigProvider, ExportSpec, Segment, SegmentSpec};
use crate::utils::error::{ChartError, Result};
use crate::utils::validation::{
    parse_hex_color, validate_finite, validate_non_empty_string, validate_path,
    validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_CHART_FILE: &str = "chart.png";
/// Largest canvas side, in pixels, the renderer will allocate.
pub const MAX_CANVAS_PX: u32 = 8192;

/// Built-in fill color for a segment.
pub fn default_color(segment: Segment) -> &'static str {
    match segment {
        Segment::LowValue => "#66c2a5",
        Segment::MediumValue => "#fc8d62",
        Segment::HighValue => "#8da0cb",
    }
}

fn segment(segment: Segment, mean: f64, std_dev: f64, count: usize) -> SegmentSpec {
    SegmentSpec {
        segment,
        mean,
        std_dev,
        count,
        color: default_color(segment).to_string(),
    }
}

/// Everything one chart run needs. `Default` is the stock purchase-amount chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartJob {
    pub seed: u64,
    pub segments: Vec<SegmentSpec>,
    pub chart: ChartSpec,
    pub export: ExportSpec,
}

impl Default for ChartJob {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            segments: vec![
                segment(Segment::HighValue, 450.0, 120.0, 100),
                segment(Segment::MediumValue, 220.0, 50.0, 250),
                segment(Segment::LowValue, 80.0, 25.0, 400),
            ],
            chart: ChartSpec::default(),
            export: ExportSpec::default(),
        }
    }
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            title: "Purchase Amount Distribution by Customer Segment".to_string(),
            x_label: "Customer Segment".to_string(),
            y_label: "Purchase Amount ($)".to_string(),
            display_order: vec![Segment::LowValue, Segment::MediumValue, Segment::HighValue],
            figure_size: (8.0, 8.0),
            dpi: 64,
            box_width: 0.6,
            title_font_pt: 16.0,
            label_font_pt: 12.0,
            tight: true,
            despine: true,
        }
    }
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self {
            chart_file: DEFAULT_CHART_FILE.to_string(),
            table_csv: None,
            summary_json: None,
        }
    }
}

impl ConfigProvider for ChartJob {
    fn seed(&self) -> u64 {
        self.seed
    }

    fn segments(&self) -> &[SegmentSpec] {
        &self.segments
    }

    fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    fn export(&self) -> &ExportSpec {
        &self.export
    }
}

impl Validate for ChartJob {
    fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(ChartError::MissingConfigError {
                field: "segments".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (i, spec) in self.segments.iter().enumerate() {
            let field = |name: &str| format!("segments[{}].{}", i, name);
            if !seen.insert(spec.segment) {
                return Err(ChartError::InvalidConfigValueError {
                    field: field("name"),
                    value: spec.segment.to_string(),
                    reason: "Segment is listed more than once".to_string(),
                });
            }
            validate_positive_number(&field("count"), spec.count, 1)?;
            validate_finite(&field("mean"), spec.mean)?;
            validate_range(&field("std_dev"), spec.std_dev, 0.0, f64::MAX)?;
            parse_hex_color(&field("color"), &spec.color)?;
        }

        let chart = &self.chart;
        if chart.display_order.is_empty() {
            return Err(ChartError::MissingConfigError {
                field: "chart.display_order".to_string(),
            });
        }
        let mut shown = HashSet::new();
        for segment in &chart.display_order {
            if !seen.contains(segment) || !shown.insert(*segment) {
                return Err(ChartError::InvalidConfigValueError {
                    field: "chart.display_order".to_string(),
                    value: segment.to_string(),
                    reason: "Each entry must name a configured segment exactly once".to_string(),
                });
            }
        }

        validate_range("chart.figure_width", chart.figure_size.0, 0.5, 100.0)?;
        validate_range("chart.figure_height", chart.figure_size.1, 0.5, 100.0)?;
        validate_range("chart.dpi", chart.dpi, 8, 1200)?;
        let (width, height) = chart.pixel_dimensions();
        if width > MAX_CANVAS_PX || height > MAX_CANVAS_PX {
            return Err(ChartError::InvalidConfigValueError {
                field: "chart.dpi".to_string(),
                value: format!("{} ({}x{} px)", chart.dpi, width, height),
                reason: format!(
                    "Figure size times dpi must stay within {} px per side",
                    MAX_CANVAS_PX
                ),
            });
        }
        validate_range("chart.box_width", chart.box_width, 0.05, 1.0)?;
        validate_range("chart.title_font_pt", chart.title_font_pt, 1.0, 200.0)?;
        validate_range("chart.label_font_pt", chart.label_font_pt, 1.0, 200.0)?;

        validate_non_empty_string("chart.title", &chart.title)?;
        validate_non_empty_string("chart.x_label", &chart.x_label)?;
        validate_non_empty_string("chart.y_label", &chart.y_label)?;

        validate_path("export.chart_file", &self.export.chart_file)?;
        if let Some(path) = &self.export.table_csv {
            validate_path("export.table_csv", path)?;
        }
        if let Some(path) = &self.export.summary_json {
            validate_path("export.summary_json", path)?;
        }

        Ok(())
    }
}
