use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer segment. The set is closed; TOML and CSV use the display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "Low-Value")]
    LowValue,
    #[serde(rename = "Medium-Value")]
    MediumValue,
    #[serde(rename = "High-Value")]
    HighValue,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::LowValue, Segment::MediumValue, Segment::HighValue];

    pub fn label(&self) -> &'static str {
        match self {
            Segment::LowValue => "Low-Value",
            Segment::MediumValue => "Medium-Value",
            Segment::HighValue => "High-Value",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Segment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Segment::ALL
            .into_iter()
            .find(|segment| segment.label() == s)
            .ok_or_else(|| format!("unknown segment '{}'", s))
    }
}

/// Distribution parameters and plotting color for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub segment: Segment,
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSamples {
    pub segment: Segment,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub segment: Segment,
    #[serde(rename = "purchase_amount")]
    pub value: f64,
}

/// Flat, insertion-ordered sample table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    pub(crate) records: Vec<SampleRecord>,
}

/// Tukey box-plot summary of one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub segment: Segment,
    pub count: usize,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub display_order: Vec<Segment>,
    /// Figure size in inches (width, height).
    pub figure_size: (f64, f64),
    pub dpi: u32,
    /// Box width as a fraction of one category slot.
    pub box_width: f64,
    pub title_font_pt: f64,
    pub label_font_pt: f64,
    pub tight: bool,
    pub despine: bool,
}

impl ChartSpec {
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        let dpi = f64::from(self.dpi);
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }

    /// Converts a point size to pixels at the chart's DPI.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSpec {
    pub chart_file: String,
    pub table_csv: Option<String>,
    pub summary_json: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: SampleTable,
    /// One entry per segment, in display order.
    pub stats: Vec<BoxStats>,
}

/// Packed RGB8 raster produced by the renderer.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_label_round_trip() {
        for segment in Segment::ALL {
            assert_eq!(segment.label().parse::<Segment>().unwrap(), segment);
        }
        assert!("Mid-Value".parse::<Segment>().is_err());
    }

    #[test]
    fn test_pixel_dimensions() {
        let spec = ChartSpec {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            display_order: Segment::ALL.to_vec(),
            figure_size: (8.0, 8.0),
            dpi: 64,
            box_width: 0.6,
            title_font_pt: 16.0,
            label_font_pt: 12.0,
            tight: true,
            despine: true,
        };
        assert_eq!(spec.pixel_dimensions(), (512, 512));
        assert!((spec.points_to_px(72.0) - 64.0).abs() < 1e-9);
    }
}
