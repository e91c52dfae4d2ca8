use crate::core::{BoxStats, ChartSpec, RenderedChart, Segment, SegmentSpec};
use crate::utils::error::{ChartError, Result};
use crate::utils::validation::parse_hex_color;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_backend::{DrawingBackend, DrawingErrorKind};
use std::collections::HashMap;

const EDGE_COLOR: RGBColor = RGBColor(61, 61, 61);
const GRID_COLOR: RGBColor = RGBColor(224, 224, 224);
const OUTLIER_RADIUS: i32 = 3;

pub type SegmentPalette = HashMap<Segment, RGBColor>;

enum DrawFailure {
    Font(String),
    Other(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for DrawFailure {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        match err {
            DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(e)) => {
                DrawFailure::Font(e.to_string())
            }
            other => DrawFailure::Other(other.to_string()),
        }
    }
}

/// Fill color per segment, parsed from the segments' `#rrggbb` strings.
pub fn palette_for(specs: &[SegmentSpec]) -> Result<SegmentPalette> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let (r, g, b) = parse_hex_color(&format!("segments[{}].color", i), &spec.color)?;
            Ok((spec.segment, RGBColor(r, g, b)))
        })
        .collect()
}

/// Rasterizes one box per entry of `stats`, left to right, into an RGB buffer
/// of the chart's pixel dimensions.
///
/// When no usable system font is available the chart is redrawn without
/// title, tick labels and axis descriptions instead of failing.
pub fn render_chart(
    stats: &[BoxStats],
    chart: &ChartSpec,
    palette: &SegmentPalette,
) -> Result<RenderedChart> {
    if stats.is_empty() {
        return Err(ChartError::RenderError {
            message: "nothing to draw: display order is empty".to_string(),
        });
    }
    for s in stats {
        if !palette.contains_key(&s.segment) {
            return Err(ChartError::MissingConfigError {
                field: format!("color for segment '{}'", s.segment),
            });
        }
    }

    let (width, height) = chart.pixel_dimensions();
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    match draw_into(&mut pixels, (width, height), stats, chart, palette, true) {
        Ok(()) => {}
        Err(DrawFailure::Font(reason)) => {
            tracing::warn!("⚠️ No usable font ({}), drawing chart without text", reason);
            pixels.fill(0);
            draw_into(&mut pixels, (width, height), stats, chart, palette, false).map_err(
                |failure| match failure {
                    DrawFailure::Font(message) | DrawFailure::Other(message) => {
                        ChartError::RenderError { message }
                    }
                },
            )?;
        }
        Err(DrawFailure::Other(message)) => return Err(ChartError::RenderError { message }),
    }

    tracing::debug!("Rendered {}x{} chart with {} boxes", width, height, stats.len());
    Ok(RenderedChart {
        width,
        height,
        pixels,
    })
}

fn draw_into(
    pixels: &mut [u8],
    size: (u32, u32),
    stats: &[BoxStats],
    chart: &ChartSpec,
    palette: &SegmentPalette,
    with_text: bool,
) -> std::result::Result<(), DrawFailure> {
    let root = BitMapBackend::with_buffer(pixels, size).into_drawing_area();
    draw_box_plot(&root, stats, chart, palette, with_text)?;
    root.present()?;
    Ok(())
}

fn y_upper_bound(stats: &[BoxStats]) -> f64 {
    let top = stats
        .iter()
        .flat_map(|s| std::iter::once(s.whisker_high).chain(s.outliers.iter().copied()))
        .fold(0.0f64, f64::max);
    if top > 0.0 {
        top * 1.05
    } else {
        1.0
    }
}

fn draw_box_plot<DB>(
    root: &DrawingArea<DB, Shift>,
    stats: &[BoxStats],
    chart: &ChartSpec,
    palette: &SegmentPalette,
    with_text: bool,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;

    let title_px = chart.points_to_px(chart.title_font_pt);
    let label_px = chart.points_to_px(chart.label_font_pt);
    let tick_px = label_px * 0.9;
    let margin = if chart.tight { 6 } else { 24 };

    let slots = stats.len() as f64;
    let y_max = y_upper_bound(stats);

    let mut builder = ChartBuilder::on(root);
    builder.margin(margin);
    if with_text {
        builder
            .caption(
                chart.title.as_str(),
                FontDesc::new(FontFamily::SansSerif, title_px, FontStyle::Bold),
            )
            .x_label_area_size((tick_px + label_px * 2.0).ceil() as u32)
            .y_label_area_size((tick_px * 2.5 + label_px * 2.0).ceil() as u32);
    } else {
        builder.x_label_area_size(4).y_label_area_size(4);
    }
    let mut ctx = builder.build_cartesian_2d(-0.5f64..(slots - 0.5), 0.0f64..y_max)?;

    let labels: Vec<&str> = stats.iter().map(|s| s.segment.label()).collect();
    let category_label = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() < 1e-6 && idx >= 0.0 {
            labels
                .get(idx as usize)
                .map(|label| label.to_string())
                .unwrap_or_default()
        } else {
            String::new()
        }
    };
    let value_label = |v: &f64| format!("{:.0}", v);

    {
        let mut mesh = ctx.configure_mesh();
        mesh.disable_x_mesh()
            .bold_line_style(GRID_COLOR)
            .light_line_style(&TRANSPARENT)
            .axis_style(EDGE_COLOR);
        if with_text {
            // Half-slot ticks guarantee every category centre is a key point.
            mesh.x_labels(stats.len() * 2 + 1)
                .x_label_formatter(&category_label)
                .y_label_formatter(&value_label)
                .label_style(FontDesc::new(FontFamily::SansSerif, tick_px, FontStyle::Normal))
                .x_desc(chart.x_label.as_str())
                .y_desc(chart.y_label.as_str())
                .axis_desc_style(FontDesc::new(FontFamily::SansSerif, label_px, FontStyle::Bold));
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;
    }

    let edge = ShapeStyle {
        color: EDGE_COLOR.to_rgba(),
        filled: false,
        stroke_width: 1,
    };
    let half = chart.box_width / 2.0;
    let cap = half / 2.0;

    for (idx, s) in stats.iter().enumerate() {
        let x = idx as f64;
        let fill = palette.get(&s.segment).copied().unwrap_or(EDGE_COLOR);

        ctx.draw_series(std::iter::once(Rectangle::new(
            [(x - half, s.q1), (x + half, s.q3)],
            fill.filled(),
        )))?;
        ctx.draw_series(std::iter::once(Rectangle::new(
            [(x - half, s.q1), (x + half, s.q3)],
            edge,
        )))?;

        let strokes = vec![
            vec![(x, s.q3), (x, s.whisker_high)],
            vec![(x, s.q1), (x, s.whisker_low)],
            vec![(x - cap, s.whisker_high), (x + cap, s.whisker_high)],
            vec![(x - cap, s.whisker_low), (x + cap, s.whisker_low)],
            vec![(x - half, s.median), (x + half, s.median)],
        ];
        ctx.draw_series(strokes.into_iter().map(|points| PathElement::new(points, edge)))?;

        ctx.draw_series(
            s.outliers
                .iter()
                .map(|&v| Circle::new((x, v), OUTLIER_RADIUS, edge)),
        )?;
    }

    if !chart.despine {
        ctx.draw_series(std::iter::once(Rectangle::new(
            [(-0.5, 0.0), (slots - 0.5, y_max)],
            edge,
        )))?;
    }

    Ok(())
}
