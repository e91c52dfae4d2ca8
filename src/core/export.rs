use crate::core::{RenderedChart, Storage};
use crate::utils::error::{ChartError, Result};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Encodes the chart as PNG at exactly its rendered pixel dimensions.
pub fn encode_png(chart: RenderedChart) -> Result<Vec<u8>> {
    let RenderedChart {
        width,
        height,
        pixels,
    } = chart;

    let image = RgbImage::from_raw(width, height, pixels).ok_or_else(|| ChartError::RenderError {
        message: format!("pixel buffer does not match {}x{} chart", width, height),
    })?;

    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Writes the chart to `path` through `storage`, replacing any existing file.
pub fn export_chart<S: Storage>(storage: &S, chart: RenderedChart, path: &str) -> Result<()> {
    let png = encode_png(chart)?;
    tracing::debug!("Writing PNG ({} bytes) to {}", png.len(), path);
    storage.write_file(path, &png)
}
