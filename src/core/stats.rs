use crate::core::{BoxStats, SampleTable, Segment};
use crate::utils::error::{ChartError, Result};

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Percentile `p` (0-100) of sorted data, interpolating linearly between
/// closest ranks.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * fraction)
}

pub fn box_stats(segment: Segment, values: &[f64]) -> Result<BoxStats> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let empty = || ChartError::EmptySegmentError {
        segment: segment.to_string(),
    };
    let q1 = percentile(&sorted, 25.0).ok_or_else(empty)?;
    let median = percentile(&sorted, 50.0).ok_or_else(empty)?;
    let q3 = percentile(&sorted, 75.0).ok_or_else(empty)?;

    let reach = WHISKER_IQR_FACTOR * (q3 - q1);
    let low_fence = q1 - reach;
    let high_fence = q3 + reach;

    // Whiskers stop at the most extreme data inside the fences, never inside the box.
    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .map_or(q1, |v| v.min(q1));
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .map_or(q3, |v| v.max(q3));

    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < whisker_low || *v > whisker_high)
        .collect();

    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    Ok(BoxStats {
        segment,
        count: sorted.len(),
        mean,
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

/// Box stats for each segment of `order`, in that order.
pub fn summarize(table: &SampleTable, order: &[Segment]) -> Result<Vec<BoxStats>> {
    order
        .iter()
        .map(|&segment| box_stats(segment, &table.values_for(segment)))
        .collect()
}
