use crate::core::{SegmentSamples, SegmentSpec};
use crate::utils::error::{ChartError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};

/// Draws every segment from one RNG seeded with `seed`, in the order given.
pub fn sample_segments(specs: &[SegmentSpec], seed: u64) -> Result<Vec<SegmentSamples>> {
    let mut rng = StdRng::seed_from_u64(seed);
    specs
        .iter()
        .map(|spec| sample_segment(spec, &mut rng))
        .collect()
}

/// Draws `spec.count` values from `N(mean, std_dev)`, reflecting negatives
/// through zero. The reflection skews the distribution near zero.
pub fn sample_segment<R: Rng + ?Sized>(spec: &SegmentSpec, rng: &mut R) -> Result<SegmentSamples> {
    // Normal::new accepts a negative std_dev and samples the mirrored curve.
    if !(spec.std_dev >= 0.0) {
        return Err(ChartError::DistributionError {
            segment: spec.segment.to_string(),
            source: NormalError::BadVariance,
        });
    }

    let normal =
        Normal::new(spec.mean, spec.std_dev).map_err(|source| ChartError::DistributionError {
            segment: spec.segment.to_string(),
            source,
        })?;

    let values: Vec<f64> = (0..spec.count).map(|_| normal.sample(rng).abs()).collect();

    tracing::debug!(
        "Sampled {} values for {} (mean={}, std_dev={})",
        values.len(),
        spec.segment,
        spec.mean,
        spec.std_dev
    );

    Ok(SegmentSamples {
        segment: spec.segment,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartJob;
    use crate::core::Segment;

    fn spec(segment: Segment, mean: f64, std_dev: f64, count: usize) -> SegmentSpec {
        SegmentSpec {
            segment,
            mean,
            std_dev,
            count,
            color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_default_counts_and_generation_order() {
        let job = ChartJob::default();
        let samples = sample_segments(&job.segments, job.seed).unwrap();

        let shape: Vec<(Segment, usize)> =
            samples.iter().map(|s| (s.segment, s.values.len())).collect();
        assert_eq!(
            shape,
            vec![
                (Segment::HighValue, 100),
                (Segment::MediumValue, 250),
                (Segment::LowValue, 400),
            ]
        );
    }

    #[test]
    fn test_values_are_non_negative() {
        // Mean near zero forces plenty of negative raw draws.
        let specs = vec![spec(Segment::LowValue, 1.0, 50.0, 2_000)];
        let samples = sample_segments(&specs, 7).unwrap();
        assert!(samples[0].values.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_same_seed_reproduces_samples() {
        let job = ChartJob::default();
        let first = sample_segments(&job.segments, 42).unwrap();
        let second = sample_segments(&job.segments, 42).unwrap();
        assert_eq!(first, second);

        let third = sample_segments(&job.segments, 43).unwrap();
        assert_ne!(first, third);
    }

    #[test]
    fn test_zero_std_dev_yields_constant() {
        let specs = vec![spec(Segment::MediumValue, 220.0, 0.0, 10)];
        let samples = sample_segments(&specs, 1).unwrap();
        assert!(samples[0].values.iter().all(|v| *v == 220.0));
    }

    #[test]
    fn test_negative_std_dev_is_rejected() {
        let specs = vec![spec(Segment::HighValue, 450.0, -1.0, 10)];
        let err = sample_segments(&specs, 1).unwrap_err();
        assert!(matches!(
            err,
            ChartError::DistributionError { ref segment, .. } if segment == "High-Value"
        ));
    }

    #[test]
    fn test_nan_std_dev_is_rejected() {
        let specs = vec![spec(Segment::LowValue, 80.0, f64::NAN, 10)];
        let err = sample_segments(&specs, 1).unwrap_err();
        assert!(matches!(err, ChartError::DistributionError { .. }));
    }
}
