use serde::{Deserialize, Serialize};

use crate::analysis::velocity::VelocityMeasurement;
use crate::config::DetectionConfig;

const VARIATION_EPSILON: f64 = 1e-6;

/// Variability snapshot over one velocity series. Recomputed on demand,
/// never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyMetrics {
    pub is_consistent: bool,
    pub left_variation: f64,
    pub right_variation: f64,
    pub left_avg_velocity: f64,
    pub right_avg_velocity: f64,
}

impl ConsistencyMetrics {
    /// Placeholder for series too short to carry evidence either way.
    fn insufficient() -> Self {
        Self {
            is_consistent: false,
            left_variation: 0.0,
            right_variation: 0.0,
            left_avg_velocity: 0.0,
            right_avg_velocity: 0.0,
        }
    }
}

/// Compute per-eye velocity variability and judge consistency against the
/// configured variation threshold.
///
/// The variation ratio divides the standard deviation of the signed series
/// by the mean of the absolute series plus a small epsilon; an oscillating
/// signal therefore scores high even when its magnitude is steady.
///
/// Fewer than 3 measurements returns `is_consistent = false` with zeroed
/// statistics: insufficient evidence, not evidence of impairment.
pub fn analyze_consistency(
    velocities: &[VelocityMeasurement],
    config: &DetectionConfig,
) -> ConsistencyMetrics {
    if velocities.len() < 3 {
        return ConsistencyMetrics::insufficient();
    }

    let left: Vec<f64> = velocities.iter().map(|v| v.left_v).collect();
    let right: Vec<f64> = velocities.iter().map(|v| v.right_v).collect();

    let left_avg = mean_abs(&left);
    let right_avg = mean_abs(&right);

    let left_variation = stddev(&left) / (left_avg + VARIATION_EPSILON);
    let right_variation = stddev(&right) / (right_avg + VARIATION_EPSILON);

    let threshold = config.velocity_variation_threshold;
    ConsistencyMetrics {
        is_consistent: left_variation < threshold && right_variation < threshold,
        left_variation,
        right_variation,
        left_avg_velocity: left_avg,
        right_avg_velocity: right_avg,
    }
}

fn mean_abs(values: &[f64]) -> f64 {
    values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64
}

/// Population standard deviation of the signed series.
fn stddev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(f64, f64)]) -> Vec<VelocityMeasurement> {
        pairs
            .iter()
            .map(|&(left_v, right_v)| VelocityMeasurement { left_v, right_v })
            .collect()
    }

    #[test]
    fn short_series_is_insufficient_evidence() {
        let config = DetectionConfig::default();
        for len in 0..3 {
            let velocities = series(&vec![(60.0, 60.0); len]);
            let metrics = analyze_consistency(&velocities, &config);
            assert!(!metrics.is_consistent);
            assert_eq!(metrics.left_variation, 0.0);
            assert_eq!(metrics.right_variation, 0.0);
        }
    }

    #[test]
    fn steady_series_is_consistent() {
        let config = DetectionConfig::default();
        let velocities = series(&[(40.0, 42.0), (41.0, 40.0), (39.0, 41.0), (40.0, 39.0)]);
        let metrics = analyze_consistency(&velocities, &config);
        assert!(metrics.is_consistent);
        assert!(metrics.left_variation < 0.05);
        assert!((metrics.left_avg_velocity - 40.0).abs() < 0.5);
    }

    #[test]
    fn oscillating_series_is_inconsistent() {
        let config = DetectionConfig::default();
        // Sign-alternating series: signed stddev is large while the mean of
        // absolute values stays at 50, so the ratio blows past the threshold.
        let velocities = series(&[(50.0, 50.0), (-50.0, -50.0), (50.0, 50.0), (-50.0, -50.0)]);
        let metrics = analyze_consistency(&velocities, &config);
        assert!(!metrics.is_consistent);
        assert!(metrics.left_variation > 0.9);
        assert!((metrics.left_avg_velocity - 50.0).abs() < 1e-9);
    }

    #[test]
    fn one_inconsistent_eye_fails_the_pair() {
        let config = DetectionConfig::default();
        let velocities = series(&[(40.0, 50.0), (41.0, -50.0), (40.0, 50.0), (39.0, -50.0)]);
        let metrics = analyze_consistency(&velocities, &config);
        assert!(metrics.left_variation < config.velocity_variation_threshold);
        assert!(metrics.right_variation >= config.velocity_variation_threshold);
        assert!(!metrics.is_consistent);
    }
}
