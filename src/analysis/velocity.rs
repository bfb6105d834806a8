use serde::{Deserialize, Serialize};

use crate::models::EyePositionSample;

/// Horizontal velocity of both eyes at one interior sample index, in px/s.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityMeasurement {
    pub left_v: f64,
    pub right_v: f64,
}

/// Derive horizontal velocities from a position/time series using the central
/// difference `v(i) = (x(i+1) - x(i-1)) / (t(i+1) - t(i-1))`.
///
/// Vertical motion is ignored; the oscillation of interest is horizontal.
/// Fewer than 3 samples yields an empty series (insufficient data, not an
/// error). Interior indices whose temporal neighbors share a timestamp are
/// skipped; session-recorded series cannot contain them, but arbitrary
/// caller slices can.
pub fn calculate_velocities(samples: &[EyePositionSample]) -> Vec<VelocityMeasurement> {
    if samples.len() < 3 {
        return Vec::new();
    }

    let mut velocities = Vec::with_capacity(samples.len() - 2);
    for i in 1..samples.len() - 1 {
        let delta_time = samples[i + 1].t - samples[i - 1].t;
        if delta_time == 0.0 {
            continue;
        }
        velocities.push(VelocityMeasurement {
            left_v: (samples[i + 1].left.x - samples[i - 1].left.x) / delta_time,
            right_v: (samples[i + 1].right.x - samples[i - 1].right.x) / delta_time,
        });
    }
    velocities
}
