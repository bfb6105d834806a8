use serde::{Deserialize, Serialize};

use crate::analysis::consistency::ConsistencyMetrics;
use crate::analysis::velocity::VelocityMeasurement;
use crate::config::DetectionConfig;

/// Run length after which consecutive threshold-exceeding samples count as
/// jerky movement (run > 3, i.e. at least 4 samples).
const JERK_RUN_LIMIT: u32 = 3;

/// Rule-based classification of one velocity series.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NystagmusAssessment {
    pub velocity_based: bool,
    pub consistency_based: bool,
    /// Criteria met over criteria checked: one of 0.0, 0.5, 1.0.
    pub confidence: f64,
}

impl NystagmusAssessment {
    pub fn detected(&self) -> bool {
        self.velocity_based || self.consistency_based
    }
}

/// Classify a velocity series by combining the jerk-run rule with the
/// consistency result. Deterministic; no learned parameters.
///
/// Fewer than 3 measurements is insufficient evidence and yields the default
/// not-detected assessment regardless of the consistency placeholder.
pub fn detect_nystagmus(
    velocities: &[VelocityMeasurement],
    consistency: &ConsistencyMetrics,
    config: &DetectionConfig,
) -> NystagmusAssessment {
    if velocities.len() < 3 {
        return NystagmusAssessment::default();
    }

    let velocity_based = has_jerk_run(velocities, config.velocity_threshold_px_s);
    let consistency_based = !consistency.is_consistent;

    let criteria_met = velocity_based as u32 + consistency_based as u32;
    NystagmusAssessment {
        velocity_based,
        consistency_based,
        confidence: f64::from(criteria_met) / 2.0,
    }
}

/// Scan in temporal order for a run of consecutive samples where either eye
/// exceeds the velocity threshold. The run resets on any sample below it; a
/// single quiet frame is enough to break the run.
fn has_jerk_run(velocities: &[VelocityMeasurement], threshold_px_s: f64) -> bool {
    let mut run = 0u32;
    for v in velocities {
        if v.left_v.abs() > threshold_px_s || v.right_v.abs() > threshold_px_s {
            run += 1;
        } else {
            run = 0;
        }
        if run > JERK_RUN_LIMIT {
            return true;
        }
    }
    false
}
