use serde::{Deserialize, Serialize};

use crate::config::DetectionConfig;
use crate::models::EyeColorSample;

const COLOR_EPSILON: f64 = 1e-6;

/// Redness screen over the mean colors of both eye regions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RednessAnalysis {
    pub left_eye_redness: f64,
    pub right_eye_redness: f64,
    pub is_red: bool,
}

/// Ratio of the red channel to the combined blue and green channels, per eye.
/// Either eye past the configured threshold flags the pair.
pub fn analyze_eye_color(
    left: &EyeColorSample,
    right: &EyeColorSample,
    config: &DetectionConfig,
) -> RednessAnalysis {
    let left_eye_redness = redness_ratio(left);
    let right_eye_redness = redness_ratio(right);
    RednessAnalysis {
        left_eye_redness,
        right_eye_redness,
        is_red: left_eye_redness > config.redness_threshold
            || right_eye_redness > config.redness_threshold,
    }
}

fn redness_ratio(color: &EyeColorSample) -> f64 {
    color.r / (color.b + color.g + COLOR_EPSILON)
}
