use serde::{Deserialize, Serialize};

use crate::config::DetectionConfig;

/// Estimated subject distance for a single frame. Not persisted across frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceMeasurement {
    pub distance_mm: f64,
    pub is_valid: bool,
}

/// Estimate subject distance from the apparent face width, using the pinhole
/// model `distance = focal * real_width / apparent_width`.
///
/// A zero face width yields an infinite distance rather than dividing by zero.
pub fn estimate_distance(face_width_px: f64, focal_length_px: f64, real_face_width_mm: f64) -> f64 {
    if face_width_px == 0.0 {
        return f64::INFINITY;
    }
    (focal_length_px * real_face_width_mm) / face_width_px
}

/// Inclusive range check on an estimated distance.
pub fn validate_distance(distance_mm: f64, min_mm: f64, max_mm: f64) -> bool {
    distance_mm >= min_mm && distance_mm <= max_mm
}

/// Gate a frame by its apparent face width.
///
/// Called before the frame's sample is accepted into a session; an invalid
/// measurement rejects the frame without touching stored samples.
pub fn measure_distance(face_width_px: f64, config: &DetectionConfig) -> DistanceMeasurement {
    let distance_mm = estimate_distance(
        face_width_px,
        config.focal_length_px,
        config.real_face_width_mm,
    );
    DistanceMeasurement {
        distance_mm,
        is_valid: validate_distance(distance_mm, config.min_distance_mm, config.max_distance_mm),
    }
}
