use serde::{Deserialize, Serialize};

/// A 2-D point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyePoint {
    pub x: f64,
    pub y: f64,
}

impl EyePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One accepted eye-position measurement.
///
/// `t` is seconds since the session origin and is strictly increasing within
/// a session. Samples are immutable once recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EyePositionSample {
    pub left: EyePoint,
    pub right: EyePoint,
    pub t: f64,
}

/// Mean color of one eye region, supplied by the landmark provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EyeColorSample {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Per-frame input at the analysis boundary, post landmark extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInput {
    pub left_eye: EyePoint,
    pub right_eye: EyePoint,
    pub face_width_px: f64,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Monotonic capture time in seconds.
    pub capture_time: f64,
    /// Mean (left, right) eye-region colors, when the provider supplies them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<(EyeColorSample, EyeColorSample)>,
}
