use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{RednessAnalysis, VelocityMeasurement};

/// Analysis snapshot returned for each accepted frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAnalysis {
    pub distance_mm: f64,
    pub distance_valid: bool,
    pub velocities: Vec<VelocityMeasurement>,
    pub nystagmus_detected: bool,
    pub confidence: f64,
    /// Present only when the frame carried color samples and the running
    /// confidence warranted the redness screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redness: Option<RednessAnalysis>,
}

/// Final report produced when a session completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub session_id: String,
    pub nystagmus_detected: bool,
    pub confidence: f64,
    /// Last accepted sample's session-relative time, in seconds.
    pub test_duration_s: f64,
    pub frames_analyzed: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}
