//! Session-based nystagmus screening over per-frame eye-position
//! measurements.
//!
//! The caller extracts iris centroids and an apparent face width from each
//! camera frame elsewhere, then feeds them through [`SessionRegistry`]:
//! frames are gated by estimated subject distance, accumulated into a
//! per-session time series, and classified by horizontal-velocity patterns.
//! Completing a session yields a memoized [`models::SessionReport`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
mod utils;

pub use analysis::{
    analyze_consistency, analyze_eye_color, calculate_velocities, detect_nystagmus,
    estimate_distance, measure_distance, validate_distance, ConsistencyMetrics,
    DistanceMeasurement, NystagmusAssessment, RednessAnalysis, VelocityMeasurement,
};
pub use config::{ConfigStore, DetectionConfig};
pub use error::{AnalysisError, Result};
pub use models::{EyeColorSample, EyePoint, EyePositionSample, FrameAnalysis, FrameInput, SessionReport};
pub use session::{SessionRegistry, SessionStatus, SessionTracker};
