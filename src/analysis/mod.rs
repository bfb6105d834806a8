pub mod consistency;
pub mod detector;
pub mod distance;
pub mod redness;
pub mod velocity;

pub use consistency::{analyze_consistency, ConsistencyMetrics};
pub use detector::{detect_nystagmus, NystagmusAssessment};
pub use distance::{estimate_distance, measure_distance, validate_distance, DistanceMeasurement};
pub use redness::{analyze_eye_color, RednessAnalysis};
pub use velocity::{calculate_velocities, VelocityMeasurement};
