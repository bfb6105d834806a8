use crate::session::SessionStatus;

/// Error types for frame ingestion and session lifecycle operations.
///
/// Frame-level failures (`DistanceOutOfRange`, `OutOfOrderSample`,
/// `DegenerateTimestamp`) are local to the rejected frame: the session keeps
/// its accepted samples and the caller may submit the next frame.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Produced at the landmark-provider boundary; the core itself never
    /// sees such frames but transport layers map the condition through this
    /// taxonomy.
    #[error("no face detected in the frame")]
    NoFaceDetected,

    #[error("subject distance {distance_mm:.1}mm outside accepted range {min_mm:.0}-{max_mm:.0}mm")]
    DistanceOutOfRange {
        distance_mm: f64,
        min_mm: f64,
        max_mm: f64,
    },

    #[error("capture time {capture_time:.3}s precedes previous capture time {last_capture_time:.3}s")]
    OutOfOrderSample {
        capture_time: f64,
        last_capture_time: f64,
    },

    #[error("capture time {capture_time:.3}s repeats the previous capture time")]
    DegenerateTimestamp { capture_time: f64 },

    #[error("cannot complete a session with no recorded samples")]
    EmptySession,

    #[error("session not found: {id}")]
    SessionNotFound { id: String },

    #[error("session is {status:?}, expected Active")]
    SessionNotActive { status: SessionStatus },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
