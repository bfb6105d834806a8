use std::{collections::HashMap, sync::Arc};

use log::info;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::analysis::{analyze_eye_color, measure_distance};
use crate::config::DetectionConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{FrameAnalysis, FrameInput, SessionReport};
use crate::session::tracker::{SessionStatus, SessionTracker};

// Set to true to enable verbose logging of the per-frame path
const ENABLE_LOGS: bool = false;

use crate::{log_info, log_warn};

/// Session store keyed by session id.
///
/// Each session lives behind its own mutex, so `process_frame` and
/// `complete_session` calls for one id are serialized while independent
/// sessions proceed concurrently. The registry handle is cheap to clone and
/// shares the underlying store.
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<String, Arc<Mutex<SessionTracker>>>>>,
    config: DetectionConfig,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_config(DetectionConfig::default())
    }

    pub fn with_config(config: DetectionConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Create a new session and return its id. The session starts Active.
    pub async fn start_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut tracker = SessionTracker::new(id.clone());
        tracker.start();

        let mut sessions = self.sessions.lock().await;
        sessions.insert(id.clone(), Arc::new(Mutex::new(tracker)));
        info!("Session {} started ({} sessions live)", id, sessions.len());
        id
    }

    /// Re-enter Active on an existing session, discarding its samples and any
    /// memoized report.
    pub async fn restart_session(&self, id: &str) -> Result<()> {
        let entry = self.session_entry(id).await?;
        let mut tracker = entry.lock().await;
        tracker.start();
        info!("Session {} restarted", id);
        Ok(())
    }

    /// Run the per-frame pipeline: distance gate, sample recording, then a
    /// classification snapshot over the accumulated series.
    ///
    /// Failures are local to the frame; the session's accepted samples are
    /// never touched by a rejected frame.
    pub async fn process_frame(&self, id: &str, frame: FrameInput) -> Result<FrameAnalysis> {
        let entry = self.session_entry(id).await?;
        let mut tracker = entry.lock().await;

        let distance = measure_distance(frame.face_width_px, &self.config);
        if !distance.is_valid {
            log_warn!(
                "Session {}: frame at {:.3}s rejected, distance {:.1}mm out of range",
                id,
                frame.capture_time,
                distance.distance_mm
            );
            return Err(AnalysisError::DistanceOutOfRange {
                distance_mm: distance.distance_mm,
                min_mm: self.config.min_distance_mm,
                max_mm: self.config.max_distance_mm,
            });
        }

        tracker.record(frame.left_eye, frame.right_eye, frame.capture_time)?;

        let (velocities, assessment) = tracker.classify(&self.config);

        // Escalate to the redness screen only once the movement signal is
        // already suspicious and the provider sent color samples.
        let redness = if assessment.confidence > 0.5 {
            frame
                .eye_color
                .as_ref()
                .map(|(left, right)| analyze_eye_color(left, right, &self.config))
        } else {
            None
        };

        log_info!(
            "Session {}: frame {} accepted at {:.3}s (confidence {:.1})",
            id,
            tracker.sample_count(),
            frame.capture_time,
            assessment.confidence
        );

        Ok(FrameAnalysis {
            distance_mm: distance.distance_mm,
            distance_valid: true,
            velocities,
            nystagmus_detected: assessment.detected(),
            confidence: assessment.confidence,
            redness,
        })
    }

    /// Complete a session and return its final report. Repeated calls return
    /// the memoized report.
    pub async fn complete_session(&self, id: &str) -> Result<SessionReport> {
        let entry = self.session_entry(id).await?;
        let mut tracker = entry.lock().await;
        let report = tracker.complete(&self.config)?;
        info!(
            "Session {} completed: {} frames over {:.2}s, confidence {:.1}",
            id, report.frames_analyzed, report.test_duration_s, report.confidence
        );
        Ok(report)
    }

    /// The memoized report for a completed session, if any.
    pub async fn session_report(&self, id: &str) -> Result<Option<SessionReport>> {
        let entry = self.session_entry(id).await?;
        let tracker = entry.lock().await;
        Ok(tracker.report().cloned())
    }

    pub async fn session_status(&self, id: &str) -> Result<SessionStatus> {
        let entry = self.session_entry(id).await?;
        let tracker = entry.lock().await;
        Ok(tracker.status())
    }

    pub async fn remove_session(&self, id: &str) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AnalysisError::SessionNotFound { id: id.to_string() })
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    async fn session_entry(&self, id: &str) -> Result<Arc<Mutex<SessionTracker>>> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| AnalysisError::SessionNotFound { id: id.to_string() })
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionRegistry {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            config: self.config.clone(),
        }
    }
}
