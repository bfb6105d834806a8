use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{
    analyze_consistency, calculate_velocities, detect_nystagmus, NystagmusAssessment,
    VelocityMeasurement,
};
use crate::config::DetectionConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{EyePoint, EyePositionSample, SessionReport};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Idle,
    Active,
    Completed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Idle
    }
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "Idle",
            SessionStatus::Active => "Active",
            SessionStatus::Completed => "Completed",
        }
    }
}

/// Owns the ordered eye-position series for one test session.
///
/// The sample list is replaced wholesale on `start` and only ever grows while
/// Active; a rejected frame never mutates it. All derived series (velocity,
/// consistency, classification) are recomputed from the current snapshot.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    id: String,
    status: SessionStatus,
    samples: Vec<EyePositionSample>,
    /// Capture-time anchor of the first recorded sample.
    origin_time: Option<f64>,
    last_capture_time: Option<f64>,
    started_at: Option<DateTime<Utc>>,
    report: Option<SessionReport>,
}

impl SessionTracker {
    pub fn new(id: String) -> Self {
        Self {
            id,
            status: SessionStatus::Idle,
            samples: Vec::new(),
            origin_time: None,
            last_capture_time: None,
            started_at: None,
            report: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[EyePositionSample] {
        &self.samples
    }

    /// Begin (or re-begin) the session. Always yields an empty Active session
    /// regardless of prior content.
    pub fn start(&mut self) {
        self.status = SessionStatus::Active;
        self.samples = Vec::new();
        self.origin_time = None;
        self.last_capture_time = None;
        self.started_at = Some(Utc::now());
        self.report = None;
    }

    /// Append one eye-position sample.
    ///
    /// The first call anchors the session origin; every later call must carry
    /// a capture time strictly beyond the previous one. On failure the sample
    /// is dropped and the stored series is left as it was.
    pub fn record(&mut self, left: EyePoint, right: EyePoint, capture_time: f64) -> Result<()> {
        if self.status != SessionStatus::Active {
            return Err(AnalysisError::SessionNotActive {
                status: self.status,
            });
        }

        if let Some(last) = self.last_capture_time {
            if capture_time == last {
                return Err(AnalysisError::DegenerateTimestamp { capture_time });
            }
            if capture_time < last {
                return Err(AnalysisError::OutOfOrderSample {
                    capture_time,
                    last_capture_time: last,
                });
            }
        }

        let origin = *self.origin_time.get_or_insert(capture_time);
        self.samples.push(EyePositionSample {
            left,
            right,
            t: capture_time - origin,
        });
        self.last_capture_time = Some(capture_time);
        Ok(())
    }

    /// Classify the current snapshot. Pure with respect to session state.
    pub fn classify(
        &self,
        config: &DetectionConfig,
    ) -> (Vec<VelocityMeasurement>, NystagmusAssessment) {
        let velocities = calculate_velocities(&self.samples);
        let consistency = analyze_consistency(&velocities, config);
        let assessment = detect_nystagmus(&velocities, &consistency, config);
        (velocities, assessment)
    }

    /// Finish the session and produce its report.
    ///
    /// Rejected with `EmptySession` when nothing was recorded; the session
    /// stays Active so a later `record` + `complete` can still succeed. Once
    /// Completed, the report is memoized and repeated calls return it
    /// without recomputation.
    pub fn complete(&mut self, config: &DetectionConfig) -> Result<SessionReport> {
        if self.status == SessionStatus::Completed {
            if let Some(report) = &self.report {
                return Ok(report.clone());
            }
        }
        if self.status != SessionStatus::Active {
            return Err(AnalysisError::SessionNotActive {
                status: self.status,
            });
        }

        let last_sample = self.samples.last().ok_or(AnalysisError::EmptySession)?;
        let (_, assessment) = self.classify(config);
        let completed_at = Utc::now();

        let report = SessionReport {
            session_id: self.id.clone(),
            nystagmus_detected: assessment.detected(),
            confidence: assessment.confidence,
            test_duration_s: last_sample.t,
            frames_analyzed: self.samples.len(),
            started_at: self.started_at.unwrap_or(completed_at),
            completed_at,
        };

        self.status = SessionStatus::Completed;
        self.report = Some(report.clone());
        Ok(report)
    }

    /// The memoized report, when the session has completed.
    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }
}
