use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// Tunable thresholds for the detection pipeline.
///
/// Every heuristic constant the pipeline relies on lives here rather than
/// inline in the analysis code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectionConfig {
    /// Camera focal length in pixels.
    pub focal_length_px: f64,
    /// Average adult face width in millimeters.
    pub real_face_width_mm: f64,
    /// Minimum accepted subject distance from the camera (mm).
    pub min_distance_mm: f64,
    /// Maximum accepted subject distance from the camera (mm).
    pub max_distance_mm: f64,
    /// Horizontal velocity above which a sample counts toward a jerk run (px/s).
    pub velocity_threshold_px_s: f64,
    /// Coefficient-of-variation bound under which a velocity series is consistent.
    pub velocity_variation_threshold: f64,
    /// Redness ratio above which an eye-region color sample flags as red.
    pub redness_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            focal_length_px: 700.0,
            real_face_width_mm: 150.0,
            min_distance_mm: 300.0,
            max_distance_mm: 800.0,
            velocity_threshold_px_s: 50.0,
            velocity_variation_threshold: 0.3,
            redness_threshold: 0.4,
        }
    }
}

/// File-backed store for `DetectionConfig`.
///
/// Missing file falls back to defaults; unrecognized fields in the file are
/// ignored on read.
pub struct ConfigStore {
    path: PathBuf,
    data: RwLock<DetectionConfig>,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            DetectionConfig::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn detection(&self) -> DetectionConfig {
        self.data.read().unwrap().clone()
    }

    pub fn update_detection(&self, config: DetectionConfig) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = config;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &DetectionConfig) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write config to {}", self.path.display()))
    }
}

impl ConfigStore {
    #[allow(dead_code)]
    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: DetectionConfig = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }
}
