use serde::{Deserialize, Serialize};

use super::enums::{ImageQuality, Severity};

/// Vision-provider verdict for a single uploaded photo.
///
/// Produced once per image at analysis time and immutable afterwards; only
/// ever an input to photo aggregation, never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoFinding {
    pub severity: Severity,
    pub detected_conditions: Vec<String>,
    pub recommendations: Vec<String>,
    /// Provider certainty, 0–100.
    pub confidence: u8,
    /// An `Unusable` finding never influences aggregate severity.
    pub image_quality: ImageQuality,
}

impl PhotoFinding {
    pub fn new(severity: Severity, image_quality: ImageQuality, confidence: u8) -> Self {
        Self {
            severity,
            detected_conditions: Vec::new(),
            recommendations: Vec::new(),
            confidence: confidence.min(100),
            image_quality,
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<String>) -> Self {
        self.detected_conditions = conditions;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }
}
