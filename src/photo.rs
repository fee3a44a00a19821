//! Photo-finding aggregation: collapse independent per-image findings into a
//! single influence on the assessment.

use serde::{Deserialize, Serialize};

use crate::models::{ImageQuality, PhotoFinding, Severity};

/// Combined influence of a photo set on an assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAggregate {
    /// Maximum severity among usable findings; `Low` when none are usable.
    pub severity_ceiling: Severity,
    /// All usable findings' recommendations, insertion order, not yet
    /// deduplicated (dedup happens when combining with the classification).
    pub notes: Vec<String>,
    /// Highest confidence among usable findings; 0 when none are usable.
    pub max_confidence: u8,
}

/// Aggregate per-photo findings. Findings with unusable image quality are
/// skipped — they carry no diagnostic weight, only a log line.
pub fn aggregate(findings: &[PhotoFinding]) -> PhotoAggregate {
    let mut severity_ceiling = Severity::Low;
    let mut notes = Vec::new();
    let mut max_confidence = 0u8;

    for finding in findings {
        if finding.image_quality == ImageQuality::Unusable {
            tracing::debug!(
                severity = finding.severity.as_str(),
                "skipping unusable photo finding"
            );
            continue;
        }
        severity_ceiling = severity_ceiling.max(finding.severity);
        notes.extend(finding.recommendations.iter().cloned());
        max_confidence = max_confidence.max(finding.confidence);
    }

    PhotoAggregate {
        severity_ceiling,
        notes,
        max_confidence,
    }
}
