//! Merge a symptom-only classification with photo findings.
//!
//! Escalation is monotone: photo evidence may only make a case more urgent
//! (lower triage level, higher urgency), never relax it. All operands are
//! already bounded, so min/max escalation cannot push values out of range.

use std::collections::HashSet;

use crate::models::{Classification, PhotoFinding, Severity};
use crate::photo;

/// Combine a base classification with photo findings.
///
/// Caller precondition (enforced at the pipeline boundary): at least one of
/// symptom text or findings was non-empty for the overall assessment.
pub fn combine(base: Classification, findings: &[PhotoFinding]) -> Classification {
    let agg = photo::aggregate(findings);

    let mut result = base;
    match agg.severity_ceiling {
        Severity::Critical => {
            result.triage_level = result.triage_level.min(1);
            result.urgency_score = result.urgency_score.max(90);
        }
        Severity::High => {
            result.triage_level = result.triage_level.min(2);
            result.urgency_score = result.urgency_score.max(80);
        }
        // Low/medium photo evidence never moves the numbers, but its
        // recommendation text still flows through below.
        Severity::Low | Severity::Medium => {}
    }

    result.confidence = result.confidence.max(agg.max_confidence);
    result.recommendations = dedup_preserving_order(result.recommendations, agg.notes);
    result
}

/// First-seen-order union keyed on exact string equality.
fn dedup_preserving_order(base: Vec<String>, extra: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    base.into_iter()
        .chain(extra)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
