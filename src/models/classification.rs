use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Triage level for immediate/trauma cases (most urgent).
pub const TRIAGE_LEVEL_MIN: u8 = 1;
/// Triage level for observation-only cases (least urgent).
pub const TRIAGE_LEVEL_MAX: u8 = 5;

/// Result of a triage assessment.
///
/// Produced fresh per request by a classifier backend (and optionally
/// escalated by photo findings); immutable once returned. Persistence is the
/// caller's concern — nothing in this crate stores or mutates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// 1 = immediate/trauma … 5 = observation. Always within [1,5].
    pub triage_level: u8,
    /// 0 = not urgent … 100 = critical. Always within [0,100].
    pub urgency_score: u8,
    /// Classifier certainty, 0–100, independent of which backend produced it.
    pub confidence: u8,
    /// Patient-facing guidance, deduplicated, insertion order preserved.
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
    pub suggested_specialties: Vec<String>,
    pub immediate_actions: Vec<String>,
    /// Which backend produced this result. Audit/display only — never feeds
    /// back into decision logic.
    pub ai_model: String,
    /// Audit identity for this assessment.
    pub assessment_id: Uuid,
    pub assessed_at: DateTime<Utc>,
}

impl Classification {
    /// Build a classification with all scalar fields clamped into range.
    pub fn new(triage_level: u8, urgency_score: u8, confidence: u8, ai_model: &str) -> Self {
        Self {
            triage_level: triage_level.clamp(TRIAGE_LEVEL_MIN, TRIAGE_LEVEL_MAX),
            urgency_score: urgency_score.min(100),
            confidence: confidence.min(100),
            recommendations: Vec::new(),
            risk_factors: Vec::new(),
            suggested_specialties: Vec::new(),
            immediate_actions: Vec::new(),
            ai_model: ai_model.to_string(),
            assessment_id: Uuid::new_v4(),
            assessed_at: Utc::now(),
        }
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn with_risk_factors(mut self, risk_factors: Vec<String>) -> Self {
        self.risk_factors = risk_factors;
        self
    }

    pub fn with_specialties(mut self, specialties: Vec<String>) -> Self {
        self.suggested_specialties = specialties;
        self
    }

    pub fn with_immediate_actions(mut self, actions: Vec<String>) -> Self {
        self.immediate_actions = actions;
        self
    }

    /// Range invariant check: true for every value this crate produces.
    pub fn in_bounds(&self) -> bool {
        (TRIAGE_LEVEL_MIN..=TRIAGE_LEVEL_MAX).contains(&self.triage_level)
            && self.urgency_score <= 100
            && self.confidence <= 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_values() {
        let c = Classification::new(0, 200, 150, "test");
        assert_eq!(c.triage_level, 1);
        assert_eq!(c.urgency_score, 100);
        assert_eq!(c.confidence, 100);
        assert!(c.in_bounds());

        let c = Classification::new(9, 50, 50, "test");
        assert_eq!(c.triage_level, 5);
    }

    #[test]
    fn builder_sets_list_fields() {
        let c = Classification::new(2, 70, 75, "test")
            .with_recommendations(vec!["Rest".into()])
            .with_specialties(vec!["Internal Medicine".into()])
            .with_immediate_actions(vec!["Hydrate".into()])
            .with_risk_factors(vec!["Possible sepsis".into()]);
        assert_eq!(c.recommendations, vec!["Rest"]);
        assert_eq!(c.suggested_specialties, vec!["Internal Medicine"]);
        assert_eq!(c.immediate_actions, vec!["Hydrate"]);
        assert_eq!(c.risk_factors, vec!["Possible sepsis"]);
    }

    #[test]
    fn each_assessment_gets_fresh_identity() {
        let a = Classification::new(3, 50, 60, "test");
        let b = Classification::new(3, 50, 60, "test");
        assert_ne!(a.assessment_id, b.assessment_id);
    }

    #[test]
    fn classification_serializes() {
        let c = Classification::new(1, 95, 85, "Rule-based Fallback");
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"triage_level\":1"));
        assert!(json.contains("\"ai_model\":\"Rule-based Fallback\""));
    }
}
