//! Deterministic keyword-driven classification — the chain terminator.
//!
//! Evaluated in tier priority order over lowercased symptom text; the first
//! tier with a matching keyword fully determines the result. Tiers are never
//! combined: an earlier match overrides everything below it.

use crate::models::Classification;

use super::{ClassifierBackend, ClassifierError, ClassifyRequest};

/// `ai_model` tag signalling degraded (non-AI) quality to the caller.
pub const RULE_BACKEND_TAG: &str = "Rule-based Fallback";

struct RuleTier {
    keywords: &'static [&'static str],
    triage_level: u8,
    urgency_score: u8,
    confidence: u8,
    specialties: &'static [&'static str],
    recommendations: &'static [&'static str],
    risk_factors: &'static [&'static str],
    immediate_actions: &'static [&'static str],
}

/// Tier table, highest priority first. The trailing catch-all (empty keyword
/// list) guarantees a match for any input, including empty text.
const RULE_TIERS: &[RuleTier] = &[
    RuleTier {
        keywords: &["chest pain", "heart attack"],
        triage_level: 1,
        urgency_score: 95,
        confidence: 85,
        specialties: &["Cardiology", "Emergency Medicine"],
        recommendations: &[
            "Seek emergency care immediately",
            "Do not drive yourself to hospital",
        ],
        risk_factors: &["Possible acute cardiac event"],
        immediate_actions: &[],
    },
    RuleTier {
        keywords: &["unconscious", "not breathing"],
        triage_level: 1,
        urgency_score: 100,
        confidence: 90,
        specialties: &["Emergency Medicine", "Critical Care"],
        recommendations: &["Do not leave the patient alone"],
        risk_factors: &["Respiratory or cardiac arrest"],
        immediate_actions: &[
            "Call emergency services immediately",
            "Begin CPR if trained",
        ],
    },
    RuleTier {
        keywords: &["fever", "infection"],
        triage_level: 2,
        urgency_score: 70,
        confidence: 75,
        specialties: &["Internal Medicine", "Infectious Disease"],
        recommendations: &[
            "Monitor temperature and stay hydrated",
            "Seek care promptly if symptoms worsen",
        ],
        risk_factors: &["Possible systemic infection"],
        immediate_actions: &[],
    },
    RuleTier {
        keywords: &["headache", "mild pain"],
        triage_level: 4,
        urgency_score: 30,
        confidence: 70,
        specialties: &["General Medicine", "Neurology"],
        recommendations: &[
            "Rest and monitor symptoms",
            "Use over-the-counter pain relief as directed",
        ],
        risk_factors: &[],
        immediate_actions: &[],
    },
    RuleTier {
        keywords: &[],
        triage_level: 3,
        urgency_score: 50,
        confidence: 60,
        specialties: &["General Medicine"],
        recommendations: &["Consult a medical professional for evaluation"],
        risk_factors: &[],
        immediate_actions: &[],
    },
];

/// Classify symptom text against the tier table. Never fails.
pub fn classify_symptoms(request: &ClassifyRequest) -> Classification {
    let text = request.symptom_text.to_lowercase();

    let tier = RULE_TIERS
        .iter()
        .find(|t| t.keywords.is_empty() || t.keywords.iter().any(|k| text.contains(k)))
        .unwrap_or(&RULE_TIERS[RULE_TIERS.len() - 1]);

    Classification::new(
        tier.triage_level,
        tier.urgency_score,
        tier.confidence,
        RULE_BACKEND_TAG,
    )
    .with_specialties(owned(tier.specialties))
    .with_recommendations(owned(tier.recommendations))
    .with_risk_factors(owned(tier.risk_factors))
    .with_immediate_actions(owned(tier.immediate_actions))
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The terminal backend: deterministic keyword rules, infallible.
pub struct RuleBasedBackend;

impl ClassifierBackend for RuleBasedBackend {
    fn classify(&self, request: &ClassifyRequest) -> Result<Classification, ClassifierError> {
        Ok(classify_symptoms(request))
    }

    fn name(&self) -> &str {
        RULE_BACKEND_TAG
    }
}
