//! Facility ranking: score candidate facilities against a classification,
//! the patient's insurance, and symptom-text specialty cues.
//!
//! Scoring is additive over independent rules; each contributing rule also
//! records a reason string so the ranking is auditable. The final list is
//! sorted descending by score with a stable sort, so tied facilities keep
//! their input order.

use crate::models::{Classification, CostLevel, Facility, FacilityMatch, RecommendationLevel};

// ──────────────────────────────────────────────
// Rule weights
// ──────────────────────────────────────────────

const CARDIOLOGY_CUE_BONUS: u32 = 20;
const EMERGENCY_CUE_BONUS: u32 = 15;
const NEUROLOGY_CUE_BONUS: u32 = 25;
const HIGH_PRIORITY_ICU_BONUS: u32 = 15;
const COST_EFFECTIVE_BONUS: u32 = 15;
const INSURANCE_BONUS: u32 = 20;
const GOOD_AVAILABILITY_BONUS: u32 = 15;
const LIMITED_AVAILABILITY_BONUS: u32 = 8;
const EMERGENCY_BEDS_BONUS: u32 = 20;
const SHORT_WAIT_BONUS: u32 = 10;

const GOOD_AVAILABILITY_RATIO: f64 = 0.05;
const LIMITED_AVAILABILITY_RATIO: f64 = 0.02;
const ICU_BEDS_FLOOR: u32 = 5;
const EMERGENCY_BEDS_FLOOR: u32 = 5;
const SHORT_WAIT_MINUTES: u32 = 20;
const URGENT_SCORE_FLOOR: u8 = 70;

// ──────────────────────────────────────────────
// Ranking
// ──────────────────────────────────────────────

/// Score and rank candidate facilities, best match first.
///
/// `patient_insurance = None` simply skips the insurance rule — no penalty.
/// An empty facility list returns an empty ranking.
pub fn rank(
    classification: &Classification,
    patient_insurance: Option<&str>,
    facilities: &[Facility],
    symptom_text: &str,
) -> Vec<FacilityMatch> {
    let mut matches: Vec<FacilityMatch> = facilities
        .iter()
        .map(|facility| score_facility(classification, patient_insurance, facility, symptom_text))
        .collect();

    // Stable sort: tied facilities keep their directory order.
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches
}

fn score_facility(
    classification: &Classification,
    patient_insurance: Option<&str>,
    facility: &Facility,
    symptom_text: &str,
) -> FacilityMatch {
    let text = symptom_text.to_lowercase();
    let mut score: u32 = 0;
    let mut reasons: Vec<String> = Vec::new();

    // 1. Symptom-text specialty cues.
    if (text.contains("chest") || text.contains("heart")) && facility.has_specialty("cardiology") {
        apply(&mut score, &mut reasons, CARDIOLOGY_CUE_BONUS, "Cardiology Specialist");
    }
    if (text.contains("trauma") || text.contains("accident"))
        && facility.has_specialty("emergency")
    {
        apply(&mut score, &mut reasons, EMERGENCY_CUE_BONUS, "Emergency Specialist");
    }
    if (text.contains("brain") || text.contains("head")) && facility.has_specialty("neurology") {
        apply(&mut score, &mut reasons, NEUROLOGY_CUE_BONUS, "Neurology Department");
    }

    // 2. Triage-level-driven. For triage <= 2 the reason is recorded
    // unconditionally; the score bonus still requires the ICU bed floor.
    if classification.triage_level <= 2 {
        if facility.icu_beds > ICU_BEDS_FLOOR {
            score += HIGH_PRIORITY_ICU_BONUS;
            tracing::debug!(bonus = HIGH_PRIORITY_ICU_BONUS, rule = "icu_capacity", "rule applied");
        }
        reasons.push("High-Priority Care Available".to_string());
    }
    if classification.triage_level >= 4
        && matches!(facility.cost_level, CostLevel::Low | CostLevel::Medium)
    {
        apply(&mut score, &mut reasons, COST_EFFECTIVE_BONUS, "Cost-Effective Option");
    }

    // 3. Insurance.
    if let Some(insurer) = patient_insurance {
        if facility.accepts_insurance(insurer) {
            apply(&mut score, &mut reasons, INSURANCE_BONUS, "Insurance Accepted");
        }
    }

    // 4. Bed availability ratio.
    let ratio = facility.bed_availability_ratio();
    if ratio > GOOD_AVAILABILITY_RATIO {
        apply(&mut score, &mut reasons, GOOD_AVAILABILITY_BONUS, "Good Bed Availability");
    } else if ratio > LIMITED_AVAILABILITY_RATIO {
        apply(&mut score, &mut reasons, LIMITED_AVAILABILITY_BONUS, "Limited Bed Availability");
    }

    // 5. Emergency capacity for urgent cases.
    if classification.urgency_score >= URGENT_SCORE_FLOOR
        && facility.emergency_beds > EMERGENCY_BEDS_FLOOR
    {
        apply(&mut score, &mut reasons, EMERGENCY_BEDS_BONUS, "Emergency Beds Available");
    }

    // 6. Quality: continuous rating contribution, no reason text.
    let rating_points = (f64::from(facility.rating) * 2.0).round() as u32;
    score += rating_points;
    tracing::debug!(bonus = rating_points, rule = "rating", "rule applied");

    // 7. Wait time.
    if facility.wait_time_minutes <= SHORT_WAIT_MINUTES {
        apply(&mut score, &mut reasons, SHORT_WAIT_BONUS, "Short Wait Time");
    }

    tracing::debug!(
        facility = %facility.id,
        score,
        reasons = reasons.len(),
        "facility scored"
    );

    FacilityMatch {
        facility: facility.clone(),
        match_score: score,
        match_reasons: reasons,
        recommendation_level: recommendation_level(score),
    }
}

fn apply(score: &mut u32, reasons: &mut Vec<String>, bonus: u32, reason: &str) {
    *score += bonus;
    tracing::debug!(bonus, reason, "rule applied");
    reasons.push(reason.to_string());
}

/// Threshold mapping from match score to patient-facing recommendation tier.
fn recommendation_level(score: u32) -> RecommendationLevel {
    if score >= 80 {
        RecommendationLevel::HighlyRecommended
    } else if score >= 60 {
        RecommendationLevel::Recommended
    } else if score >= 40 {
        RecommendationLevel::Suitable
    } else {
        RecommendationLevel::Available
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
