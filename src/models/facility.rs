use serde::{Deserialize, Serialize};

use super::enums::{CostLevel, RecommendationLevel};

/// Candidate hospital from the external facility directory.
///
/// The directory service is the system of record for all of these fields;
/// this crate reads them fresh per matching call and never writes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub total_beds: u32,
    /// Invariant (owned by the directory): `available_beds <= total_beds`.
    pub available_beds: u32,
    pub icu_beds: u32,
    pub emergency_beds: u32,
    pub specialties: Vec<String>,
    pub insurance_accepted: Vec<String>,
    pub cost_level: CostLevel,
    /// Patient rating, 0.0–5.0.
    pub rating: f32,
    pub wait_time_minutes: u32,
}

impl Facility {
    /// Case-insensitive specialty lookup; `"emergency"` matches a facility
    /// listing "Emergency Medicine".
    pub fn has_specialty(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.specialties
            .iter()
            .any(|s| s.to_lowercase().contains(&needle))
    }

    /// Case-insensitive insurer membership test.
    pub fn accepts_insurance(&self, insurer: &str) -> bool {
        self.insurance_accepted
            .iter()
            .any(|i| i.eq_ignore_ascii_case(insurer))
    }

    /// Fraction of beds currently free. Zero when the facility reports no
    /// beds at all (avoids a divide-by-zero on stale directory rows).
    pub fn bed_availability_ratio(&self) -> f64 {
        if self.total_beds == 0 {
            return 0.0;
        }
        f64::from(self.available_beds) / f64::from(self.total_beds)
    }
}

/// One ranked facility: the directory row plus this crate's scoring verdict.
/// Ephemeral — created fresh per matching call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityMatch {
    #[serde(flatten)]
    pub facility: Facility,
    /// Additive rule total; uncapped, practically 0–~140.
    pub match_score: u32,
    /// One entry per contributing rule, in rule-evaluation order.
    pub match_reasons: Vec<String>,
    pub recommendation_level: RecommendationLevel,
}
