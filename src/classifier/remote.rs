//! External-model backend: delegates classification (and photo analysis) to a
//! remote provider over a JSON request/response exchange.
//!
//! Provider replies are coerced into the same bounded shapes the rule-based
//! backend produces: scalar fields are clamped into range and scalar-or-list
//! fields are normalized into lists. Anything that cannot be coerced is a
//! backend failure, which the chain recovers by falling through.

use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

use crate::config::PROVIDER_TIMEOUT_SECS;
use crate::models::{Classification, ImageQuality, PhotoFinding, Severity};

use super::{ClassifierBackend, ClassifierError, ClassifyRequest};

// ──────────────────────────────────────────────
// Wire types
// ──────────────────────────────────────────────

/// Request body for the provider's classification endpoint.
#[derive(Serialize)]
struct ClassifyWireRequest<'a> {
    model: &'a str,
    symptom_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    patient_age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patient_gender: Option<&'a str>,
}

/// Request body for the provider's vision endpoint.
#[derive(Serialize)]
struct VisionWireRequest<'a> {
    model: &'a str,
    /// Base64-encoded image bytes.
    image: &'a str,
}

// ──────────────────────────────────────────────
// Backend
// ──────────────────────────────────────────────

/// HTTP client for a remote classification/vision provider.
pub struct ExternalModelBackend {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl ExternalModelBackend {
    /// Point at a provider with a bounded request timeout.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Provider with the default bounded timeout.
    pub fn with_default_timeout(base_url: &str, model: &str) -> Self {
        Self::new(base_url, model, PROVIDER_TIMEOUT_SECS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Analyze one photo; the provider reply is coerced into a
    /// [`PhotoFinding`] with the same lenient normalization as
    /// classification replies.
    pub fn analyze_photo(&self, image_b64: &str) -> Result<PhotoFinding, ClassifierError> {
        let body = VisionWireRequest {
            model: &self.model,
            image: image_b64,
        };
        let text = self.post_json("v1/vision", &body)?;
        parse_photo_finding(&text)
    }

    fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<String, ClassifierError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self.client.post(&url).json(body).send().map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout(self.timeout_secs)
            } else {
                ClassifierError::ProviderUnavailable(self.base_url.clone())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClassifierError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))
    }
}

impl ClassifierBackend for ExternalModelBackend {
    fn classify(&self, request: &ClassifyRequest) -> Result<Classification, ClassifierError> {
        let body = ClassifyWireRequest {
            model: &self.model,
            symptom_text: &request.symptom_text,
            patient_age: request.patient_age,
            patient_gender: request.patient_gender.as_deref(),
        };
        let text = self.post_json("v1/classify", &body)?;
        coerce_classification(&text, &self.model)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

// ──────────────────────────────────────────────
// Response coercion
// ──────────────────────────────────────────────

/// Coerce a provider classification reply into a bounded [`Classification`].
///
/// `triage_level` and `urgency_score` are required; everything else is
/// defaulted or normalized leniently. Values outside the contract ranges are
/// clamped, not rejected.
pub fn coerce_classification(
    response: &str,
    fallback_model_tag: &str,
) -> Result<Classification, ClassifierError> {
    let value = parse_json_body(response)?;

    let triage_level = require_int(&value, "triage_level")?.clamp(1, 5) as u8;
    let urgency_score = require_int(&value, "urgency_score")?.clamp(0, 100) as u8;
    let confidence = optional_int(&value, "confidence").unwrap_or(50).clamp(0, 100) as u8;

    let ai_model = value
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or(fallback_model_tag)
        .to_string();

    Ok(
        Classification::new(triage_level, urgency_score, confidence, &ai_model)
            .with_recommendations(string_list(value.get("recommendations")))
            .with_risk_factors(string_list(value.get("risk_factors")))
            .with_specialties(string_list(value.get("suggested_specialties")))
            .with_immediate_actions(string_list(value.get("immediate_actions"))),
    )
}

/// Coerce a provider vision reply into a [`PhotoFinding`].
pub fn parse_photo_finding(response: &str) -> Result<PhotoFinding, ClassifierError> {
    let value = parse_json_body(response)?;

    let severity = value
        .get("severity")
        .and_then(Value::as_str)
        .ok_or_else(|| ClassifierError::MalformedResponse("missing severity".into()))?;
    let severity = Severity::from_str(severity)
        .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;

    let image_quality = match value.get("image_quality").and_then(Value::as_str) {
        Some(q) => ImageQuality::from_str(q)
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?,
        None => ImageQuality::Good,
    };

    let confidence = optional_int(&value, "confidence").unwrap_or(50).clamp(0, 100) as u8;

    Ok(PhotoFinding::new(severity, image_quality, confidence)
        .with_conditions(string_list(value.get("detected_conditions")))
        .with_recommendations(string_list(value.get("recommendations"))))
}

/// Parse the reply body as JSON, tolerating a Markdown ```json fence around
/// the object (some providers wrap structured replies that way).
fn parse_json_body(response: &str) -> Result<Value, ClassifierError> {
    let trimmed = match response.find("```json") {
        Some(start) => {
            let content_start = start + 7;
            let content_end = response[content_start..].find("```").ok_or_else(|| {
                ClassifierError::MalformedResponse("unclosed JSON fence".into())
            })?;
            response[content_start..content_start + content_end].trim()
        }
        None => response.trim(),
    };

    serde_json::from_str(trimmed).map_err(|e| ClassifierError::MalformedResponse(e.to_string()))
}

fn require_int(value: &Value, field: &str) -> Result<i64, ClassifierError> {
    optional_int(value, field)
        .ok_or_else(|| ClassifierError::MalformedResponse(format!("missing numeric {field}")))
}

fn optional_int(value: &Value, field: &str) -> Option<i64> {
    match value.get(field)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        // Some providers quote their numbers, sometimes as floats.
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
}

/// Normalize a scalar-or-list provider field into a list of strings.
/// Internal fields are always lists; the scalar form exists only on the wire.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(other) => vec![other.to_string()],
    }
}

// ──────────────────────────────────────────────
// Test double
// ──────────────────────────────────────────────

/// Mock backend for tests — returns a configurable result.
pub struct MockBackend {
    name: String,
    result: Result<Classification, ClassifierError>,
}

impl MockBackend {
    pub fn returning(classification: Classification) -> Self {
        Self {
            name: classification.ai_model.clone(),
            result: Ok(classification),
        }
    }

    pub fn failing(error: ClassifierError) -> Self {
        Self {
            name: "mock-failing".into(),
            result: Err(error),
        }
    }
}

impl ClassifierBackend for MockBackend {
    fn classify(&self, _request: &ClassifyRequest) -> Result<Classification, ClassifierError> {
        self.result.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_well_formed_reply() {
        let body = r#"{
            "triage_level": 2,
            "urgency_score": 74,
            "confidence": 81,
            "model": "medgemma:4b",
            "recommendations": ["See a doctor within 24 hours"],
            "risk_factors": ["Dehydration"],
            "suggested_specialties": ["Internal Medicine"],
            "immediate_actions": []
        }"#;
        let c = coerce_classification(body, "fallback-tag").unwrap();
        assert_eq!(c.triage_level, 2);
        assert_eq!(c.urgency_score, 74);
        assert_eq!(c.confidence, 81);
        assert_eq!(c.ai_model, "medgemma:4b");
        assert_eq!(c.recommendations, vec!["See a doctor within 24 hours"]);
    }

    #[test]
    fn clamps_out_of_range_provider_values() {
        let body = r#"{"triage_level": 9, "urgency_score": 250, "confidence": -3}"#;
        let c = coerce_classification(body, "m").unwrap();
        assert_eq!(c.triage_level, 5);
        assert_eq!(c.urgency_score, 100);
        assert_eq!(c.confidence, 0);
        assert!(c.in_bounds());
    }

    #[test]
    fn scalar_fields_normalize_to_lists() {
        let body = r#"{
            "triage_level": 3,
            "urgency_score": 50,
            "recommendations": "Rest at home",
            "suggested_specialties": ["General Medicine", null, 7]
        }"#;
        let c = coerce_classification(body, "m").unwrap();
        assert_eq!(c.recommendations, vec!["Rest at home"]);
        assert_eq!(c.suggested_specialties, vec!["General Medicine", "7"]);
    }

    #[test]
    fn missing_confidence_defaults() {
        let body = r#"{"triage_level": 3, "urgency_score": 50}"#;
        let c = coerce_classification(body, "m").unwrap();
        assert_eq!(c.confidence, 50);
    }

    #[test]
    fn fallback_tag_used_when_model_absent() {
        let body = r#"{"triage_level": 3, "urgency_score": 50}"#;
        let c = coerce_classification(body, "configured-model").unwrap();
        assert_eq!(c.ai_model, "configured-model");
    }

    #[test]
    fn quoted_numbers_are_accepted() {
        let body = r#"{"triage_level": "1", "urgency_score": "95"}"#;
        let c = coerce_classification(body, "m").unwrap();
        assert_eq!(c.triage_level, 1);
        assert_eq!(c.urgency_score, 95);
    }

    #[test]
    fn quoted_floats_round_like_bare_floats() {
        let body = r#"{"triage_level": "2.4", "urgency_score": "95.7", "confidence": 80.2}"#;
        let c = coerce_classification(body, "m").unwrap();
        assert_eq!(c.triage_level, 2);
        assert_eq!(c.urgency_score, 96);
        assert_eq!(c.confidence, 80);
    }

    #[test]
    fn fenced_reply_is_unwrapped() {
        let body = "Here is the assessment:\n```json\n{\"triage_level\": 2, \"urgency_score\": 70}\n```\nStay safe.";
        let c = coerce_classification(body, "m").unwrap();
        assert_eq!(c.triage_level, 2);
    }

    #[test]
    fn unparsable_reply_is_malformed() {
        let err = coerce_classification("the patient seems fine", "m").unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let err = coerce_classification(r#"{"urgency_score": 50}"#, "m").unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[test]
    fn photo_finding_coerces() {
        let body = r#"{
            "severity": "high",
            "image_quality": "good",
            "confidence": 77,
            "detected_conditions": ["Deep laceration"],
            "recommendations": "Apply pressure to the wound"
        }"#;
        let f = parse_photo_finding(body).unwrap();
        assert_eq!(f.severity, Severity::High);
        assert_eq!(f.image_quality, ImageQuality::Good);
        assert_eq!(f.confidence, 77);
        assert_eq!(f.recommendations, vec!["Apply pressure to the wound"]);
    }

    #[test]
    fn photo_finding_defaults_quality_and_confidence() {
        let f = parse_photo_finding(r#"{"severity": "low"}"#).unwrap();
        assert_eq!(f.image_quality, ImageQuality::Good);
        assert_eq!(f.confidence, 50);
        assert!(f.detected_conditions.is_empty());
    }

    #[test]
    fn photo_finding_requires_severity() {
        let err = parse_photo_finding(r#"{"image_quality": "good"}"#).unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedResponse(_)));
    }

    #[test]
    fn backend_constructor_trims_trailing_slash() {
        let backend = ExternalModelBackend::new("https://triage.example.com/", "gpt-4o-mini", 30);
        assert_eq!(backend.base_url(), "https://triage.example.com");
        assert_eq!(backend.name(), "gpt-4o-mini");
    }
}
