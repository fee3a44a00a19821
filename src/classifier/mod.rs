//! Symptom classification with pluggable backends.
//!
//! Backends implement one `ClassifierBackend` contract and are tried in
//! priority order; any failure falls through to the next backend, and the
//! chain terminates in the rule-based backend which never fails. Callers
//! therefore always receive a valid [`Classification`], never an error.

pub mod remote;
pub mod rules;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Classification;

// ──────────────────────────────────────────────
// Types
// ──────────────────────────────────────────────

/// One classification request: symptom text plus optional patient metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub symptom_text: String,
    pub patient_age: Option<u8>,
    pub patient_gender: Option<String>,
}

impl ClassifyRequest {
    pub fn new(symptom_text: &str) -> Self {
        Self {
            symptom_text: symptom_text.to_string(),
            patient_age: None,
            patient_gender: None,
        }
    }

    pub fn with_patient(mut self, age: Option<u8>, gender: Option<&str>) -> Self {
        self.patient_age = age;
        self.patient_gender = gender.map(str::to_string);
        self
    }
}

/// Backend-level failures. Recovered inside the chain by falling through to
/// the next backend — these never surface past the classifier.
#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    #[error("classification provider unreachable at {0}")]
    ProviderUnavailable(String),

    #[error("provider returned error (status {status}): {body}")]
    ProviderError { status: u16, body: String },

    #[error("provider request timed out after {0}s")]
    Timeout(u64),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

// ──────────────────────────────────────────────
// Trait
// ──────────────────────────────────────────────

/// One classification backend. Rule-based and external-model backends
/// satisfy the exact same output contract (same field set, same ranges).
pub trait ClassifierBackend: Send + Sync {
    fn classify(&self, request: &ClassifyRequest) -> Result<Classification, ClassifierError>;

    /// Backend tag for logging and the classification's `ai_model` field.
    fn name(&self) -> &str;
}

// ──────────────────────────────────────────────
// Chain
// ──────────────────────────────────────────────

/// Priority-ordered backend chain.
///
/// Higher-priority backends come first; the built-in rule-based terminator
/// guarantees a result even when every configured backend fails.
pub struct ClassifierChain {
    backends: Vec<Box<dyn ClassifierBackend>>,
}

impl ClassifierChain {
    /// Chain with only the rule-based terminator.
    pub fn new() -> Self {
        Self {
            backends: vec![Box::new(rules::RuleBasedBackend)],
        }
    }

    /// Insert a backend ahead of everything currently configured.
    pub fn with_priority_backend(mut self, backend: Box<dyn ClassifierBackend>) -> Self {
        self.backends.insert(0, backend);
        self
    }

    /// Classify, falling through failed backends in priority order.
    ///
    /// Total: if every configured backend fails, the rule-based terminator
    /// still produces a deterministic classification.
    pub fn classify(&self, request: &ClassifyRequest) -> Classification {
        for backend in &self.backends {
            match backend.classify(request) {
                Ok(classification) => {
                    tracing::debug!(
                        backend = backend.name(),
                        triage_level = classification.triage_level,
                        urgency_score = classification.urgency_score,
                        "classification produced"
                    );
                    return classification;
                }
                Err(e) => {
                    tracing::warn!(backend = backend.name(), error = %e, "backend failed, falling through");
                }
            }
        }
        // Unreachable when the chain was built through the constructors, but
        // a custom backend list could in principle exhaust.
        rules::classify_symptoms(request)
    }
}

impl Default for ClassifierChain {
    fn default() -> Self {
        Self::new()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::remote::MockBackend;
    use super::*;

    #[test]
    fn default_chain_uses_rule_backend() {
        let chain = ClassifierChain::new();
        let result = chain.classify(&ClassifyRequest::new("severe fever"));
        assert_eq!(result.ai_model, rules::RULE_BACKEND_TAG);
        assert_eq!(result.triage_level, 2);
    }

    #[test]
    fn healthy_priority_backend_wins() {
        let canned = Classification::new(2, 80, 90, "mock-model");
        let chain = ClassifierChain::new()
            .with_priority_backend(Box::new(MockBackend::returning(canned)));
        let result = chain.classify(&ClassifyRequest::new("chest pain"));
        assert_eq!(result.ai_model, "mock-model");
        assert_eq!(result.urgency_score, 80);
    }

    #[test]
    fn failed_backend_falls_through_to_rules() {
        let chain = ClassifierChain::new().with_priority_backend(Box::new(MockBackend::failing(
            ClassifierError::ProviderUnavailable("http://provider".into()),
        )));
        let result = chain.classify(&ClassifyRequest::new("chest pain"));
        // Provider down → rule tier 1 still answers.
        assert_eq!(result.ai_model, rules::RULE_BACKEND_TAG);
        assert_eq!(result.triage_level, 1);
        assert_eq!(result.urgency_score, 95);
    }

    #[test]
    fn fallthrough_preserves_priority_order() {
        let canned = Classification::new(3, 55, 70, "second-choice");
        let chain = ClassifierChain::new()
            .with_priority_backend(Box::new(MockBackend::returning(canned)))
            .with_priority_backend(Box::new(MockBackend::failing(
                ClassifierError::Timeout(30),
            )));
        let result = chain.classify(&ClassifyRequest::new("dizzy"));
        assert_eq!(result.ai_model, "second-choice");
    }

    #[test]
    fn request_builder_carries_patient_metadata() {
        let req = ClassifyRequest::new("fever").with_patient(Some(67), Some("female"));
        assert_eq!(req.patient_age, Some(67));
        assert_eq!(req.patient_gender.as_deref(), Some("female"));
    }
}
