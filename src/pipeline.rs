//! Assessment orchestration: classify symptom text through the backend
//! chain, then fold photo findings into the result.

use std::sync::Arc;

use crate::classifier::remote::ExternalModelBackend;
use crate::classifier::{ClassifierBackend, ClassifierChain, ClassifyRequest};
use crate::combiner;
use crate::error::TriageError;
use crate::models::{Classification, PhotoFinding};

/// End-to-end triage pipeline.
///
/// Stateless between calls: every assessment takes its inputs as arguments
/// and returns a fresh classification, so concurrent callers need no
/// coordination.
pub struct TriagePipeline {
    chain: ClassifierChain,
}

impl TriagePipeline {
    /// Rule-based-only pipeline. Always available, never fails.
    pub fn new() -> Self {
        Self {
            chain: ClassifierChain::new(),
        }
    }

    /// Pipeline that tries a remote provider first, rules on failure.
    pub fn with_remote(base_url: &str, model: &str) -> Self {
        Self::new().with_backend(Box::new(ExternalModelBackend::with_default_timeout(
            base_url, model,
        )))
    }

    /// Prepend a backend ahead of everything currently configured.
    pub fn with_backend(mut self, backend: Box<dyn ClassifierBackend>) -> Self {
        self.chain = self.chain.with_priority_backend(backend);
        self
    }

    /// Run one assessment.
    ///
    /// Precondition: at least one of `request.symptom_text` (non-blank) or
    /// `photo_findings` must be present — violating it is a caller bug and
    /// returns [`TriageError::InvalidInput`]. Given valid input this always
    /// produces a classification; provider failures degrade to the
    /// rule-based backend rather than erroring.
    pub fn assess(
        &self,
        request: &ClassifyRequest,
        photo_findings: &[PhotoFinding],
    ) -> Result<Classification, TriageError> {
        if request.symptom_text.trim().is_empty() && photo_findings.is_empty() {
            return Err(TriageError::InvalidInput(
                "at least one of symptom text or photo findings is required".into(),
            ));
        }

        let base = self.chain.classify(request);
        let classification = if photo_findings.is_empty() {
            base
        } else {
            combiner::combine(base, photo_findings)
        };

        tracing::info!(
            assessment_id = %classification.assessment_id,
            triage_level = classification.triage_level,
            urgency_score = classification.urgency_score,
            ai_model = %classification.ai_model,
            photos = photo_findings.len(),
            "assessment complete"
        );
        Ok(classification)
    }
}

impl Default for TriagePipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Async wrapper around [`TriagePipeline::assess`] for callers on a tokio
/// runtime; the blocking provider call runs on the blocking pool.
pub async fn assess_async(
    pipeline: Arc<TriagePipeline>,
    request: ClassifyRequest,
    photo_findings: Vec<PhotoFinding>,
) -> Result<Classification, TriageError> {
    tokio::task::spawn_blocking(move || pipeline.assess(&request, &photo_findings))
        .await
        .map_err(|e| TriageError::Internal(e.to_string()))?
}
