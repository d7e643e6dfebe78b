//! The validation pipeline.
//!
//! [`ContentGuard`] composes the detectors into the public entry points.
//! None of them returns an error: anything that prevents a decision becomes a
//! fail-closed result (or `false` / a removed text for the narrower calls).

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use content_guard_core::config::PiiDetailMode;
use content_guard_core::{
    new_validation_id, Error, GuardrailContext, GuardrailResult, GuardrailViolation,
    RecommendedAction, Result, SafetyLevel, SanitizationOptions, TelemetrySink, ValidationKind,
};

use crate::aggregate::{
    aggregate, business_check, compliance_check, groundedness_check, harm_check, injection_check,
    pii_check,
};
use crate::audit::AuditRecorder;
use crate::business::BusinessLogicChecker;
use crate::compliance::IndustryComplianceChecker;
use crate::fallback::FallbackResponseGenerator;
use crate::groundedness::GroundednessScorer;
use crate::harm::HarmCategoryAnalyzer;
use crate::injection::PromptInjectionDetector;
use crate::pii::PiiDetector;

/// Content-safety pipeline. Cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct ContentGuard {
    pub(crate) harm: HarmCategoryAnalyzer,
    pub(crate) injection: PromptInjectionDetector,
    pub(crate) pii: PiiDetector,
    pub(crate) groundedness: GroundednessScorer,
    pub(crate) compliance: Arc<IndustryComplianceChecker>,
    pub(crate) business: BusinessLogicChecker,
    pub(crate) fallback: FallbackResponseGenerator,
    pub(crate) recorder: AuditRecorder,
    pub(crate) telemetry: Arc<dyn TelemetrySink>,
    pub(crate) pii_details: PiiDetailMode,
    pub(crate) harmful_placeholder: String,
}

impl ContentGuard {
    pub fn builder() -> crate::builder::ContentGuardBuilder {
        crate::builder::ContentGuardBuilder::new()
    }

    /// Full validation of generated content.
    pub async fn validate_output(&self, content: &str, context: &GuardrailContext) -> GuardrailResult {
        let started = Instant::now();
        let validation_id = new_validation_id();
        let outcome = AssertUnwindSafe(self.run_output_checks(&validation_id, content, context))
            .catch_unwind()
            .await;
        self.settle(outcome, validation_id, content, context, ValidationKind::Output, started)
            .await
    }

    /// Reduced validation of user-submitted text: harm and injection only.
    pub async fn validate_input(&self, content: &str, context: &GuardrailContext) -> GuardrailResult {
        let started = Instant::now();
        let validation_id = new_validation_id();
        let outcome = AssertUnwindSafe(self.run_input_checks(&validation_id, content, context))
            .catch_unwind()
            .await;
        self.settle(outcome, validation_id, content, context, ValidationKind::Input, started)
            .await
    }

    /// Whether every classifier category scores at or below the level's threshold.
    pub async fn is_content_safe(&self, content: &str, level: SafetyLevel) -> bool {
        let threshold = level.threshold();
        match self.harm.classify(content).await {
            Ok(scores) => scores.iter().all(|s| s.severity <= threshold),
            Err(e) => {
                tracing::warn!(error = %e, "Safety check failed; treating content as unsafe");
                false
            }
        }
    }

    /// Redact PII and/or drop content the classifier still flags.
    pub async fn sanitize(&self, content: &str, options: SanitizationOptions) -> String {
        let mut text = content.to_string();

        if options.redact_pii {
            text = self.pii.scan(&text).redacted_content;
        }

        if options.remove_harmful_content {
            let analysis = self.harm.analyze(&text).await;
            if analysis.has_violations {
                tracing::debug!(details = %analysis.details, "Removing harmful content");
                text = if options.preserve_structure {
                    self.harmful_placeholder.clone()
                } else {
                    String::new()
                };
            }
        }

        text
    }

    /// Emit telemetry for a single violation.
    pub fn log_violation(&self, violation: &GuardrailViolation) {
        crate::metrics::log_violation(self.telemetry.as_ref(), violation);
    }

    pub fn generate_safe_fallback_response(
        &self,
        result: &GuardrailResult,
        context: &GuardrailContext,
    ) -> String {
        self.fallback.generate(result, context)
    }

    async fn run_output_checks(
        &self,
        validation_id: &str,
        content: &str,
        context: &GuardrailContext,
    ) -> Result<GuardrailResult> {
        let rule_scans = async {
            let injection = self.injection.scan(content);
            let pii = self.pii.scan(content);
            let grounded = context
                .has_source_documents
                .then(|| self.groundedness.score(content, &context.source_documents));
            let compliance = self.compliance.check(content, &context.industry);
            let business = self.business.check(content);
            (injection, pii, grounded, compliance, business)
        };
        let (harm, (injection, pii, grounded, compliance, business)) =
            tokio::join!(self.harm.analyze(content), rule_scans);

        let mut checks = vec![
            harm_check(&harm),
            injection_check(&injection),
            pii_check(&pii, self.pii_details),
        ];
        if let Some(score) = grounded {
            checks.push(groundedness_check(&score, self.groundedness.threshold()));
        }
        checks.push(compliance_check(&compliance));
        checks.push(business_check(&business));

        let mut result = aggregate(validation_id, checks, pii.redacted_content);
        if pii.contains_pii {
            result = result.with_metadata("pii_entity_count", pii.detected_entities.len());
        }
        self.attach_fallback(result, context)
    }

    async fn run_input_checks(
        &self,
        validation_id: &str,
        content: &str,
        context: &GuardrailContext,
    ) -> Result<GuardrailResult> {
        let (harm, injection) = tokio::join!(self.harm.analyze(content), async {
            self.injection.scan(content)
        });

        let checks = vec![harm_check(&harm), injection_check(&injection)];
        let result = aggregate(validation_id, checks, self.pii.scan(content).redacted_content);
        self.attach_fallback(result, context)
    }

    fn attach_fallback(
        &self,
        mut result: GuardrailResult,
        context: &GuardrailContext,
    ) -> Result<GuardrailResult> {
        if result.recommended_action != RecommendedAction::Block {
            return Ok(result);
        }
        let response = self.fallback.generate(&result, context);
        if response.trim().is_empty() {
            return Err(Error::pipeline("blocked result has an empty fallback response"));
        }
        result.fallback_response = Some(response);
        Ok(result)
    }

    /// Common tail of both validation entry points: fail closed on error or
    /// panic, stamp metadata, report violations, then audit.
    async fn settle(
        &self,
        outcome: std::thread::Result<Result<GuardrailResult>>,
        validation_id: String,
        content: &str,
        context: &GuardrailContext,
        kind: ValidationKind,
        started: Instant,
    ) -> GuardrailResult {
        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::error!(validation_id = %validation_id, error = %e, "Validation failed; failing closed");
                GuardrailResult::fail_closed(validation_id, e.to_string())
            }
            Err(_) => {
                tracing::error!(validation_id = %validation_id, "Validation panicked; failing closed");
                GuardrailResult::fail_closed(validation_id, "internal error during validation")
            }
        };

        let check_count = result.checks.len();
        let failed_checks = result.failed_check_count();
        let result = result
            .with_processing_time(started.elapsed())
            .with_metadata("industry", context.industry.as_str())
            .with_metadata("content_type", context.content_type.as_str())
            .with_metadata("mode", kind.as_str())
            .with_metadata("check_count", check_count)
            .with_metadata("failed_checks", failed_checks);

        tracing::info!(
            validation_id = %result.validation_id,
            mode = kind.as_str(),
            action = %result.recommended_action,
            max_severity = %result.max_severity,
            failed_checks,
            "Validation complete"
        );

        let emitted = AssertUnwindSafe(async {
            for check in result.failed_checks() {
                self.log_violation(&GuardrailViolation::from_check(check, context, &result.validation_id));
            }
            self.recorder.record(content, context, &result, kind).await;
        })
        .catch_unwind()
        .await;
        if emitted.is_err() {
            tracing::warn!(validation_id = %result.validation_id, "Telemetry or audit sink panicked");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_guard_core::mocks::{FailingClassifier, KeywordClassifier, MockClassifier};
    use content_guard_core::{CheckType, ContentClassifier, Severity};

    fn build_guard(classifier: impl ContentClassifier + 'static) -> ContentGuard {
        ContentGuard::builder()
            .with_classifier(Arc::new(classifier))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_clean_output_is_allowed() {
        let guard = build_guard(MockClassifier::clean());
        let ctx = GuardrailContext::new("real_estate");
        let result = guard
            .validate_output("This three bedroom home has a renovated kitchen.", &ctx)
            .await;

        assert!(result.is_allowed);
        assert_eq!(result.recommended_action, RecommendedAction::Allow);
        assert_eq!(result.checks.len(), 5);
        assert!(result.fallback_response.is_none());
        assert_eq!(result.metadata["mode"], "output");
        assert_eq!(result.metadata["check_count"], 5);
    }

    #[tokio::test]
    async fn test_check_order() {
        let guard = build_guard(MockClassifier::clean());
        let ctx = GuardrailContext::new("finance").with_source_documents(["some source"]);
        let result = guard.validate_output("some source", &ctx).await;
        let order: Vec<CheckType> = result.checks.iter().map(|c| c.check_type).collect();
        assert_eq!(
            order,
            vec![
                CheckType::HarmCategories,
                CheckType::PromptInjection,
                CheckType::Pii,
                CheckType::Groundedness,
                CheckType::IndustryCompliance,
                CheckType::BusinessLogic,
            ]
        );
    }

    #[tokio::test]
    async fn test_input_runs_reduced_pipeline() {
        let guard = build_guard(MockClassifier::clean());
        let result = guard
            .validate_input("my ssn is 123-45-6789", &GuardrailContext::new("general"))
            .await;
        assert_eq!(result.checks.len(), 2);
        assert!(result.is_allowed);
        assert_eq!(result.processed_content, "my ssn is [REDACTED]");
        assert_eq!(result.metadata["mode"], "input");
    }

    #[tokio::test]
    async fn test_classifier_failure_blocks_with_fallback() {
        let guard = build_guard(FailingClassifier);
        let result = guard
            .validate_output("perfectly fine text", &GuardrailContext::new("healthcare"))
            .await;
        assert!(!result.is_allowed);
        assert_eq!(result.recommended_action, RecommendedAction::Block);
        assert_eq!(result.max_severity, Severity::Critical);
        assert!(!result.fallback_response.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_error_fails_closed() {
        let guard = build_guard(MockClassifier::clean());
        let ctx = GuardrailContext::new("finance");
        let outcome = Ok(Err(Error::pipeline("blocked result has an empty fallback response")));
        let result = guard
            .settle(outcome, "v-err".to_string(), "text", &ctx, ValidationKind::Output, Instant::now())
            .await;

        assert!(!result.is_allowed);
        assert_eq!(result.recommended_action, RecommendedAction::Block);
        assert_eq!(result.max_severity, Severity::Critical);
        assert_eq!(result.validation_id, "v-err");
        assert_eq!(
            result.fallback_response.as_deref(),
            Some(content_guard_core::GENERIC_FALLBACK_MESSAGE)
        );
        assert!(result.metadata["error"]
            .as_str()
            .is_some_and(|e| e.contains("empty fallback")));
    }

    #[tokio::test]
    async fn test_is_content_safe_thresholds() {
        let guard = build_guard(MockClassifier::flagging("Violence", 4));
        assert!(guard.is_content_safe("x", SafetyLevel::Low).await);
        assert!(guard.is_content_safe("x", SafetyLevel::Medium).await);
        assert!(!guard.is_content_safe("x", SafetyLevel::High).await);
        assert!(!guard.is_content_safe("x", SafetyLevel::Strict).await);

        let failing = build_guard(FailingClassifier);
        assert!(!failing.is_content_safe("x", SafetyLevel::Low).await);
    }

    #[tokio::test]
    async fn test_sanitize_modes() {
        let guard = build_guard(KeywordClassifier::new().flag("attack", "Violence", 4));
        let redacted = guard
            .sanitize("email a@b.io", SanitizationOptions::default())
            .await;
        assert_eq!(redacted, "email [REDACTED]");

        let removed = guard
            .sanitize("attack at dawn", SanitizationOptions::default())
            .await;
        assert_eq!(removed, "[Content removed for safety]");

        let emptied = guard
            .sanitize(
                "attack at dawn",
                SanitizationOptions {
                    preserve_structure: false,
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(emptied, "");

        let untouched = guard
            .sanitize(
                "attack a@b.io",
                SanitizationOptions {
                    redact_pii: false,
                    remove_harmful_content: false,
                    preserve_structure: true,
                },
            )
            .await;
        assert_eq!(untouched, "attack a@b.io");
    }
}
