//! Builder for ContentGuard.

use std::sync::Arc;
use std::time::Duration;

use content_guard_core::config::GuardrailsConfig;
use content_guard_core::{AuditSink, ContentClassifier, Error, Result, TelemetrySink, TemplateSelector};

use crate::audit::{AuditRecorder, TracingAuditSink};
use crate::business::BusinessLogicChecker;
use crate::compliance::{IndustryComplianceChecker, IndustryRulebook};
use crate::fallback::{FallbackResponseGenerator, RandomTemplateSelector};
use crate::groundedness::GroundednessScorer;
use crate::harm::HarmCategoryAnalyzer;
use crate::injection::PromptInjectionDetector;
use crate::metrics::MetricsTelemetrySink;
use crate::pii::PiiDetector;
use crate::pipeline::ContentGuard;

/// Builder for constructing a ContentGuard.
pub struct ContentGuardBuilder {
    config: GuardrailsConfig,
    classifier: Option<Arc<dyn ContentClassifier>>,
    audit_sink: Option<Arc<dyn AuditSink>>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
    selector: Option<Arc<dyn TemplateSelector>>,
    rulebook: Option<IndustryRulebook>,
}

impl ContentGuardBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: GuardrailsConfig::default(),
            classifier: None,
            audit_sink: None,
            telemetry: None,
            selector: None,
            rulebook: None,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: GuardrailsConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the harm classifier. Required.
    pub fn with_classifier(mut self, classifier: Arc<dyn ContentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Set the audit sink (defaults to structured logging).
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }

    /// Set the telemetry sink (defaults to the `metrics` facade).
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Set the fallback template selector (defaults to a seeded or entropy RNG).
    pub fn with_template_selector(mut self, selector: Arc<dyn TemplateSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Replace the built-in compliance rulebook.
    pub fn with_rulebook(mut self, rulebook: IndustryRulebook) -> Self {
        self.rulebook = Some(rulebook);
        self
    }

    /// Build the ContentGuard.
    pub fn build(self) -> Result<ContentGuard> {
        let classifier = self
            .classifier
            .ok_or_else(|| Error::config("a content classifier is required"))?;

        let pipeline = &self.config.pipeline;
        if !(0.0..=1.0).contains(&pipeline.groundedness_threshold) {
            return Err(Error::config(format!(
                "groundedness_threshold must be within [0, 1], got {}",
                pipeline.groundedness_threshold
            )));
        }

        let mut rulebook = self.rulebook.unwrap_or_else(IndustryRulebook::builtin);
        if let Some(path) = &pipeline.compliance_rules_path {
            rulebook.merge(IndustryRulebook::load(path)?);
        }

        let selector = self.selector.unwrap_or_else(|| match self.config.fallback.seed {
            Some(seed) => Arc::new(RandomTemplateSelector::seeded(seed)),
            None => Arc::new(RandomTemplateSelector::from_entropy()),
        });
        let telemetry = self
            .telemetry
            .unwrap_or_else(|| Arc::new(MetricsTelemetrySink));
        let audit_sink = self.audit_sink.unwrap_or_else(|| Arc::new(TracingAuditSink));

        let timeout = Duration::from_millis(self.config.classifier.timeout_ms);
        tracing::debug!(
            classifier = classifier.name(),
            timeout_ms = self.config.classifier.timeout_ms,
            "Building content guard"
        );

        Ok(ContentGuard {
            harm: HarmCategoryAnalyzer::new(classifier, timeout),
            injection: PromptInjectionDetector::new(),
            pii: PiiDetector::with_marker(pipeline.redaction_marker.clone()),
            groundedness: GroundednessScorer::new(pipeline.groundedness_threshold),
            compliance: Arc::new(IndustryComplianceChecker::new(rulebook)),
            business: BusinessLogicChecker::new(),
            fallback: FallbackResponseGenerator::new(selector),
            recorder: AuditRecorder::new(audit_sink, telemetry.clone()),
            telemetry,
            pii_details: pipeline.pii_details,
            harmful_placeholder: pipeline.harmful_placeholder.clone(),
        })
    }
}

impl Default for ContentGuardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
