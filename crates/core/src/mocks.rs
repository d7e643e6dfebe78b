//! Mock implementations of core traits for testing.
//!
//! These are used by unit tests across the workspace and by the integration
//! suites to script classifier behaviour and observe telemetry.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    traits::{
        AuditSink, ContentClassifier, TelemetrySink, TemplateSelector, ValidationTelemetry,
    },
    types::{CategoryScore, GuardrailAudit, GuardrailViolation},
    Error, Result,
};

// =============================================================================
// Classifiers
// =============================================================================

/// Classifier returning the same scores for every text.
pub struct MockClassifier {
    scores: Vec<CategoryScore>,
    call_count: AtomicUsize,
}

impl MockClassifier {
    pub fn new(scores: Vec<CategoryScore>) -> Self {
        Self {
            scores,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Every default category scored zero.
    pub fn clean() -> Self {
        Self::new(
            crate::types::DEFAULT_HARM_CATEGORIES
                .iter()
                .map(|c| CategoryScore::new(*c, 0))
                .collect(),
        )
    }

    /// A single category at the given raw severity.
    pub fn flagging(category: &str, severity: u32) -> Self {
        Self::new(vec![CategoryScore::new(category, severity)])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentClassifier for MockClassifier {
    async fn analyze(&self, _text: &str) -> Result<Vec<CategoryScore>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.scores.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Classifier that flags text containing any of the given needles.
pub struct KeywordClassifier {
    needles: Vec<(String, String, u32)>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self { needles: Vec::new() }
    }

    /// Score `category` at `severity` whenever `needle` appears (case-insensitive).
    pub fn flag(mut self, needle: &str, category: &str, severity: u32) -> Self {
        self.needles
            .push((needle.to_lowercase(), category.to_string(), severity));
        self
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentClassifier for KeywordClassifier {
    async fn analyze(&self, text: &str) -> Result<Vec<CategoryScore>> {
        let lower = text.to_lowercase();
        Ok(self
            .needles
            .iter()
            .map(|(needle, category, severity)| {
                let score = if lower.contains(needle.as_str()) { *severity } else { 0 };
                CategoryScore::new(category.clone(), score)
            })
            .collect())
    }
}

/// Classifier that always errors, as if the service were unreachable.
pub struct FailingClassifier;

#[async_trait]
impl ContentClassifier for FailingClassifier {
    async fn analyze(&self, _text: &str) -> Result<Vec<CategoryScore>> {
        Err(Error::classifier_unavailable("connection refused"))
    }
}

/// Classifier that panics mid-call, standing in for a bug below the pipeline.
pub struct PanickingClassifier;

#[async_trait]
impl ContentClassifier for PanickingClassifier {
    async fn analyze(&self, _text: &str) -> Result<Vec<CategoryScore>> {
        panic!("classifier response decoder panicked")
    }
}

/// Classifier that sleeps before answering clean.
pub struct SlowClassifier {
    delay: Duration,
}

impl SlowClassifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ContentClassifier for SlowClassifier {
    async fn analyze(&self, _text: &str) -> Result<Vec<CategoryScore>> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}

// =============================================================================
// Telemetry / Audit
// =============================================================================

/// Telemetry sink that keeps everything it receives.
#[derive(Default)]
pub struct InMemoryTelemetrySink {
    validations: Mutex<Vec<ValidationTelemetry>>,
    violations: Mutex<Vec<GuardrailViolation>>,
}

impl InMemoryTelemetrySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validations(&self) -> Vec<ValidationTelemetry> {
        self.validations.lock().unwrap().clone()
    }

    pub fn violations(&self) -> Vec<GuardrailViolation> {
        self.violations.lock().unwrap().clone()
    }
}

impl TelemetrySink for InMemoryTelemetrySink {
    fn record_validation(&self, sample: &ValidationTelemetry) -> Result<()> {
        self.validations.lock().unwrap().push(sample.clone());
        Ok(())
    }

    fn record_violation(&self, violation: &GuardrailViolation) -> Result<()> {
        self.violations.lock().unwrap().push(violation.clone());
        Ok(())
    }
}

/// Telemetry sink whose every call fails.
pub struct FailingTelemetrySink;

impl TelemetrySink for FailingTelemetrySink {
    fn record_validation(&self, _sample: &ValidationTelemetry) -> Result<()> {
        Err(Error::telemetry("exporter down"))
    }

    fn record_violation(&self, _violation: &GuardrailViolation) -> Result<()> {
        Err(Error::telemetry("exporter down"))
    }
}

/// Telemetry sink whose every call panics.
pub struct PanickingTelemetrySink;

impl TelemetrySink for PanickingTelemetrySink {
    fn record_validation(&self, _sample: &ValidationTelemetry) -> Result<()> {
        panic!("exporter panicked")
    }

    fn record_violation(&self, _violation: &GuardrailViolation) -> Result<()> {
        panic!("exporter panicked")
    }
}

/// Audit sink whose every call fails.
pub struct FailingAuditSink;

#[async_trait]
impl AuditSink for FailingAuditSink {
    async fn record(&self, _audit: &GuardrailAudit) -> Result<()> {
        Err(Error::audit("audit store unreachable"))
    }
}

/// Audit sink whose every call panics.
pub struct PanickingAuditSink;

#[async_trait]
impl AuditSink for PanickingAuditSink {
    async fn record(&self, _audit: &GuardrailAudit) -> Result<()> {
        panic!("audit store panicked")
    }
}

// =============================================================================
// Template selection
// =============================================================================

/// Always picks the same template index (modulo the template count).
pub struct FixedTemplateSelector(pub usize);

impl TemplateSelector for FixedTemplateSelector {
    fn select(&self, len: usize) -> usize {
        self.0 % len.max(1)
    }
}
