//! Audit emission for validation calls.
//!
//! The recorder seals a result into a [`GuardrailAudit`], hands it to an
//! [`AuditSink`], and emits per-call telemetry. Everything here is
//! best-effort: failures are logged and swallowed.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use content_guard_core::{
    AuditSink, GuardrailAudit, GuardrailContext, GuardrailResult, RecommendedAction, Result,
    TelemetrySink, ValidationKind, ValidationTelemetry,
};

/// Builds and emits the audit record and telemetry for one call.
#[derive(Clone)]
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl AuditRecorder {
    pub fn new(sink: Arc<dyn AuditSink>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self { sink, telemetry }
    }

    pub async fn record(
        &self,
        content: &str,
        context: &GuardrailContext,
        result: &GuardrailResult,
        kind: ValidationKind,
    ) -> GuardrailAudit {
        let audit = GuardrailAudit::new(content, context, result);

        if let Err(e) = self.sink.record(&audit).await {
            tracing::warn!(
                validation_id = %result.validation_id,
                error = %e,
                "Failed to record audit entry"
            );
        }

        let sample = ValidationTelemetry {
            validation_id: result.validation_id.clone(),
            kind,
            action: result.recommended_action,
            max_severity: result.max_severity,
            processing_time_ms: result.processing_time.as_secs_f64() * 1000.0,
            check_count: result.checks.len(),
            failed_check_count: result.failed_check_count(),
        };
        if let Err(e) = self.telemetry.record_validation(&sample) {
            tracing::warn!(
                validation_id = %result.validation_id,
                error = %e,
                "Failed to emit validation telemetry"
            );
        }

        audit
    }
}

/// Sink that writes the audit summary as one structured log line.
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, audit: &GuardrailAudit) -> Result<()> {
        let summary = serde_json::to_string(&audit.summary())?;
        tracing::info!(
            target: "content_guard::audit",
            validation_id = %audit.result.validation_id,
            content_hash = %audit.content_hash,
            action = %audit.result.recommended_action,
            summary = %summary,
            "Guardrail audit"
        );
        Ok(())
    }
}

/// Filter for querying recorded audits.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub action: Option<RecommendedAction>,
    pub limit: Option<usize>,
}

/// In-memory audit sink for tests and local runs.
#[derive(Default)]
pub struct InMemoryAuditSink {
    entries: Mutex<Vec<GuardrailAudit>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn query(&self, filter: &AuditFilter) -> Vec<GuardrailAudit> {
        let entries = self.lock();
        let mut result: Vec<GuardrailAudit> = entries
            .iter()
            .filter(|e| {
                filter.user_id.as_ref().map_or(true, |u| &e.user_id == u)
                    && filter.session_id.as_ref().map_or(true, |s| &e.session_id == s)
                    && filter.action.map_or(true, |a| e.result.recommended_action == a)
            })
            .cloned()
            .collect();

        if let Some(limit) = filter.limit {
            result.truncate(limit);
        }

        result
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<GuardrailAudit>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn record(&self, audit: &GuardrailAudit) -> Result<()> {
        self.lock().push(audit.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_guard_core::mocks::{FailingAuditSink, FailingTelemetrySink, InMemoryTelemetrySink};
    use content_guard_core::{hash_content, CheckType, GuardrailCheck, Severity};

    fn result() -> GuardrailResult {
        GuardrailResult::from_checks(
            vec![
                GuardrailCheck::pass(CheckType::HarmCategories, "ok", 1.0),
                GuardrailCheck::fail(CheckType::Pii, "Detected 1 PII entities", Severity::Medium, 0.9),
            ],
            "call [REDACTED]",
        )
    }

    fn ctx(user: &str, session: &str) -> GuardrailContext {
        GuardrailContext::new("real_estate").with_user(user).with_session(session)
    }

    #[tokio::test]
    async fn test_record_hashes_content_and_emits_telemetry() {
        let sink = Arc::new(InMemoryAuditSink::new());
        let telemetry = Arc::new(InMemoryTelemetrySink::new());
        let recorder = AuditRecorder::new(sink.clone(), telemetry.clone());

        let audit = recorder
            .record("call (555) 123-4567", &ctx("u1", "s1"), &result(), ValidationKind::Output)
            .await;

        assert_eq!(audit.content_hash, hash_content("call (555) 123-4567"));
        assert_eq!(audit.content_hash.len(), 64);
        assert_eq!(sink.len(), 1);

        let samples = telemetry.validations();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].check_count, 2);
        assert_eq!(samples[0].failed_check_count, 1);
        assert_eq!(samples[0].action, RecommendedAction::Redact);
        assert_eq!(samples[0].kind, ValidationKind::Output);
    }

    #[tokio::test]
    async fn test_failing_sinks_are_swallowed() {
        let recorder = AuditRecorder::new(Arc::new(FailingAuditSink), Arc::new(FailingTelemetrySink));
        let audit = recorder
            .record("text", &ctx("u1", "s1"), &result(), ValidationKind::Input)
            .await;
        assert_eq!(audit.user_id, "u1");
    }

    #[tokio::test]
    async fn test_tracing_sink_accepts_records() {
        let audit = GuardrailAudit::new("text", &ctx("u1", "s1"), &result());
        assert!(TracingAuditSink.record(&audit).await.is_ok());
    }

    #[tokio::test]
    async fn test_query_filters() {
        let sink = InMemoryAuditSink::new();
        for (user, session) in [("alice", "s1"), ("alice", "s2"), ("bob", "s3")] {
            sink.record(&GuardrailAudit::new("x", &ctx(user, session), &result()))
                .await
                .unwrap();
        }

        let alice = sink.query(&AuditFilter {
            user_id: Some("alice".into()),
            ..Default::default()
        });
        assert_eq!(alice.len(), 2);

        let s3 = sink.query(&AuditFilter {
            session_id: Some("s3".into()),
            ..Default::default()
        });
        assert_eq!(s3.len(), 1);
        assert_eq!(s3[0].user_id, "bob");

        let blocked = sink.query(&AuditFilter {
            action: Some(RecommendedAction::Block),
            ..Default::default()
        });
        assert!(blocked.is_empty());

        let limited = sink.query(&AuditFilter {
            limit: Some(1),
            ..Default::default()
        });
        assert_eq!(limited.len(), 1);
    }
}
