//! Metrics implementation using Prometheus.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use content_guard_core::{
    Error, GuardrailViolation, Result, TelemetrySink, ValidationTelemetry,
};

/// Initialize Prometheus recorder and return the handle.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .map_err(|e| Error::telemetry(format!("Failed to install Prometheus recorder: {}", e)))?;

    tracing::info!("Prometheus metrics recorder initialized");
    Ok(handle)
}

/// Telemetry sink backed by the `metrics` facade.
///
/// Without an installed recorder every call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsTelemetrySink;

impl TelemetrySink for MetricsTelemetrySink {
    fn record_validation(&self, sample: &ValidationTelemetry) -> Result<()> {
        track_validation(sample);
        Ok(())
    }

    fn record_violation(&self, violation: &GuardrailViolation) -> Result<()> {
        track_violation(violation);
        Ok(())
    }
}

/// Helper to track per-call validation metrics.
pub fn track_validation(sample: &ValidationTelemetry) {
    metrics::counter!(
        "guardrail_validations_total",
        "kind" => sample.kind.as_str(),
        "action" => sample.action.as_str()
    )
    .increment(1);

    metrics::histogram!("guardrail_processing_time_ms", "kind" => sample.kind.as_str())
        .record(sample.processing_time_ms);
    metrics::histogram!("guardrail_check_count").record(sample.check_count as f64);
    metrics::histogram!("guardrail_failed_check_count").record(sample.failed_check_count as f64);
    metrics::histogram!("guardrail_severity_level").record(f64::from(sample.max_severity.level()));
}

/// Helper to track a single violation.
pub fn track_violation(violation: &GuardrailViolation) {
    metrics::counter!(
        "guardrail_violations_total",
        "violation_type" => violation.violation_type.as_str(),
        "severity" => violation.severity.to_string()
    )
    .increment(1);
}

/// Report a violation to telemetry. Persisting violations is left to the audit sink.
pub fn log_violation(telemetry: &dyn TelemetrySink, violation: &GuardrailViolation) {
    tracing::warn!(
        validation_id = %violation.validation_id,
        violation_type = %violation.violation_type,
        severity = %violation.severity,
        industry = %violation.industry,
        "Guardrail violation"
    );
    if let Err(e) = telemetry.record_violation(violation) {
        tracing::warn!(error = %e, "Failed to emit violation telemetry");
    }
}
