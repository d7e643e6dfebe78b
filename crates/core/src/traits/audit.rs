use async_trait::async_trait;

use crate::error::Result;
use crate::types::GuardrailAudit;

/// Destination for sealed audit records.
///
/// Durable, append-only storage lives outside this workspace; the pipeline
/// treats any `Err` as best-effort and only logs it.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, audit: &GuardrailAudit) -> Result<()>;
}

/// Sink that drops every record.
pub struct NoOpAuditSink;

#[async_trait]
impl AuditSink for NoOpAuditSink {
    async fn record(&self, _audit: &GuardrailAudit) -> Result<()> {
        Ok(())
    }
}
