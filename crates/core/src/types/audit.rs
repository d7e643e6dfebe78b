use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;

use super::context::GuardrailContext;
use super::result::GuardrailResult;
use super::severity::{RecommendedAction, Severity};

/// Privacy-scrubbed record of one validation call.
///
/// Holds a SHA-256 of the content, never the content itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailAudit {
    pub user_id: String,
    pub session_id: String,
    /// Hex SHA-256 of the raw content (64 chars).
    pub content_hash: String,
    pub result: GuardrailResult,
    pub context: GuardrailContext,
    #[serde(rename = "processing_time_ms", with = "super::result::duration_ms")]
    pub processing_time: Duration,
    pub timestamp: DateTime<Utc>,
}

impl GuardrailAudit {
    /// Seal a result into an audit record.
    pub fn new(content: &str, context: &GuardrailContext, result: &GuardrailResult) -> Self {
        Self {
            user_id: context.user_id.clone(),
            session_id: context.session_id.clone(),
            content_hash: hash_content(content),
            result: result.clone(),
            context: context.clone(),
            processing_time: result.processing_time,
            timestamp: Utc::now(),
        }
    }

    /// Compact summary suitable for a single structured log line.
    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            validation_id: self.result.validation_id.clone(),
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            content_hash: self.content_hash.clone(),
            industry: self.context.industry.to_string(),
            action: self.result.recommended_action,
            max_severity: self.result.max_severity,
            check_count: self.result.checks.len(),
            failed_check_count: self.result.failed_check_count(),
            processing_time_ms: self.processing_time.as_millis() as u64,
            timestamp: self.timestamp,
        }
    }
}

/// Flat view of an audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub validation_id: String,
    pub user_id: String,
    pub session_id: String,
    pub content_hash: String,
    pub industry: String,
    pub action: RecommendedAction,
    pub max_severity: Severity,
    pub check_count: usize,
    pub failed_check_count: usize,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Hex-encoded SHA-256 of `content`.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckType, GuardrailCheck};

    #[test]
    fn test_hash_is_fixed_length_and_stable() {
        let a = hash_content("My SSN is 123-45-6789");
        let b = hash_content("My SSN is 123-45-6789");
        assert_eq!(a.len(), 64);
        assert_eq!(a, b);
        assert_ne!(a, hash_content("something else"));
    }

    #[test]
    fn test_audit_never_holds_raw_content() {
        let content = "call me at (555) 123-4567";
        let ctx = GuardrailContext::default().with_user("u1").with_session("s1");
        let result = GuardrailResult::from_checks(
            vec![GuardrailCheck::fail(CheckType::Pii, "1 phone", Severity::Medium, 0.9)],
            "call me at [REDACTED]",
        );
        let audit = GuardrailAudit::new(content, &ctx, &result);
        let json = serde_json::to_string(&audit.summary()).unwrap();
        assert!(!json.contains("(555) 123-4567"));
        assert_eq!(audit.summary().failed_check_count, 1);
        assert_eq!(audit.user_id, "u1");
    }
}
