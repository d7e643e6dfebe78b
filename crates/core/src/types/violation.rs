use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::check::{CheckType, GuardrailCheck};
use super::context::{GuardrailContext, Industry};
use super::severity::Severity;

/// A single failed check, reported to telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailViolation {
    pub violation_type: CheckType,
    pub severity: Severity,
    pub validation_id: String,
    pub user_id: String,
    pub session_id: String,
    pub industry: Industry,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl GuardrailViolation {
    /// Derive a violation from a failed check.
    pub fn from_check(check: &GuardrailCheck, context: &GuardrailContext, validation_id: &str) -> Self {
        Self {
            violation_type: check.check_type,
            severity: check.severity,
            validation_id: validation_id.to_string(),
            user_id: context.user_id.clone(),
            session_id: context.session_id.clone(),
            industry: context.industry.clone(),
            details: check.details.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Options for `sanitize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizationOptions {
    /// Replace detected PII with the redaction marker.
    pub redact_pii: bool,
    /// Drop content the harm classifier still flags after redaction.
    pub remove_harmful_content: bool,
    /// When removing harmful content, substitute a placeholder instead of an empty string.
    pub preserve_structure: bool,
}

impl Default for SanitizationOptions {
    fn default() -> Self {
        Self {
            redact_pii: true,
            remove_harmful_content: true,
            preserve_structure: true,
        }
    }
}
