use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use super::check::{CheckType, GuardrailCheck};
use super::severity::{RecommendedAction, Severity};

/// Apology returned when the pipeline itself could not reach a decision.
pub const GENERIC_FALLBACK_MESSAGE: &str =
    "I apologize, but I'm unable to provide a response right now. Please try again or contact our team for assistance.";

/// Aggregate outcome of one validation call.
///
/// `max_severity`, `recommended_action` and `is_allowed` are always derived
/// together by [`GuardrailResult::from_checks`] or [`GuardrailResult::fail_closed`];
/// there is no way to set them independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailResult {
    pub is_allowed: bool,
    pub recommended_action: RecommendedAction,
    pub checks: Vec<GuardrailCheck>,
    pub max_severity: Severity,
    #[serde(rename = "processing_time_ms", with = "duration_ms")]
    pub processing_time: Duration,
    pub validation_id: String,
    /// PII-redacted content, set regardless of the final action.
    pub processed_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_response: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl GuardrailResult {
    /// Aggregate a check list into a result with a fresh validation id.
    pub fn from_checks(checks: Vec<GuardrailCheck>, processed_content: impl Into<String>) -> Self {
        Self::with_validation_id(new_validation_id(), checks, processed_content)
    }

    /// Aggregate a check list under an existing validation id.
    pub fn with_validation_id(
        validation_id: impl Into<String>,
        checks: Vec<GuardrailCheck>,
        processed_content: impl Into<String>,
    ) -> Self {
        let max_severity = Severity::max_of(checks.iter().map(|c| c.severity));
        let recommended_action = RecommendedAction::from_severity(max_severity);
        Self {
            is_allowed: recommended_action.is_allowed(),
            recommended_action,
            checks,
            max_severity,
            processing_time: Duration::ZERO,
            validation_id: validation_id.into(),
            processed_content: processed_content.into(),
            fallback_response: None,
            metadata: HashMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Whole-call fail-closed result used when the pipeline cannot decide.
    ///
    /// Carries a single failed [`CheckType::Pipeline`] check so the reported
    /// severity still matches the check list.
    pub fn fail_closed(validation_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let mut metadata = HashMap::new();
        metadata.insert("error".to_string(), serde_json::Value::String(reason.clone()));
        Self {
            is_allowed: false,
            recommended_action: RecommendedAction::Block,
            checks: vec![GuardrailCheck::fail(CheckType::Pipeline, reason, Severity::Critical, 0.0)],
            max_severity: Severity::Critical,
            processing_time: Duration::ZERO,
            validation_id: validation_id.into(),
            processed_content: String::new(),
            fallback_response: Some(GENERIC_FALLBACK_MESSAGE.to_string()),
            metadata,
            timestamp: Utc::now(),
        }
    }

    pub fn with_processing_time(mut self, elapsed: Duration) -> Self {
        self.processing_time = elapsed;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &GuardrailCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn failed_check_count(&self) -> usize {
        self.failed_checks().count()
    }

    /// First check of the given type, if it ran.
    pub fn check(&self, check_type: CheckType) -> Option<&GuardrailCheck> {
        self.checks.iter().find(|c| c.check_type == check_type)
    }
}

/// Mint a unique validation id.
pub fn new_validation_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
