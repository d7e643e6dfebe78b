use serde::{Deserialize, Serialize};
use std::fmt;

use super::severity::Severity;

/// Tag identifying which detector produced a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    HarmCategories,
    PromptInjection,
    Pii,
    Groundedness,
    IndustryCompliance,
    BusinessLogic,
    /// Synthetic check standing in for a pipeline that could not decide.
    Pipeline,
}

impl CheckType {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckType::HarmCategories => "harm_categories",
            CheckType::PromptInjection => "prompt_injection",
            CheckType::Pii => "pii",
            CheckType::Groundedness => "groundedness",
            CheckType::IndustryCompliance => "industry_compliance",
            CheckType::BusinessLogic => "business_logic",
            CheckType::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detector's outcome. Built once per detector invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailCheck {
    pub check_type: CheckType,
    pub passed: bool,
    /// Human-readable diagnostic. Never contains raw PII unless explicitly configured.
    pub details: String,
    pub severity: Severity,
    /// Detector confidence in `[0.0, 1.0]`.
    pub confidence_score: f64,
    /// Redacted copy of the content; only the PII check populates this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redacted_content: Option<String>,
}

impl GuardrailCheck {
    /// A passing check with `Severity::None`.
    pub fn pass(check_type: CheckType, details: impl Into<String>, confidence_score: f64) -> Self {
        Self {
            check_type,
            passed: true,
            details: details.into(),
            severity: Severity::None,
            confidence_score: confidence_score.clamp(0.0, 1.0),
            redacted_content: None,
        }
    }

    /// A failing check at the given severity.
    pub fn fail(
        check_type: CheckType,
        details: impl Into<String>,
        severity: Severity,
        confidence_score: f64,
    ) -> Self {
        Self {
            check_type,
            passed: false,
            details: details.into(),
            severity,
            confidence_score: confidence_score.clamp(0.0, 1.0),
            redacted_content: None,
        }
    }

    pub fn with_redacted_content(mut self, content: impl Into<String>) -> Self {
        self.redacted_content = Some(content.into());
        self
    }
}
