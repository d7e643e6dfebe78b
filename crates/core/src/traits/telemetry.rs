use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{GuardrailViolation, RecommendedAction, Severity};

/// Which entry point produced a validation sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    Output,
    Input,
}

impl ValidationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationKind::Output => "output",
            ValidationKind::Input => "input",
        }
    }
}

/// Numeric/categorical telemetry for one validation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationTelemetry {
    pub validation_id: String,
    pub kind: ValidationKind,
    pub action: RecommendedAction,
    pub max_severity: Severity,
    pub processing_time_ms: f64,
    pub check_count: usize,
    pub failed_check_count: usize,
}

/// Metrics backend. Errors are logged by the caller and never affect a result.
pub trait TelemetrySink: Send + Sync {
    fn record_validation(&self, sample: &ValidationTelemetry) -> Result<()>;

    fn record_violation(&self, violation: &GuardrailViolation) -> Result<()>;
}
