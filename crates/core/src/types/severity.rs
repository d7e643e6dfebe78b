use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Severity / Action model
// =============================================================================

/// Ordered risk level shared by every detector.
///
/// The discriminants are part of the telemetry contract: dashboards read the
/// `guardrail_severity_level` metric as `None=0 … Critical=4`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Severity {
    #[default]
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Severity {
    /// Numeric ordinal used for metrics.
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Map a raw classifier score into the shared scale, capping at `Critical`.
    pub fn from_classifier_score(score: u32) -> Self {
        match score {
            0 => Severity::None,
            1 => Severity::Low,
            2 => Severity::Medium,
            3 => Severity::High,
            _ => Severity::Critical,
        }
    }

    /// Highest severity in an iterator, `None` when empty.
    pub fn max_of(iter: impl IntoIterator<Item = Severity>) -> Severity {
        iter.into_iter().max().unwrap_or_default()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(s)
    }
}

/// The pipeline's decision for a piece of content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[default]
    Allow,
    Flag,
    Redact,
    Block,
}

impl RecommendedAction {
    /// Total mapping from the maximum observed severity to an action.
    ///
    /// Only the orchestrator calls this, with the maximum over the full check
    /// list; individual detectors report severities, never actions.
    pub fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::Critical | Severity::High => RecommendedAction::Block,
            Severity::Medium => RecommendedAction::Redact,
            Severity::Low => RecommendedAction::Flag,
            Severity::None => RecommendedAction::Allow,
        }
    }

    /// Whether content with this action may be delivered.
    pub fn is_allowed(self) -> bool {
        matches!(self, RecommendedAction::Allow | RecommendedAction::Flag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendedAction::Allow => "allow",
            RecommendedAction::Flag => "flag",
            RecommendedAction::Redact => "redact",
            RecommendedAction::Block => "block",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse strictness level for `is_content_safe`.
///
/// The naming is inverted relative to the numeric threshold: `Low` strictness
/// tolerates the highest classifier scores (6), `Strict` tolerates none (0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Low,
    #[default]
    Medium,
    High,
    Strict,
}

impl SafetyLevel {
    /// Maximum classifier score (inclusive) a category may have to count as safe.
    pub fn threshold(self) -> u32 {
        match self {
            SafetyLevel::Low => 6,
            SafetyLevel::Medium => 4,
            SafetyLevel::High => 2,
            SafetyLevel::Strict => 0,
        }
    }
}

impl std::str::FromStr for SafetyLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SafetyLevel::Low),
            "medium" => Ok(SafetyLevel::Medium),
            "high" => Ok(SafetyLevel::High),
            "strict" => Ok(SafetyLevel::Strict),
            other => Err(format!("unknown safety level: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_mapping_is_total() {
        assert_eq!(RecommendedAction::from_severity(Severity::None), RecommendedAction::Allow);
        assert_eq!(RecommendedAction::from_severity(Severity::Low), RecommendedAction::Flag);
        assert_eq!(RecommendedAction::from_severity(Severity::Medium), RecommendedAction::Redact);
        assert_eq!(RecommendedAction::from_severity(Severity::High), RecommendedAction::Block);
        assert_eq!(RecommendedAction::from_severity(Severity::Critical), RecommendedAction::Block);
    }

    #[test]
    fn test_is_allowed() {
        assert!(RecommendedAction::Allow.is_allowed());
        assert!(RecommendedAction::Flag.is_allowed());
        assert!(!RecommendedAction::Redact.is_allowed());
        assert!(!RecommendedAction::Block.is_allowed());
    }

    #[test]
    fn test_severity_ordinals() {
        assert_eq!(Severity::None.level(), 0);
        assert_eq!(Severity::Low.level(), 1);
        assert_eq!(Severity::Medium.level(), 2);
        assert_eq!(Severity::High.level(), 3);
        assert_eq!(Severity::Critical.level(), 4);
        assert!(Severity::None < Severity::Low && Severity::High < Severity::Critical);
    }

    #[test]
    fn test_classifier_score_clamps_to_critical() {
        assert_eq!(Severity::from_classifier_score(0), Severity::None);
        assert_eq!(Severity::from_classifier_score(2), Severity::Medium);
        assert_eq!(Severity::from_classifier_score(4), Severity::Critical);
        assert_eq!(Severity::from_classifier_score(7), Severity::Critical);
    }

    #[test]
    fn test_max_of_empty_is_none() {
        assert_eq!(Severity::max_of(Vec::new()), Severity::None);
        assert_eq!(
            Severity::max_of([Severity::Low, Severity::High, Severity::Medium]),
            Severity::High
        );
    }

    #[test]
    fn test_safety_level_thresholds_are_inverted() {
        // "Low" strictness is the most permissive.
        assert_eq!(SafetyLevel::Low.threshold(), 6);
        assert_eq!(SafetyLevel::Medium.threshold(), 4);
        assert_eq!(SafetyLevel::High.threshold(), 2);
        assert_eq!(SafetyLevel::Strict.threshold(), 0);
        assert_eq!(SafetyLevel::default(), SafetyLevel::Medium);
        assert_eq!("STRICT".parse::<SafetyLevel>(), Ok(SafetyLevel::Strict));
    }
}
