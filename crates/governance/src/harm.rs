//! Harm-category analysis backed by the external content classifier.
//!
//! The analyzer never lets a classifier problem turn into a pass: errors and
//! timeouts produce a `Critical` analysis with `classifier_failed` set.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use content_guard_core::{CategoryScore, ContentClassifier, Error, Result, Severity};

/// One category the classifier scored above zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedCategory {
    pub category: String,
    pub raw_severity: u32,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmAnalysis {
    pub has_violations: bool,
    pub max_severity: Severity,
    pub detected_categories: Vec<DetectedCategory>,
    pub details: String,
    /// Set when the classifier errored or timed out.
    pub classifier_failed: bool,
}

impl HarmAnalysis {
    fn from_scores(scores: &[CategoryScore]) -> Self {
        let detected_categories: Vec<DetectedCategory> = scores
            .iter()
            .filter(|s| s.severity > 0)
            .map(|s| DetectedCategory {
                category: s.category.clone(),
                raw_severity: s.severity,
                severity: Severity::from_classifier_score(s.severity),
            })
            .collect();

        let max_severity = Severity::max_of(detected_categories.iter().map(|c| c.severity));
        let details = if detected_categories.is_empty() {
            "No harmful content detected".to_string()
        } else {
            let parts: Vec<String> = detected_categories
                .iter()
                .map(|c| format!("{} (severity {})", c.category, c.raw_severity))
                .collect();
            format!("Harmful content detected: {}", parts.join(", "))
        };

        Self {
            has_violations: !detected_categories.is_empty(),
            max_severity,
            detected_categories,
            details,
            classifier_failed: false,
        }
    }

    fn failed(err: &Error) -> Self {
        Self {
            has_violations: true,
            max_severity: Severity::Critical,
            detected_categories: Vec::new(),
            details: format!("Content safety classifier unavailable: {}; failing closed", err),
            classifier_failed: true,
        }
    }
}

/// Timeout-bounded wrapper around a [`ContentClassifier`].
#[derive(Clone)]
pub struct HarmCategoryAnalyzer {
    classifier: Arc<dyn ContentClassifier>,
    timeout: Duration,
}

impl HarmCategoryAnalyzer {
    pub fn new(classifier: Arc<dyn ContentClassifier>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
        }
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Raw per-category scores, bounded by the configured timeout.
    pub async fn classify(&self, text: &str) -> Result<Vec<CategoryScore>> {
        match tokio::time::timeout(self.timeout, self.classifier.analyze(text)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "{} classifier did not answer within {}ms",
                self.classifier.name(),
                self.timeout.as_millis()
            ))),
        }
    }

    pub async fn analyze(&self, text: &str) -> HarmAnalysis {
        match self.classify(text).await {
            Ok(scores) => HarmAnalysis::from_scores(&scores),
            Err(e) => {
                tracing::warn!(
                    classifier = self.classifier.name(),
                    error = %e,
                    "Harm classification failed; failing closed"
                );
                HarmAnalysis::failed(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_guard_core::mocks::{FailingClassifier, MockClassifier, SlowClassifier};

    fn analyzer(classifier: impl ContentClassifier + 'static) -> HarmCategoryAnalyzer {
        HarmCategoryAnalyzer::new(Arc::new(classifier), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_clean_scores() {
        let analysis = analyzer(MockClassifier::clean()).analyze("hello").await;
        assert!(!analysis.has_violations);
        assert_eq!(analysis.max_severity, Severity::None);
        assert!(!analysis.classifier_failed);
    }

    #[tokio::test]
    async fn test_scores_map_to_severity() {
        let analysis = analyzer(MockClassifier::new(vec![
            CategoryScore::new("Hate", 0),
            CategoryScore::new("Violence", 2),
            CategoryScore::new("Sexual", 6),
        ]))
        .analyze("text")
        .await;

        assert!(analysis.has_violations);
        assert_eq!(analysis.detected_categories.len(), 2);
        assert_eq!(analysis.detected_categories[0].severity, Severity::Medium);
        assert_eq!(analysis.detected_categories[1].severity, Severity::Critical);
        assert_eq!(analysis.max_severity, Severity::Critical);
        assert!(analysis.details.contains("Violence (severity 2)"));
    }

    #[tokio::test]
    async fn test_classifier_error_fails_closed() {
        let analysis = analyzer(FailingClassifier).analyze("text").await;
        assert!(analysis.classifier_failed);
        assert!(analysis.has_violations);
        assert_eq!(analysis.max_severity, Severity::Critical);
        assert!(analysis.details.contains("failing closed"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_closed() {
        let analyzer = HarmCategoryAnalyzer::new(
            Arc::new(SlowClassifier::new(Duration::from_secs(30))),
            Duration::from_millis(50),
        );
        assert!(matches!(analyzer.classify("text").await, Err(Error::Timeout(_))));

        let analysis = analyzer.analyze("text").await;
        assert!(analysis.classifier_failed);
        assert_eq!(analysis.max_severity, Severity::Critical);
    }
}
