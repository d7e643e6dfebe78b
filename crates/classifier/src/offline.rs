//! Fixed-score classifier for runs without a content-safety service.

use async_trait::async_trait;

use content_guard_core::{CategoryScore, ContentClassifier, Result};

/// Returns the same scores for every input.
#[derive(Debug, Clone)]
pub struct StaticContentClassifier {
    scores: Vec<CategoryScore>,
}

impl StaticContentClassifier {
    pub fn new(scores: Vec<CategoryScore>) -> Self {
        Self { scores }
    }

    /// Every listed category scored zero.
    pub fn clean(categories: &[String]) -> Self {
        Self::new(categories.iter().map(|c| CategoryScore::new(c.clone(), 0)).collect())
    }
}

#[async_trait]
impl ContentClassifier for StaticContentClassifier {
    async fn analyze(&self, _text: &str) -> Result<Vec<CategoryScore>> {
        Ok(self.scores.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clean_scores_zero() {
        let classifier = StaticContentClassifier::clean(&["Hate".into(), "Violence".into()]);
        let scores = classifier.analyze("anything").await.unwrap();
        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|s| s.severity == 0));
    }
}
