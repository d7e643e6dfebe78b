//! Lexical-overlap groundedness heuristic.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default minimum overlap for text to count as grounded.
pub const DEFAULT_GROUNDEDNESS_THRESHOLD: f64 = 0.30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundednessScore {
    /// Fraction of candidate tokens present in the sources, `0.0` for empty text.
    pub score: f64,
    pub is_grounded: bool,
    pub matched_tokens: usize,
    pub total_tokens: usize,
}

/// Scores how much of a text is supported by source documents.
#[derive(Debug, Clone, Copy)]
pub struct GroundednessScorer {
    threshold: f64,
}

impl GroundednessScorer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn score(&self, text: &str, sources: &[String]) -> GroundednessScore {
        let source_tokens: HashSet<String> = sources
            .iter()
            .flat_map(|doc| doc.split_whitespace())
            .map(str::to_lowercase)
            .collect();

        let mut total_tokens = 0usize;
        let mut matched_tokens = 0usize;
        for token in text.split_whitespace() {
            total_tokens += 1;
            if source_tokens.contains(&token.to_lowercase()) {
                matched_tokens += 1;
            }
        }

        let score = if total_tokens == 0 {
            0.0
        } else {
            matched_tokens as f64 / total_tokens as f64
        };

        GroundednessScore {
            score,
            is_grounded: score >= self.threshold,
            matched_tokens,
            total_tokens,
        }
    }
}

impl Default for GroundednessScorer {
    fn default() -> Self {
        Self::new(DEFAULT_GROUNDEDNESS_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fully_grounded() {
        let result = GroundednessScorer::default()
            .score("The House Has Three Bedrooms", &docs(&["the house has three bedrooms and a pool"]));
        assert_eq!(result.score, 1.0);
        assert!(result.is_grounded);
    }

    #[test]
    fn test_ungrounded() {
        let result = GroundednessScorer::default().score(
            "rooftop helipad with private beach access",
            &docs(&["two bedroom condo near downtown"]),
        );
        assert_eq!(result.matched_tokens, 0);
        assert!(!result.is_grounded);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 3 of 10 tokens overlap: exactly 0.30
        let text = "a b c x1 x2 x3 x4 x5 x6 x7";
        let result = GroundednessScorer::default().score(text, &docs(&["a", "b c"]));
        assert_eq!(result.total_tokens, 10);
        assert_eq!(result.matched_tokens, 3);
        assert!(result.is_grounded);
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let result = GroundednessScorer::default().score("   ", &docs(&["anything"]));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.total_tokens, 0);
        assert!(!result.is_grounded);
    }
}
