//! PII detection and redaction.
//!
//! Rules run in a fixed order against a working copy of the text. Each rule
//! sees the output of the previous ones, so a value that two rules could
//! match is detected and redacted only by the first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use content_guard_core::config::PiiDetailMode;

/// Kind of personal data a rule detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiKind {
    GovernmentId,
    PaymentCard,
    Email,
    Phone,
    StreetAddress,
}

impl PiiKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PiiKind::GovernmentId => "government_id",
            PiiKind::PaymentCard => "payment_card",
            PiiKind::Email => "email",
            PiiKind::Phone => "phone",
            PiiKind::StreetAddress => "street_address",
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Order is part of the contract.
static PII_RULES: Lazy<Vec<(PiiKind, Regex)>> = Lazy::new(|| {
    [
        (PiiKind::GovernmentId, r"\b\d{3}-\d{2}-\d{4}\b"),
        (PiiKind::PaymentCard, r"\b\d{4}[- ]?\d{4}[- ]?\d{4}[- ]?\d{4}\b"),
        (PiiKind::Email, r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
        (PiiKind::Phone, r"\(\d{3}\)\s*\d{3}-\d{4}\b"),
        (
            PiiKind::StreetAddress,
            r"(?i)\b\d{1,5}\s+(?:[a-z]+\s+){1,3}(?:street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|way)\b",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        (
            kind,
            Regex::new(pattern).expect("built-in PII pattern must compile"),
        )
    })
    .collect()
});

/// A matched literal and the rule that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiEntity {
    pub kind: PiiKind,
    /// The raw matched text. Keep this in-process; check details omit it by default.
    pub value: String,
}

/// Outcome of a PII scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiScan {
    pub contains_pii: bool,
    pub redacted_content: String,
    pub detected_entities: Vec<PiiEntity>,
}

impl PiiScan {
    /// Diagnostic text for the check record.
    pub fn describe(&self, mode: PiiDetailMode) -> String {
        if !self.contains_pii {
            return "No PII detected".to_string();
        }
        match mode {
            PiiDetailMode::TypesOnly => {
                let mut counts: BTreeMap<PiiKind, usize> = BTreeMap::new();
                for entity in &self.detected_entities {
                    *counts.entry(entity.kind).or_default() += 1;
                }
                let parts: Vec<String> = counts
                    .iter()
                    .map(|(kind, n)| format!("{} x{}", kind, n))
                    .collect();
                format!(
                    "Detected {} PII entities: {}",
                    self.detected_entities.len(),
                    parts.join(", ")
                )
            }
            PiiDetailMode::RawValues => {
                let values: Vec<&str> = self
                    .detected_entities
                    .iter()
                    .map(|e| e.value.as_str())
                    .collect();
                format!("Detected PII: {}", values.join(", "))
            }
        }
    }
}

/// Ordered-rule PII detector.
#[derive(Debug, Clone)]
pub struct PiiDetector {
    marker: String,
}

impl PiiDetector {
    /// Detector using `[REDACTED]` as the marker.
    pub fn new() -> Self {
        Self::with_marker("[REDACTED]")
    }

    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn scan(&self, text: &str) -> PiiScan {
        let mut working = text.to_string();
        let mut detected_entities = Vec::new();

        for (kind, re) in PII_RULES.iter() {
            let found: Vec<String> = re
                .find_iter(&working)
                .map(|m| m.as_str().to_string())
                .collect();
            for value in found {
                // Every occurrence of the literal goes, not just this match.
                working = working.replace(&value, &self.marker);
                detected_entities.push(PiiEntity { kind: *kind, value });
            }
        }

        PiiScan {
            contains_pii: !detected_entities.is_empty(),
            redacted_content: working,
            detected_entities,
        }
    }
}

impl Default for PiiDetector {
    fn default() -> Self {
        Self::new()
    }
}
