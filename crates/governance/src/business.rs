//! Business-logic checks: promissory language and unprofessional tone.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static GUARANTEE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(guarantee[ds]?|promise[ds]?)\b(\s+\w+){0,3}\s+(success|profits?|results|returns|sale|approval|appreciation)\b",
        r"(?i)\b100%\s+(guaranteed|success|certain)\b",
        r"(?i)\bwill\s+definitely\s+(sell|succeed|profit|win|appreciate)\b",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("built-in guarantee pattern must compile"))
    .collect()
});

static UNPROFESSIONAL_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(lol|omg|wtf|whatever|dude|sucks|stupid|dumb|crap)\b")
        .expect("built-in tone pattern must compile")
});

static EXCESSIVE_EXCLAMATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!{3,}").expect("built-in tone pattern must compile"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessReport {
    pub has_guarantee_language: bool,
    pub has_unprofessional_tone: bool,
    /// Offending fragments, in text order per rule.
    pub findings: Vec<String>,
}

impl BusinessReport {
    pub fn is_violation(&self) -> bool {
        self.has_guarantee_language || self.has_unprofessional_tone
    }

    pub fn describe(&self) -> String {
        if !self.is_violation() {
            return "Business logic checks passed".to_string();
        }
        let mut reasons = Vec::new();
        if self.has_guarantee_language {
            reasons.push("promissory or guarantee language");
        }
        if self.has_unprofessional_tone {
            reasons.push("unprofessional tone");
        }
        format!("Business logic violation: {}", reasons.join(" and "))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessLogicChecker;

impl BusinessLogicChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, text: &str) -> BusinessReport {
        let mut findings: Vec<String> = GUARANTEE_PATTERNS
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
            .collect();
        let has_guarantee_language = !findings.is_empty();

        let tone_start = findings.len();
        findings.extend(
            UNPROFESSIONAL_WORDS
                .find_iter(text)
                .chain(EXCESSIVE_EXCLAMATION.find_iter(text))
                .map(|m| m.as_str().to_string()),
        );
        let has_unprofessional_tone = findings.len() > tone_start;

        BusinessReport {
            has_guarantee_language,
            has_unprofessional_tone,
            findings,
        }
    }
}
