//! Industry-specific compliance rules.
//!
//! The rulebook is built once (built-ins, optionally merged with a YAML
//! file) and is read-only afterwards, so a single instance can be shared by
//! any number of concurrent validations.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use content_guard_core::{Error, Industry, Result};

/// A rule as written in a rulebook file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRuleSpec {
    pub id: String,
    pub pattern: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A versioned rulebook document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulebookFile {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub industries: HashMap<Industry, Vec<ComplianceRuleSpec>>,
}

/// Compiled, case-insensitive compliance rule.
#[derive(Debug, Clone)]
pub struct ComplianceRule {
    pub id: String,
    pub description: String,
    regex: Regex,
}

impl ComplianceRule {
    pub fn new(id: impl Into<String>, pattern: &str, description: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::config(format!("Invalid pattern for rule '{}': {}", id, e)))?;
        Ok(Self {
            id,
            description: description.into(),
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

const BUILTIN_RULES: &[(Industry, &str, &str, &str)] = &[
    // Fair housing
    (Industry::RealEstate, "re_familial_status", r"\bno\s+(kids|children|families)\b", "Familial status discrimination"),
    (Industry::RealEstate, "re_adults_only", r"\b(adults|singles|couples)\s+only\b", "Familial status discrimination"),
    (Industry::RealEstate, "re_religion", r"\b(christian|jewish|muslim|catholic|hindu)\s+(neighborhood|community|families|buyers|tenants)\s+(only|preferred)\b", "Religious preference"),
    (Industry::RealEstate, "re_race", r"\b(white|black|asian|hispanic|latino)\s+(only|preferred)\b", "Racial preference"),
    (Industry::RealEstate, "re_disability", r"\b(no\s+wheelchairs|not\s+suitable\s+for\s+(the\s+)?disabled|must\s+be\s+able[- ]bodied)\b", "Disability discrimination"),
    (Industry::RealEstate, "re_exclusive_neighborhood", r"\bexclusive\s+neighborhood\b", "Steering language"),
    // Investment promotion
    (Industry::Finance, "fin_guaranteed_returns", r"\bguaranteed\s+(returns?|profits?|income|gains)\b", "Guaranteed returns claim"),
    (Industry::Finance, "fin_risk_free", r"\brisk[- ]free\s+(investment|returns?|profits?)\b", "Risk-free claim"),
    (Industry::Finance, "fin_cant_lose", r"\b(can'?t|cannot)\s+lose\b", "No-loss claim"),
    (Industry::Finance, "fin_double_money", r"\bdouble\s+your\s+money\b", "Unrealistic return claim"),
    // Medical claims
    (Industry::Healthcare, "hc_miracle_cure", r"\bmiracle\s+(cure|treatment|drug)\b", "Miracle cure claim"),
    (Industry::Healthcare, "hc_cures_disease", r"\bcures?\s+(cancer|diabetes|covid|alzheimer'?s|all\s+diseases)\b", "Disease cure claim"),
    (Industry::Healthcare, "hc_fully_effective", r"\b100%\s+effective\b", "Absolute efficacy claim"),
    (Industry::Healthcare, "hc_no_side_effects", r"\bno\s+side\s+effects\b", "Safety overstatement"),
    (Industry::Healthcare, "hc_stop_medication", r"\bstop\s+taking\s+your\s+medication\b", "Unsafe medical instruction"),
    // Insurance
    (Industry::Insurance, "ins_guaranteed_approval", r"\bguaranteed\s+(approval|acceptance|coverage)\b", "Guaranteed approval claim"),
    (Industry::Insurance, "ins_covers_everything", r"\bcovers?\s+everything\b", "Coverage overstatement"),
    // Legal
    (Industry::Legal, "legal_guaranteed_outcome", r"\bguaranteed?\s+(win|victory|outcome|verdict|settlement)\b", "Guaranteed outcome claim"),
    (Industry::Legal, "legal_never_lose", r"\bwe\s+never\s+lose\b", "Outcome overstatement"),
];

/// Per-industry rule table.
#[derive(Debug, Clone, Default)]
pub struct IndustryRulebook {
    rules: HashMap<Industry, Vec<ComplianceRule>>,
}

impl IndustryRulebook {
    /// Empty rulebook: every industry passes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rule table.
    pub fn builtin() -> Self {
        let mut book = Self::empty();
        for (industry, id, pattern, description) in BUILTIN_RULES {
            match ComplianceRule::new(*id, pattern, *description) {
                Ok(rule) => book.rules.entry(industry.clone()).or_default().push(rule),
                // Built-in patterns are covered by tests; skip rather than panic.
                Err(e) => tracing::error!(error = %e, "Skipping built-in compliance rule"),
            }
        }
        book
    }

    /// Load a rulebook from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read rulebook {:?}: {}", path, e)))?;
        let file: RulebookFile = serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse rulebook YAML: {}", e)))?;
        tracing::info!(name = %file.name, version = %file.version, "Loaded compliance rulebook");
        Self::from_file(file)
    }

    pub fn from_file(file: RulebookFile) -> Result<Self> {
        let mut book = Self::empty();
        for (industry, specs) in file.industries {
            let compiled = specs
                .into_iter()
                .map(|spec| {
                    let description = spec.description.unwrap_or_else(|| spec.id.clone());
                    ComplianceRule::new(spec.id, &spec.pattern, description)
                })
                .collect::<Result<Vec<_>>>()?;
            book.rules.insert(industry, compiled);
        }
        Ok(book)
    }

    /// Merge another rulebook into this one (other wins on id conflict).
    pub fn merge(&mut self, other: IndustryRulebook) {
        for (industry, rules) in other.rules {
            let existing = self.rules.entry(industry).or_default();
            for rule in rules {
                if let Some(slot) = existing.iter_mut().find(|r| r.id == rule.id) {
                    *slot = rule;
                } else {
                    existing.push(rule);
                }
            }
        }
    }

    pub fn rules_for(&self, industry: &Industry) -> Option<&[ComplianceRule]> {
        self.rules.get(industry).map(Vec::as_slice)
    }
}

/// Result of checking text against one industry's rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub industry: Industry,
    /// Whether the industry has a registered rule set at all.
    pub has_rule_set: bool,
    /// Ids of the rules that matched.
    pub violations: Vec<String>,
    /// Descriptions of the matched rules, parallel to `violations`.
    pub descriptions: Vec<String>,
}

impl ComplianceReport {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks text against the rulebook entry for a context's industry.
#[derive(Debug, Clone)]
pub struct IndustryComplianceChecker {
    rulebook: IndustryRulebook,
}

impl IndustryComplianceChecker {
    pub fn new(rulebook: IndustryRulebook) -> Self {
        Self { rulebook }
    }

    pub fn check(&self, text: &str, industry: &Industry) -> ComplianceReport {
        let Some(rules) = self.rulebook.rules_for(industry) else {
            return ComplianceReport {
                industry: industry.clone(),
                has_rule_set: false,
                violations: Vec::new(),
                descriptions: Vec::new(),
            };
        };

        let (violations, descriptions) = rules
            .iter()
            .filter(|rule| rule.is_match(text))
            .map(|rule| (rule.id.clone(), rule.description.clone()))
            .unzip();

        ComplianceReport {
            industry: industry.clone(),
            has_rule_set: true,
            violations,
            descriptions,
        }
    }
}

impl Default for IndustryComplianceChecker {
    fn default() -> Self {
        Self::new(IndustryRulebook::builtin())
    }
}
