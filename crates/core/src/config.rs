use config::{Config, Environment, File};
use secrecy::Secret;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GuardrailsConfig {
    pub classifier: ClassifierConfig,
    pub pipeline: PipelineConfig,
    pub fallback: FallbackConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Base URL of the content-safety service. `None` means offline.
    pub endpoint: Option<String>,
    pub api_key: Option<Secret<String>>,
    pub api_version: String,
    /// Upper bound on a single classifier call.
    pub timeout_ms: u64,
    pub categories: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_version: "2023-10-01".into(),
            timeout_ms: 5000,
            categories: crate::types::DEFAULT_HARM_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// How much of a PII match the check details may reveal.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PiiDetailMode {
    /// Entity types and counts only.
    #[default]
    TypesOnly,
    /// The matched literals themselves, for manual review setups.
    RawValues,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    pub groundedness_threshold: f64,
    pub pii_details: PiiDetailMode,
    pub redaction_marker: String,
    pub harmful_placeholder: String,
    /// Optional YAML rulebook merged over the built-in compliance rules.
    pub compliance_rules_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            groundedness_threshold: 0.30,
            pii_details: PiiDetailMode::TypesOnly,
            redaction_marker: "[REDACTED]".into(),
            harmful_placeholder: "[Content removed for safety]".into(),
            compliance_rules_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FallbackConfig {
    /// Seed for template selection; entropy when unset.
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TelemetryConfig {
    pub json_logs: bool,
    pub enable_metrics: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            enable_metrics: true,
        }
    }
}

impl GuardrailsConfig {
    /// Layered load: `config/default`, `config/{CONTENT_GUARD_ENV}`,
    /// `config/local`, then `GUARD__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Same layering rooted at `dir`. Every file is optional.
    pub fn load_from(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let env = std::env::var("CONTENT_GUARD_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(&env)).required(false))
            .add_source(File::from(dir.join("local")).required(false))
            // Map GUARD__CLASSIFIER__TIMEOUT_MS=3000 to classifier.timeout_ms
            .add_source(Environment::with_prefix("GUARD").separator("__"))
            .build()?;

        Ok(s.try_deserialize()?)
    }
}
