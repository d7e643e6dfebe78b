use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Validation context
// =============================================================================

/// Business vertical the content is produced for.
///
/// Unknown names are preserved as `Custom` so new verticals can be routed
/// through the pipeline before rule sets exist for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Industry {
    RealEstate,
    Finance,
    Healthcare,
    Insurance,
    Legal,
    Retail,
    Hospitality,
    Technology,
    #[default]
    General,
    Custom(String),
}

impl Industry {
    pub fn as_str(&self) -> &str {
        match self {
            Industry::RealEstate => "real_estate",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Insurance => "insurance",
            Industry::Legal => "legal",
            Industry::Retail => "retail",
            Industry::Hospitality => "hospitality",
            Industry::Technology => "technology",
            Industry::General => "general",
            Industry::Custom(name) => name,
        }
    }
}

impl From<&str> for Industry {
    fn from(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "realestate" => Industry::RealEstate,
            "finance" | "financial" => Industry::Finance,
            "healthcare" | "health" => Industry::Healthcare,
            "insurance" => Industry::Insurance,
            "legal" => Industry::Legal,
            "retail" => Industry::Retail,
            "hospitality" => Industry::Hospitality,
            "technology" | "tech" => Industry::Technology,
            "general" | "" => Industry::General,
            _ => Industry::Custom(value.trim().to_string()),
        }
    }
}

impl From<String> for Industry {
    fn from(value: String) -> Self {
        Industry::from(value.as_str())
    }
}

impl From<Industry> for String {
    fn from(value: Industry) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable per-call input describing who produced the content and for what.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardrailContext {
    /// Vertical whose compliance rules and fallback templates apply.
    pub industry: Industry,
    /// Free-form content type tag (e.g. "listing_description", "chat_reply").
    pub content_type: String,
    pub user_id: String,
    pub session_id: String,
    /// Whether grounding documents accompany the content.
    #[serde(default)]
    pub has_source_documents: bool,
    /// Grounding documents, consulted only when `has_source_documents` is set.
    #[serde(default)]
    pub source_documents: Vec<String>,
}

impl GuardrailContext {
    /// Create a context for the given industry.
    pub fn new(industry: impl Into<Industry>) -> Self {
        Self {
            industry: industry.into(),
            ..Default::default()
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Attach grounding documents and mark the context as grounded.
    pub fn with_source_documents<I, S>(mut self, documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_documents = documents.into_iter().map(Into::into).collect();
        self.has_source_documents = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_parsing() {
        assert_eq!(Industry::from("RealEstate"), Industry::RealEstate);
        assert_eq!(Industry::from("real_estate"), Industry::RealEstate);
        assert_eq!(Industry::from("real-estate"), Industry::RealEstate);
        assert_eq!(Industry::from("FINANCE"), Industry::Finance);
        assert_eq!(Industry::from("aerospace"), Industry::Custom("aerospace".into()));
    }

    #[test]
    fn test_industry_serde_roundtrip() {
        let json = serde_json::to_string(&Industry::Healthcare).unwrap();
        assert_eq!(json, "\"healthcare\"");
        let parsed: Industry = serde_json::from_str("\"realEstate\"").unwrap();
        assert_eq!(parsed, Industry::RealEstate);
    }

    #[test]
    fn test_context_builder() {
        let ctx = GuardrailContext::new(Industry::Finance)
            .with_user("u1")
            .with_session("s1")
            .with_source_documents(["doc a", "doc b"]);
        assert_eq!(ctx.user_id, "u1");
        assert!(ctx.has_source_documents);
        assert_eq!(ctx.source_documents.len(), 2);
    }
}
