use serde::{Deserialize, Serialize};

/// One harm category score returned by the external classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Category name as reported by the service (e.g. "Hate", "Violence").
    pub category: String,
    /// Raw, service-defined severity. Zero means not detected.
    pub severity: u32,
}

impl CategoryScore {
    pub fn new(category: impl Into<String>, severity: u32) -> Self {
        Self {
            category: category.into(),
            severity,
        }
    }
}

/// Harm categories requested from the classifier by default.
pub const DEFAULT_HARM_CATEGORIES: [&str; 4] = ["Hate", "SelfHarm", "Sexual", "Violence"];
