//! Client for a content-safety `text:analyze` endpoint.
//!
//! Wire format:
//! `POST {endpoint}/contentsafety/text:analyze?api-version={v}` with
//! `{"text", "categories", "outputType"}` and an `Ocp-Apim-Subscription-Key`
//! header; the response carries `categoriesAnalysis: [{category, severity}]`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use content_guard_core::{
    config::ClassifierConfig, CategoryScore, ContentClassifier, Error, Result,
};

/// Connection settings for [`HttpContentClassifier`].
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    pub endpoint: String,
    pub api_key: Option<Secret<String>>,
    pub api_version: String,
    pub categories: Vec<String>,
    /// Transport-level timeout. The analyzer applies its own bound on top.
    pub timeout: Duration,
}

impl HttpClassifierConfig {
    pub fn from_config(endpoint: &str, config: &ClassifierConfig) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            categories: config.categories.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    text: &'a str,
    categories: &'a [String],
    output_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    #[serde(default)]
    categories_analysis: Vec<CategoryAnalysis>,
}

#[derive(Debug, Deserialize)]
struct CategoryAnalysis {
    category: String,
    #[serde(default)]
    severity: Option<u32>,
}

/// HTTP implementation of [`ContentClassifier`].
#[derive(Clone)]
pub struct HttpContentClassifier {
    config: HttpClassifierConfig,
    client: reqwest::Client,
}

impl HttpContentClassifier {
    pub fn new(config: HttpClassifierConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::classifier(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/contentsafety/text:analyze?api-version={}",
            self.config.endpoint, self.config.api_version
        )
    }
}

#[async_trait]
impl ContentClassifier for HttpContentClassifier {
    async fn analyze(&self, text: &str) -> Result<Vec<CategoryScore>> {
        let body = AnalyzeRequest {
            text,
            categories: &self.config.categories,
            output_type: "FourSeverityLevels",
        };

        let mut request = self.client.post(self.analyze_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header("Ocp-Apim-Subscription-Key", key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(format!("classifier request timed out: {}", e))
            } else {
                Error::classifier_unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Classifier returned non-success status");
            return Err(Error::classifier_unavailable(format!(
                "classifier returned {}: {}",
                status, detail
            )));
        }

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| Error::classifier(format!("Failed to parse classifier response: {}", e)))?;

        tracing::debug!(
            categories = parsed.categories_analysis.len(),
            "Classifier response received"
        );

        Ok(parsed
            .categories_analysis
            .into_iter()
            .map(|c| CategoryScore::new(c.category, c.severity.unwrap_or(0)))
            .collect())
    }

    fn name(&self) -> &str {
        "http"
    }
}
