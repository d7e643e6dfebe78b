#![deny(unused)]
//! External harm classifier clients for Content Guard.
//!
//! This crate provides:
//! - `HttpContentClassifier`: client for a content-safety `text:analyze` service
//! - `StaticContentClassifier`: fixed-score classifier for offline runs
//! - `create_classifier`: picks one from configuration

pub mod http;
pub mod offline;

pub use http::{HttpClassifierConfig, HttpContentClassifier};
pub use offline::StaticContentClassifier;

use std::sync::Arc;

use content_guard_core::{config::ClassifierConfig, ContentClassifier, Result};

/// Build the classifier described by `config`.
///
/// Without an endpoint the pipeline runs offline against a clean static
/// classifier; `offline` forces that regardless of configuration.
pub fn create_classifier(config: &ClassifierConfig, offline: bool) -> Result<Arc<dyn ContentClassifier>> {
    match (&config.endpoint, offline) {
        (Some(endpoint), false) => {
            let http_config = HttpClassifierConfig::from_config(endpoint, config);
            tracing::info!(endpoint = %endpoint, "Using HTTP content classifier");
            Ok(Arc::new(HttpContentClassifier::new(http_config)?))
        }
        _ => {
            tracing::info!("No classifier endpoint configured, using static offline classifier");
            Ok(Arc::new(StaticContentClassifier::clean(&config.categories)))
        }
    }
}
