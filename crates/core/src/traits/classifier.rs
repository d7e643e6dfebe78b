use async_trait::async_trait;

use crate::error::Result;
use crate::types::CategoryScore;

/// External text classifier returning per-category harm scores.
///
/// Implementations report transport or service failures as `Err`; callers
/// decide how to fail closed.
#[async_trait]
pub trait ContentClassifier: Send + Sync {
    /// Score `text` across the service's harm categories.
    async fn analyze(&self, text: &str) -> Result<Vec<CategoryScore>>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "classifier"
    }
}
