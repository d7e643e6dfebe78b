//! Collaborator traits consumed by the validation pipeline.
//!
//! - `classifier`: the external harm classifier (ContentClassifier)
//! - `audit`: where sealed audit records go (AuditSink)
//! - `telemetry`: numeric/categorical telemetry (TelemetrySink)
//! - `selector`: fallback template choice (TemplateSelector)

pub mod audit;
pub mod classifier;
pub mod selector;
pub mod telemetry;

pub use audit::*;
pub use classifier::*;
pub use selector::*;
pub use telemetry::*;
