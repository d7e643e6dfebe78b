#![deny(unused)]
//! Content-safety validation for Content Guard.
//!
//! This crate provides:
//! - Harm classification with fail-closed timeouts
//! - Prompt injection, PII, groundedness, compliance and business-logic detectors
//! - Severity aggregation and safe fallback responses
//! - Audit records and Prometheus metrics
//! - Distributed tracing

pub mod aggregate;
pub mod audit;
pub mod builder;
pub mod business;
pub mod compliance;
pub mod fallback;
pub mod groundedness;
pub mod harm;
pub mod injection;
pub mod metrics;
pub mod pii;
pub mod pipeline;
pub mod tracing_layer;

pub use audit::{AuditFilter, AuditRecorder, InMemoryAuditSink, TracingAuditSink};
pub use builder::ContentGuardBuilder;
pub use business::{BusinessLogicChecker, BusinessReport};
pub use compliance::{ComplianceReport, ComplianceRule, IndustryComplianceChecker, IndustryRulebook, RulebookFile};
pub use fallback::{FallbackResponseGenerator, RandomTemplateSelector};
pub use groundedness::{GroundednessScore, GroundednessScorer};
pub use harm::{DetectedCategory, HarmAnalysis, HarmCategoryAnalyzer};
pub use injection::{InjectionScan, PromptInjectionDetector};
pub use metrics::{log_violation, setup_metrics_recorder, MetricsTelemetrySink};
pub use pii::{PiiDetector, PiiEntity, PiiKind, PiiScan};
pub use pipeline::ContentGuard;
pub use tracing_layer::configure_tracing;
