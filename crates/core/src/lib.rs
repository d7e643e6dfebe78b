#![deny(unused)]
//! Core types, traits, and error definitions for Content Guard.
//!
//! This crate provides the vocabulary shared by the classifier client, the
//! detectors and the validation pipeline: severities and actions, the
//! per-call context, check/result/audit records, and the collaborator traits
//! the pipeline consumes.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{
    AuditSink, ContentClassifier, NoOpAuditSink, TelemetrySink, TemplateSelector, ValidationKind,
    ValidationTelemetry,
};
pub use types::{
    hash_content, new_validation_id, AuditSummary, CategoryScore, CheckType, GuardrailAudit,
    GuardrailCheck, GuardrailContext, GuardrailResult, GuardrailViolation, Industry,
    RecommendedAction, SafetyLevel, SanitizationOptions, Severity, DEFAULT_HARM_CATEGORIES,
    GENERIC_FALLBACK_MESSAGE,
};
