//! Core type definitions for Content Guard.
//!
//! Every type here is created fresh per validation call; none is retained
//! after the call returns except the audit record handed to an `AuditSink`.

pub mod audit;
pub mod check;
pub mod classifier;
pub mod context;
pub mod result;
pub mod severity;
pub mod violation;

pub use audit::*;
pub use check::*;
pub use classifier::*;
pub use context::*;
pub use result::*;
pub use severity::*;
pub use violation::*;
