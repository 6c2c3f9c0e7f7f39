//! Common types and utilities shared across the corevm semantic middle-end.
//!
//! This crate provides foundational pieces used by every other crate in the
//! workspace:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`, `Spanned`)
//! - Diagnostics (`Diagnostic`, `DiagnosticBag`, diagnostic codes/messages)
//! - Compiler limits and thresholds (`limits`)
//! - Checker configuration (`CheckerOptions`)

pub mod checker_options;
pub mod diagnostics;
pub mod interner;
pub mod limits;
pub mod span;

pub use checker_options::CheckerOptions;
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCategory, DiagnosticRelatedInformation};
pub use interner::{Atom, Interner};
pub use span::{Span, Spanned};
