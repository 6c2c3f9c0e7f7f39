//! Whole-program usage analysis over an already-checked program: what's
//! reachable from the entry module, which polymorphic methods are actually
//! called, and which fields are read versus written.
//!
//! [`analyze`] consumes a [`corevm_ast::Program`] plus the
//! [`corevm_checker::SemanticContext`] and [`corevm_types::TypeArena`] a
//! prior [`corevm_checker::Checker`] run produced, and returns a
//! [`UsageAnalysisResult`] a code generator can query without re-deriving
//! reachability itself.

mod analyzer;
mod model;

pub use analyzer::analyze;
pub use model::{FieldUsage, UsageAnalysisOptions, UsageAnalysisResult, UsageInfo};
