//! Scope resolution, expression/statement type checking, and
//! field-initialization tracking for a whole program.
//!
//! [`Checker`] is the entry point: construct one with [`Checker::new`],
//! then call [`Checker::check_program`] with a parsed [`corevm_ast::Program`].
//! Diagnostics accumulate in `checker.diagnostics`; resolved bindings and
//! inferred types land in `checker.context`.

pub mod binding;
pub mod call_checker;
pub mod class_checker;
pub mod expr_checker;
pub mod module_checker;
pub mod prelude;
pub mod scope;
pub mod state;
pub mod stmt_checker;
pub mod type_node_checker;

pub use binding::{ResolvedBinding, SemanticContext};
pub use prelude::PreludeTable;
pub use scope::{Namespace, ScopeStack, SymbolInfo, SymbolKind};
pub use state::Checker;
