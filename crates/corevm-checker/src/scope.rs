//! Scopes and declarations.
//!
//! Keys are namespaced so a class name can inhabit both the `type:` and
//! `value:` namespace at once (its constructor is callable, its name also
//! denotes the type). Scopes form a plain stack; resolution walks innermost
//! to outermost before falling back to the prelude table.

use corevm_ast::NodeId;
use corevm_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message, Diagnostic, DiagnosticBag};
use corevm_common::Span;
use corevm_types::TypeId;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Value,
    Type,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Let,
    Var,
    Type,
    /// A name bound by an `import`, resolved to the target declaration's
    /// `NodeId` rather than a local `let`/`var`/`type` — `check_identifier`
    /// emits `ResolvedBinding::Import` for these instead of `Local`/`Global`.
    Import,
}

/// An entry in a scope: `{type, kind}` plus enough to resolve it into a
/// `ResolvedBinding` and, for a `let`-bound function, its accumulated
/// overload signatures (redeclaring a function with kind `let` appends to
/// its overloads list).
#[derive(Clone, Debug)]
pub struct SymbolInfo {
    pub ty: TypeId,
    pub kind: SymbolKind,
    pub node: NodeId,
    pub overloads: Vec<TypeId>,
}

impl SymbolInfo {
    pub fn new(ty: TypeId, kind: SymbolKind, node: NodeId) -> Self {
        SymbolInfo {
            ty,
            kind,
            node,
            overloads: Vec::new(),
        }
    }
}

#[derive(Default)]
struct Scope {
    symbols: FxHashMap<(Namespace, String), SymbolInfo>,
}

/// A stack of [`Scope`]s. The outermost scope (index 0) is a module's
/// top level; deeper scopes are function bodies and blocks.
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![Scope::default()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "popped the module-level scope");
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declare `name` in the innermost scope. Reports `DuplicateDeclaration`
    /// on a collision, unless both the existing and new symbol are
    /// `kind == Let` functions, in which case the new signature is appended
    /// as an overload and `true` is returned for "merged, no new symbol".
    pub fn declare(
        &mut self,
        namespace: Namespace,
        name: &str,
        info: SymbolInfo,
        is_function_type: bool,
        diagnostics: &mut DiagnosticBag,
        module: &str,
        span: Span,
    ) {
        let scope = self.scopes.last_mut().expect("non-empty scope stack");
        let key = (namespace, name.to_string());
        if let Some(existing) = scope.symbols.get_mut(&key) {
            if is_function_type && existing.kind == SymbolKind::Let && info.kind == SymbolKind::Let {
                existing.overloads.push(info.ty);
                return;
            }
            let text = format_message(diagnostic_messages::DUPLICATE_DECLARATION.message, &[name]);
            diagnostics.push(Diagnostic::error(
                module,
                span,
                text,
                diagnostic_codes::DUPLICATE_DECLARATION,
            ));
            return;
        }
        scope.symbols.insert(key, info);
    }

    /// Walk innermost → outermost. Does not consult the prelude; callers
    /// fall back to [`crate::prelude::PreludeTable`] on a miss.
    pub fn resolve(&self, namespace: Namespace, name: &str) -> Option<&SymbolInfo> {
        self.resolve_with_depth(namespace, name).map(|(info, _)| info)
    }

    /// Like [`Self::resolve`], but also reports whether the match was found
    /// in the outermost (module-level) scope — used to distinguish a
    /// `Global` binding from a `Local` one.
    pub fn resolve_with_depth(&self, namespace: Namespace, name: &str) -> Option<(&SymbolInfo, bool)> {
        for (depth, scope) in self.scopes.iter().enumerate().rev() {
            if let Some(info) = scope.symbols.get(&(namespace, name.to_string())) {
                return Some((info, depth == 0));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scope_shadows_outer() {
        let mut stack = ScopeStack::new();
        let mut diagnostics = DiagnosticBag::new();
        stack.declare(
            Namespace::Value,
            "x",
            SymbolInfo::new(TypeId::I32, SymbolKind::Let, NodeId(0)),
            false,
            &mut diagnostics,
            "m",
            Span::dummy(),
        );
        stack.push();
        stack.declare(
            Namespace::Value,
            "x",
            SymbolInfo::new(TypeId::BOOLEAN, SymbolKind::Let, NodeId(1)),
            false,
            &mut diagnostics,
            "m",
            Span::dummy(),
        );
        assert_eq!(stack.resolve(Namespace::Value, "x").unwrap().ty, TypeId::BOOLEAN);
        stack.pop();
        assert_eq!(stack.resolve(Namespace::Value, "x").unwrap().ty, TypeId::I32);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn duplicate_declaration_in_same_scope_is_reported() {
        let mut stack = ScopeStack::new();
        let mut diagnostics = DiagnosticBag::new();
        stack.declare(
            Namespace::Value,
            "x",
            SymbolInfo::new(TypeId::I32, SymbolKind::Let, NodeId(0)),
            false,
            &mut diagnostics,
            "m",
            Span::new(0, 1),
        );
        stack.declare(
            Namespace::Value,
            "x",
            SymbolInfo::new(TypeId::BOOLEAN, SymbolKind::Let, NodeId(1)),
            false,
            &mut diagnostics,
            "m",
            Span::new(2, 3),
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn redeclaring_a_let_function_appends_an_overload() {
        let mut stack = ScopeStack::new();
        let mut diagnostics = DiagnosticBag::new();
        stack.declare(
            Namespace::Value,
            "f",
            SymbolInfo::new(TypeId::I32, SymbolKind::Let, NodeId(0)),
            true,
            &mut diagnostics,
            "m",
            Span::new(0, 1),
        );
        stack.declare(
            Namespace::Value,
            "f",
            SymbolInfo::new(TypeId::BOOLEAN, SymbolKind::Let, NodeId(1)),
            true,
            &mut diagnostics,
            "m",
            Span::new(2, 3),
        );
        assert!(diagnostics.is_empty());
        assert_eq!(stack.resolve(Namespace::Value, "f").unwrap().overloads, vec![TypeId::BOOLEAN]);
    }
}
