//! `Checker` — the mutable state threaded through every checking method.
//! One instance checks one `Program`; it outlives every module so types
//! interned while checking module `a` stay valid while checking module `b`
//! (a single-threaded, shared-arena model).

use corevm_common::diagnostics::{Diagnostic, DiagnosticBag};
use corevm_common::{Atom, CheckerOptions, Interner, Span};
use corevm_types::TypeId;
use rustc_hash::FxHashSet;

use crate::binding::SemanticContext;
use crate::prelude::PreludeTable;
use crate::scope::{Namespace, ScopeStack, SymbolInfo};

pub struct Checker {
    pub arena: corevm_types::TypeArena,
    pub interner: Interner,
    pub diagnostics: DiagnosticBag,
    pub options: CheckerOptions,
    pub context: SemanticContext,
    pub scopes: ScopeStack,
    pub prelude: PreludeTable,

    pub current_module: String,

    /// The class currently being checked (constructor or method body), for
    /// private-member access and field-initialization tracking.
    pub current_class: Option<TypeId>,
    /// `true` while checking a `#new` constructor body.
    pub in_constructor: bool,
    pub is_this_initialized: bool,
    pub is_checking_field_initializer: bool,
    pub initialized_fields: FxHashSet<Atom>,

    pub current_function_return_type: Option<TypeId>,
}

impl Checker {
    pub fn new(options: CheckerOptions) -> Self {
        Checker {
            arena: corevm_types::TypeArena::new(),
            interner: Interner::new(),
            diagnostics: DiagnosticBag::new(),
            options,
            context: SemanticContext::new(),
            scopes: ScopeStack::new(),
            prelude: PreludeTable::new(),
            current_module: String::new(),
            current_class: None,
            in_constructor: false,
            is_this_initialized: false,
            is_checking_field_initializer: false,
            initialized_fields: FxHashSet::default(),
            current_function_return_type: None,
        }
    }

    pub fn error(&mut self, code: u32, span: Span, args: &[&str]) {
        let template = corevm_common::diagnostics::get_message_template(code).unwrap_or("{0}");
        let text = corevm_common::diagnostics::format_message(template, args);
        let module = self.current_module.clone();
        self.diagnostics.push(Diagnostic::error(module, span, text, code));
    }

    pub fn declare_value(&mut self, name: &str, info: SymbolInfo, is_function_type: bool, span: Span) {
        let module = self.current_module.clone();
        self.scopes
            .declare(Namespace::Value, name, info, is_function_type, &mut self.diagnostics, &module, span);
    }

    pub fn declare_type(&mut self, name: &str, info: SymbolInfo, span: Span) {
        let module = self.current_module.clone();
        self.scopes
            .declare(Namespace::Type, name, info, false, &mut self.diagnostics, &module, span);
    }

    /// Resolve a value-namespace identifier, falling back to the prelude on
    /// a scope miss.
    pub fn resolve_value(&mut self, name: &str) -> Option<SymbolInfo> {
        self.resolve_value_located(name).map(|(info, _)| info)
    }

    /// Like [`Self::resolve_value`], plus whether the match came from the
    /// module's outermost scope (or the prelude) rather than a nested one —
    /// the `Local` vs. `Global` distinction in `ResolvedBinding`.
    pub fn resolve_value_located(&mut self, name: &str) -> Option<(SymbolInfo, bool)> {
        if let Some((info, is_module_level)) = self.scopes.resolve_with_depth(Namespace::Value, name) {
            return Some((info.clone(), is_module_level));
        }
        self.prelude.resolve(Namespace::Value, name).map(|info| (info, true))
    }

    pub fn resolve_type(&mut self, name: &str) -> Option<SymbolInfo> {
        if let Some(info) = self.scopes.resolve(Namespace::Type, name) {
            return Some(info.clone());
        }
        self.prelude.resolve(Namespace::Type, name)
    }

    /// A `String`-named `Class` type, if one has been declared — used by
    /// `isAssignableTo` rule 4 and by string-literal/template checking.
    pub fn well_known_class(&mut self, name: &str) -> Option<TypeId> {
        self.resolve_type(name).map(|info| info.ty)
    }
}
