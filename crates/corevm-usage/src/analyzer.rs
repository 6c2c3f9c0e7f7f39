//! Whole-program usage analysis.
//!
//! Runs in four passes, mirroring a mark-and-sweep collector rather than a
//! single top-down walk, since a declaration can become reachable through a
//! reference encountered arbitrarily later in the worklist (a subclass
//! defined after its superclass, a forward reference across modules once
//! imports are resolved):
//!
//! 1. **Index** — register every top-level declaration by name and by the
//!    identity of its checked type, and record the subclass graph.
//! 2. **Roots** — the entry module's exports seed the worklist.
//! 3. **Worklist** — pop a declaration, walk its body, and mark (and
//!    enqueue) everything it references.
//! 4. **Sweep** — a module counts as used iff it contributed at least one
//!    used top-level declaration.

use std::collections::VecDeque;

use corevm_ast::{
    ClassDeclaration, ClassMember, Expr, ExprKind, FunctionBody, FunctionExpr, InterfaceDeclaration,
    MixinDeclaration, NodeId, Program, Stmt, TemplatePart, TypeAliasDeclaration, TypeNode, TypeNodeKind,
};
use corevm_common::Atom;
use corevm_types::{TypeArena, TypeId, TypeKind};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::{FieldUsage, UsageAnalysisOptions, UsageAnalysisResult, UsageInfo};
use corevm_checker::{ResolvedBinding, SemanticContext};

struct DeclRef<'a> {
    stmt: &'a Stmt,
}

pub fn analyze(program: &Program, context: &SemanticContext, arena: &TypeArena, options: UsageAnalysisOptions) -> UsageAnalysisResult {
    let mut a = Analyzer {
        program,
        context,
        arena,
        include_reasons: options.include_reasons,
        decl_stmt: FxHashMap::default(),
        declarations_by_name: FxHashMap::default(),
        declarations_by_type: FxHashMap::default(),
        subclasses: FxHashMap::default(),
        usage: FxHashMap::default(),
        used: FxHashSet::default(),
        used_methods: FxHashMap::default(),
        polymorphic_methods: FxHashMap::default(),
        field_usage: FxHashMap::default(),
        worklist: VecDeque::new(),
        in_worklist: FxHashSet::default(),
    };
    a.index();
    tracing::debug!(declarations = a.decl_stmt.len(), "usage analysis: indexed top-level declarations");
    a.seed_roots();
    tracing::debug!(roots = a.worklist.len(), "usage analysis: seeded worklist from entry module exports");
    a.drain_worklist();
    let used_modules = a.sweep_modules();
    tracing::debug!(used = a.used.len(), modules = used_modules.len(), "usage analysis: worklist drained");

    UsageAnalysisResult {
        usage: a.usage,
        used_declarations: a.used,
        used_modules,
        used_methods: a.used_methods,
        polymorphic_methods: a.polymorphic_methods,
        field_usage: a.field_usage,
        pure_modules: options.pure_modules,
    }
}

struct Analyzer<'a> {
    program: &'a Program,
    context: &'a SemanticContext,
    arena: &'a TypeArena,
    include_reasons: bool,

    decl_stmt: FxHashMap<NodeId, DeclRef<'a>>,
    declarations_by_name: FxHashMap<String, Vec<NodeId>>,
    declarations_by_type: FxHashMap<TypeId, NodeId>,
    subclasses: FxHashMap<TypeId, FxHashSet<TypeId>>,

    usage: FxHashMap<NodeId, UsageInfo>,
    used: FxHashSet<NodeId>,
    used_methods: FxHashMap<TypeId, FxHashSet<Atom>>,
    polymorphic_methods: FxHashMap<TypeId, FxHashSet<Atom>>,
    field_usage: FxHashMap<TypeId, FxHashMap<Atom, FieldUsage>>,

    worklist: VecDeque<NodeId>,
    in_worklist: FxHashSet<NodeId>,
}

impl<'a> Analyzer<'a> {
    fn index(&mut self) {
        for path in self.program.topological_order() {
            let Some(module) = self.program.modules.get(path) else { continue };
            for stmt in module.top_level_declarations() {
                let id = stmt.id();
                self.decl_stmt.insert(id, DeclRef { stmt });
                if let Some(name) = stmt.declared_name() {
                    self.declarations_by_name.entry(name.to_string()).or_default().push(id);
                }
                if let Some(ty) = self.context.inferred_type(id) {
                    self.declarations_by_type.entry(ty).or_insert(id);
                }
                if let Stmt::ClassDeclaration(_) = stmt {
                    if let Some(ty) = self.context.inferred_type(id) {
                        if let TypeKind::Class(shape_id) = self.arena.kind(ty) {
                            if let Some(super_ty) = self.arena.class_shape(*shape_id).super_type {
                                self.subclasses.entry(super_ty).or_default().insert(ty);
                            }
                        }
                    }
                }
            }
        }
    }

    fn seed_roots(&mut self) {
        let Some(entry) = self.program.entry_module() else { return };
        let exported: Vec<NodeId> = entry.exports.values().copied().collect();
        for node in exported {
            self.mark_used(node, "entry point export");
        }
    }

    fn drain_worklist(&mut self) {
        while let Some(node) = self.worklist.pop_front() {
            self.in_worklist.remove(&node);
            let Some(decl) = self.decl_stmt.get(&node) else { continue };
            let stmt: &'a Stmt = decl.stmt;
            self.visit_declaration(stmt);
        }
    }

    fn sweep_modules(&self) -> FxHashSet<String> {
        let mut used_modules = FxHashSet::default();
        for (path, module) in &self.program.modules {
            if module.top_level_declarations().any(|s| self.used.contains(&s.id())) {
                used_modules.insert(path.clone());
            }
        }
        used_modules
    }

    fn mark_used(&mut self, node: NodeId, reason: &str) {
        let first_time = self.used.insert(node);
        let entry = self.usage.entry(node).or_default();
        if !entry.is_used {
            entry.is_used = true;
            if self.include_reasons {
                entry.reason = Some(reason.to_string());
            }
        }
        if first_time && self.decl_stmt.contains_key(&node) && self.in_worklist.insert(node) {
            self.worklist.push_back(node);
        }
    }

    /// A name-based fallback used whenever a binding couldn't be resolved at
    /// check time (or deliberately isn't tracked, e.g. well-known classes):
    /// mark every top-level declaration of that name used, conservatively.
    fn mark_by_name(&mut self, name: &str, reason: &str) {
        if let Some(ids) = self.declarations_by_name.get(name).cloned() {
            for id in ids {
                self.mark_used(id, reason);
            }
        }
    }

    fn mark_type_used(&mut self, ty: TypeId, reason: &str) {
        if let Some(&node) = self.declarations_by_type.get(&ty) {
            self.mark_used(node, reason);
        }
    }

    fn mark_method_used(&mut self, class_ty: TypeId, name: Atom, polymorphic: bool) {
        self.used_methods.entry(class_ty).or_default().insert(name);
        if polymorphic {
            self.polymorphic_methods.entry(class_ty).or_default().insert(name);
            self.propagate_to_subclasses(class_ty, name);
        }
    }

    fn propagate_to_subclasses(&mut self, class_ty: TypeId, name: Atom) {
        let mut stack = vec![class_ty];
        let mut seen = FxHashSet::default();
        while let Some(ty) = stack.pop() {
            if !seen.insert(ty) {
                continue;
            }
            if let Some(subs) = self.subclasses.get(&ty).cloned() {
                for sub in subs {
                    self.used_methods.entry(sub).or_default().insert(name);
                    self.polymorphic_methods.entry(sub).or_default().insert(name);
                    stack.push(sub);
                }
            }
        }
    }

    fn mark_field_read(&mut self, class_ty: TypeId, name: Atom) {
        self.field_usage.entry(class_ty).or_default().entry(name).or_default().is_read = true;
    }

    fn mark_field_written(&mut self, class_ty: TypeId, name: Atom) {
        self.field_usage.entry(class_ty).or_default().entry(name).or_default().is_written = true;
    }

    fn visit_declaration(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::VariableDeclaration(_) => self.visit_stmt(stmt),
            Stmt::ClassDeclaration(d) => self.visit_class(d),
            Stmt::InterfaceDeclaration(d) => self.visit_interface(d),
            Stmt::MixinDeclaration(d) => self.visit_mixin(d),
            Stmt::TypeAliasDeclaration(d) => self.visit_type_alias(d),
            Stmt::ImportDeclaration(_) => {}
            Stmt::ExpressionStatement(_) | Stmt::Return { .. } | Stmt::If { .. } | Stmt::Block { .. } => {
                unreachable!("not a top-level declaration; never indexed into decl_stmt")
            }
        }
    }

    fn visit_class(&mut self, d: &'a ClassDeclaration) {
        if let Some(t) = &d.super_class {
            self.visit_type_node(t);
        }
        for t in &d.implements {
            self.visit_type_node(t);
        }
        if let Some(t) = &d.on_type {
            self.visit_type_node(t);
        }
        for member in &d.members {
            match member {
                ClassMember::Field(f) => self.visit_type_node(&f.type_node),
                ClassMember::Method(m) => self.visit_function(&m.function),
                ClassMember::Getter(g) => self.visit_function(&g.function),
                ClassMember::Setter(s) => self.visit_function(&s.function),
                ClassMember::Constructor(c) => {
                    for p in &c.parameters {
                        if let Some(t) = &p.type_node {
                            self.visit_type_node(t);
                        }
                    }
                    for s in &c.body {
                        self.visit_stmt(s);
                    }
                }
            }
        }
    }

    fn visit_interface(&mut self, d: &'a InterfaceDeclaration) {
        for t in &d.extends {
            self.visit_type_node(t);
        }
        for field in &d.fields {
            self.visit_type_node(&field.type_node);
        }
        for method in &d.methods {
            self.visit_type_node(&method.type_node);
        }
    }

    fn visit_mixin(&mut self, d: &'a MixinDeclaration) {
        if let Some(t) = &d.on_type {
            self.visit_type_node(t);
        }
        for member in &d.members {
            match member {
                ClassMember::Field(f) => self.visit_type_node(&f.type_node),
                ClassMember::Method(m) => self.visit_function(&m.function),
                ClassMember::Getter(g) => self.visit_function(&g.function),
                ClassMember::Setter(s) => self.visit_function(&s.function),
                ClassMember::Constructor(_) => {}
            }
        }
    }

    fn visit_type_alias(&mut self, d: &'a TypeAliasDeclaration) {
        self.visit_type_node(&d.target);
    }

    fn visit_function(&mut self, f: &'a FunctionExpr) {
        for p in &f.parameters {
            if let Some(t) = &p.type_node {
                self.visit_type_node(t);
            }
        }
        if let Some(rt) = &f.return_type {
            self.visit_type_node(rt);
        }
        match &f.body {
            FunctionBody::Block(stmts) => {
                for s in stmts {
                    self.visit_stmt(s);
                }
            }
            FunctionBody::Expr(e) => self.visit_expr(e, false),
        }
    }

    fn visit_type_node(&mut self, t: &'a TypeNode) {
        match &t.kind {
            TypeNodeKind::NameRef { name, type_arguments } => {
                self.mark_by_name(name, "referenced in type position");
                for arg in type_arguments {
                    self.visit_type_node(arg);
                }
            }
            TypeNodeKind::Array(inner) | TypeNodeKind::FixedArray(inner) => self.visit_type_node(inner),
            TypeNodeKind::Tuple(elements) | TypeNodeKind::Union(elements) => {
                for e in elements {
                    self.visit_type_node(e);
                }
            }
            TypeNodeKind::Record(fields) => {
                for f in fields {
                    self.visit_type_node(&f.type_node);
                }
            }
            TypeNodeKind::Function { parameters, return_type, .. } => {
                for p in parameters {
                    self.visit_type_node(p);
                }
                self.visit_type_node(return_type);
            }
            _ => {}
        }
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::VariableDeclaration(d) => {
                if let Some(t) = &d.declared_type {
                    self.visit_type_node(t);
                }
                if let Some(init) = &d.init {
                    self.visit_expr(init, false);
                }
            }
            Stmt::ClassDeclaration(_)
            | Stmt::InterfaceDeclaration(_)
            | Stmt::MixinDeclaration(_)
            | Stmt::TypeAliasDeclaration(_)
            | Stmt::ImportDeclaration(_) => {
                // Nested type declarations aren't part of this language's
                // grammar; reaching here would mean a local declaration
                // that only gets its reachability from the enclosing body,
                // already accounted for by the outer `mark_used`.
            }
            Stmt::ExpressionStatement(e) => self.visit_expr(e, false),
            Stmt::Return { value, .. } => {
                if let Some(v) = value {
                    self.visit_expr(v, false);
                }
            }
            Stmt::If { condition, then_branch, else_branch, .. } => {
                self.visit_expr(condition, false);
                for s in then_branch {
                    self.visit_stmt(s);
                }
                if let Some(else_body) = else_branch {
                    for s in else_body {
                        self.visit_stmt(s);
                    }
                }
            }
            Stmt::Block { body, .. } => {
                for s in body {
                    self.visit_stmt(s);
                }
            }
        }
    }

    fn visit_expr(&mut self, expr: &'a Expr, write: bool) {
        match &expr.kind {
            ExprKind::Identifier(name) => self.visit_identifier(expr.id, name),
            ExprKind::ThisExpression | ExprKind::NullLiteral | ExprKind::BooleanLiteral(_) | ExprKind::NumberLiteral { .. } => {}
            ExprKind::StringLiteral(_) => self.mark_by_name("String", "string literal"),
            ExprKind::TemplateLiteral(parts) => {
                self.mark_by_name("String", "template literal");
                for part in parts {
                    if let TemplatePart::Expr(e) = part {
                        self.visit_expr(e, false);
                    }
                }
            }
            ExprKind::ArrayLiteral(elements) => {
                for e in elements {
                    self.visit_expr(e, false);
                }
                if let Some(ty) = self.context.inferred_type(expr.id) {
                    if matches!(self.arena.kind(ty), TypeKind::FixedArray(_) | TypeKind::Array(_)) {
                        self.mark_by_name("FixedArray", "array literal");
                    }
                }
            }
            ExprKind::TupleLiteral(elements) => {
                for e in elements {
                    self.visit_expr(e, false);
                }
            }
            ExprKind::RecordLiteral(fields) => {
                for f in fields {
                    self.visit_expr(&f.value, false);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                self.visit_expr(left, false);
                self.visit_expr(right, false);
                if let Some(method_name) = self.context.resolved_operator_method(expr.id) {
                    if let Some(lty) = self.context.inferred_type(left.id) {
                        if let TypeKind::Class(_) = self.arena.kind(lty) {
                            self.mark_method_used(lty, method_name, true);
                        }
                    }
                }
            }
            ExprKind::Call { callee, arguments, .. } => {
                self.visit_expr(callee, false);
                for a in arguments {
                    self.visit_expr(a, false);
                }
            }
            ExprKind::SuperCall { arguments } => {
                for a in arguments {
                    self.visit_expr(a, false);
                }
            }
            ExprKind::New { class_name, arguments, .. } => {
                self.visit_new(expr.id, class_name);
                for a in arguments {
                    self.visit_expr(a, false);
                }
            }
            ExprKind::Member { object, .. } => {
                self.visit_expr(object, false);
                self.visit_member_binding(expr.id, write);
            }
            ExprKind::Index { object, index } => {
                self.visit_expr(object, false);
                self.visit_expr(index, false);
                self.visit_index_operator(expr.id, object);
            }
            ExprKind::Assignment { target, value } => {
                self.visit_expr(value, false);
                self.visit_expr(target, true);
            }
            ExprKind::Function(f) => self.visit_function(f),
            ExprKind::Throw(inner) => {
                self.mark_by_name("Error", "throw expression");
                self.visit_expr(inner, false);
            }
            ExprKind::Range { from, to } => {
                if let Some(f) = from {
                    self.visit_expr(f, false);
                }
                if let Some(t) = to {
                    self.visit_expr(t, false);
                }
                let class_name = match (from, to) {
                    (Some(_), Some(_)) => "BoundedRange",
                    (Some(_), None) => "FromRange",
                    (None, Some(_)) => "ToRange",
                    (None, None) => "FullRange",
                };
                self.mark_by_name(class_name, "range expression");
            }
        }
    }

    fn visit_identifier(&mut self, node: NodeId, name: &str) {
        match self.context.binding(node) {
            Some(ResolvedBinding::Local { node } | ResolvedBinding::Global { node } | ResolvedBinding::Function { node } | ResolvedBinding::Import { node }) => {
                self.mark_used(node, "referenced");
            }
            Some(ResolvedBinding::Class { ty } | ResolvedBinding::Interface { ty } | ResolvedBinding::Mixin { ty } | ResolvedBinding::TypeAlias { ty }) => {
                self.mark_type_used(ty, "referenced as a type");
            }
            Some(ResolvedBinding::TypeParameter { .. }) => {}
            Some(
                ResolvedBinding::Field { .. }
                | ResolvedBinding::Getter { .. }
                | ResolvedBinding::Setter { .. }
                | ResolvedBinding::Method { .. }
                | ResolvedBinding::RecordField { .. },
            ) => {
                // Member-shaped bindings never attach to a bare `Identifier`
                // node in this checker; reachable only via `Member`.
            }
            None => self.mark_by_name(name, "unresolved reference (conservative fallback)"),
        }
    }

    fn visit_new(&mut self, node: NodeId, class_name: &str) {
        match self.context.binding(node) {
            Some(ResolvedBinding::Class { ty }) => self.mark_type_used(ty, "constructed"),
            _ => self.mark_by_name(class_name, "constructed (conservative fallback)"),
        }
        if let Some(ty) = self.context.inferred_type(node) {
            self.mark_nested_types_reachable(ty, &mut FxHashSet::default());
        }
        if let Some(args) = self.context.inferred_type_arguments(node) {
            for &arg in args {
                self.mark_nested_types_reachable(arg, &mut FxHashSet::default());
            }
        }
    }

    fn mark_nested_types_reachable(&mut self, ty: TypeId, seen: &mut FxHashSet<TypeId>) {
        if !seen.insert(ty) {
            return;
        }
        match self.arena.kind(ty).clone() {
            TypeKind::Class(_) | TypeKind::Interface(_) | TypeKind::Mixin(_) => {
                self.mark_type_used(ty, "reachable through a generic type argument");
            }
            TypeKind::Array(elem) | TypeKind::FixedArray(elem) => self.mark_nested_types_reachable(elem, seen),
            TypeKind::Tuple(elems) | TypeKind::Union(elems) => {
                for e in elems {
                    self.mark_nested_types_reachable(e, seen);
                }
            }
            TypeKind::Record(fields) => {
                for (_, v) in fields {
                    self.mark_nested_types_reachable(v, seen);
                }
            }
            _ => {}
        }
    }

    fn visit_member_binding(&mut self, node: NodeId, write: bool) {
        match self.context.binding(node) {
            Some(ResolvedBinding::Method { class_ty, name, is_static_dispatch }) => {
                self.mark_method_used(class_ty, name, !is_static_dispatch);
            }
            Some(ResolvedBinding::Getter { class_ty, name, is_static_dispatch }) if !write => {
                self.mark_method_used(class_ty, name, !is_static_dispatch);
            }
            Some(ResolvedBinding::Setter { class_ty, name, is_static_dispatch }) if write => {
                self.mark_method_used(class_ty, name, !is_static_dispatch);
            }
            Some(ResolvedBinding::Field { class_ty, name, .. }) => {
                if write {
                    self.mark_field_written(class_ty, name);
                } else {
                    self.mark_field_read(class_ty, name);
                }
            }
            Some(ResolvedBinding::RecordField { .. }) | Some(ResolvedBinding::Getter { .. }) | Some(ResolvedBinding::Setter { .. }) => {}
            _ => {}
        }
    }

    fn visit_index_operator(&mut self, node: NodeId, object: &'a Expr) {
        let Some(method_name) = self.context.resolved_operator_method(node) else { return };
        let Some(ty) = self.context.inferred_type(object.id) else { return };
        if let TypeKind::Class(_) = self.arena.kind(ty) {
            self.mark_method_used(ty, method_name, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corevm_ast::{testkit, Module, NodeIdGen, VarKind, VariableDeclaration};
    use corevm_checker::SemanticContext;
    use corevm_types::{ClassType, FunctionShape};

    fn program_with(entry: Module) -> Program {
        let mut program = Program::new(entry.path.clone());
        program.add_module(entry);
        program
    }

    #[test]
    fn exported_declaration_is_used_unexported_sibling_is_not() {
        let gen = NodeIdGen::new();
        let used = testkit::let_decl(&gen, "used", testkit::number(&gen, "1"), true);
        let unused = testkit::let_decl(&gen, "unused", testkit::number(&gen, "2"), false);
        let used_id = used.id();
        let unused_id = unused.id();

        let mut module = Module::new("main");
        module.body = vec![used, unused];
        module.exports.insert("used".to_string(), used_id);
        let program = program_with(module);

        let context = SemanticContext::new();
        let arena = corevm_types::TypeArena::new();
        let result = analyze(&program, &context, &arena, UsageAnalysisOptions::default());

        assert!(result.is_used(used_id));
        assert!(!result.is_used(unused_id));
        assert!(result.is_module_used("main"));
    }

    #[test]
    fn unindexed_node_defaults_to_used() {
        let program = Program::new("main");
        let context = SemanticContext::new();
        let arena = corevm_types::TypeArena::new();
        let result = analyze(&program, &context, &arena, UsageAnalysisOptions::default());
        assert!(result.is_used(NodeId(9999)));
    }

    #[test]
    fn polymorphic_method_call_propagates_to_subclass() {
        let gen = NodeIdGen::new();
        let mut arena = corevm_types::TypeArena::new();
        let mut context = SemanticContext::new();

        let mut interner = corevm_common::Interner::new();
        let speak_name = interner.intern("speak");

        let shape = arena.push_function_shape(FunctionShape {
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: corevm_types::TypeId::VOID,
            overloads: Vec::new(),
            is_final: false,
        });
        let mut base_shape = ClassType::template(interner.intern("Base"));
        base_shape.methods.insert(speak_name, shape);
        let base_ty = arena.class_type(base_shape);

        let mut derived_shape = ClassType::template(interner.intern("Derived"));
        derived_shape.super_type = Some(base_ty);
        let derived_ty = arena.class_type(derived_shape);

        let base_decl = testkit::let_decl(&gen, "Base", testkit::number(&gen, "0"), true);
        let base_id = base_decl.id();
        let derived_decl = testkit::let_decl(&gen, "Derived", testkit::number(&gen, "0"), false);
        let derived_id = derived_decl.id();
        context.set_inferred_type(base_id, base_ty);
        context.set_inferred_type(derived_id, derived_ty);

        let object = testkit::ident(&gen, "b");
        let member = testkit::member(&gen, object, "speak");
        let member_id = member.id;
        context.set_binding(
            member_id,
            corevm_checker::ResolvedBinding::Method { class_ty: base_ty, name: speak_name, is_static_dispatch: false },
        );
        let call = testkit::call(&gen, member, Vec::new());
        let runner = Stmt::VariableDeclaration(VariableDeclaration {
            id: gen.next(),
            span: corevm_common::Span::new(0, 0),
            name: "run".to_string(),
            kind: VarKind::Let,
            declared_type: None,
            init: Some(call),
            is_exported: true,
        });
        let runner_id = runner.id();

        let mut module = Module::new("main");
        module.body = vec![base_decl, derived_decl, runner];
        module.exports.insert("run".to_string(), runner_id);
        module.exports.insert("Base".to_string(), base_id);
        let program = program_with(module);

        let result = analyze(&program, &context, &arena, UsageAnalysisOptions::default());

        assert!(result.is_method_used(&arena, base_ty, speak_name));
        assert!(result.is_method_used(&arena, derived_ty, speak_name));
        assert!(result.is_used(base_id));
        assert!(!result.is_used(derived_id));
    }

    #[test]
    fn field_read_and_write_are_tracked_independently() {
        let gen = NodeIdGen::new();
        let mut arena = corevm_types::TypeArena::new();
        let mut interner = corevm_common::Interner::new();
        let field_name = interner.intern("x");
        let mut class_shape = ClassType::template(interner.intern("Point"));
        class_shape.fields.insert(field_name, corevm_types::TypeId::I32);
        let class_ty = arena.class_type(class_shape);

        let mut context = SemanticContext::new();
        let object = testkit::ident(&gen, "p");
        let member = testkit::member(&gen, object, "x");
        context.set_binding(
            member.id,
            corevm_checker::ResolvedBinding::Field { class_ty, name: field_name, is_static_dispatch: false },
        );
        let read_stmt = Stmt::VariableDeclaration(VariableDeclaration {
            id: gen.next(),
            span: corevm_common::Span::new(0, 0),
            name: "reader".to_string(),
            kind: VarKind::Let,
            declared_type: None,
            init: Some(member),
            is_exported: true,
        });
        let read_id = read_stmt.id();

        let mut module = Module::new("main");
        module.body = vec![read_stmt];
        module.exports.insert("reader".to_string(), read_id);
        let program = program_with(module);

        let result = analyze(&program, &context, &arena, UsageAnalysisOptions::default());
        let usage = result.get_field_usage(class_ty, field_name).expect("field usage recorded");
        assert!(usage.is_read);
        assert!(!usage.is_written);
    }
}
