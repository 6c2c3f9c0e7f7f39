//! Class/interface/mixin/type-alias declaration checking. Registers the
//! declared shape into the `TypeArena` and, for classes, checks the
//! constructor body with field-initialization tracking.

use corevm_ast::{
    ClassDeclaration, ClassMember, ConstructorMember, InterfaceDeclaration, MixinDeclaration,
    TypeAliasDeclaration,
};
use corevm_common::diagnostics::diagnostic_codes;
use corevm_types::{ClassType, FunctionShape, InterfaceType, MixinType, TypeAliasType, TypeId, TypeKind, TypeParamType};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::scope::{SymbolInfo, SymbolKind};
use crate::state::Checker;

impl Checker {
    pub(crate) fn check_class_declaration(&mut self, decl: &ClassDeclaration) {
        let name_atom = self.interner.intern(&decl.name);
        let type_id = self.arena.class_type(ClassType::template(name_atom));
        self.declare_type(&decl.name, SymbolInfo::new(type_id, SymbolKind::Type, decl.id), decl.span);
        self.context.set_inferred_type(decl.id, type_id);

        self.scopes.push();
        let type_parameters = self.declare_type_parameters(&decl.type_parameters);

        let super_type = decl.super_class.as_ref().map(|t| self.check_type_node(t));
        let implements: Vec<TypeId> = decl.implements.iter().map(|t| self.check_type_node(t)).collect();
        let on_type = decl.on_type.as_ref().map(|t| self.check_type_node(t));

        let mut fields = IndexMap::new();
        let mut methods = IndexMap::new();
        let mut constructor: Option<&ConstructorMember> = None;

        let previous_class = self.current_class.replace(type_id);
        for member in &decl.members {
            match member {
                ClassMember::Field(f) => {
                    let ty = self.check_type_node(&f.type_node);
                    fields.insert(self.interner.intern(&f.name), ty);
                }
                ClassMember::Method(m) => {
                    let shape_id = self.check_method_body(&m.function, m.is_final);
                    methods.insert(self.interner.intern(&m.name), shape_id);
                }
                ClassMember::Getter(g) => {
                    let shape_id = self.check_method_body(&g.function, false);
                    methods.insert(self.interner.intern(&g.name), shape_id);
                }
                ClassMember::Setter(s) => {
                    let shape_id = self.check_method_body(&s.function, false);
                    methods.insert(self.interner.intern(&s.name), shape_id);
                }
                ClassMember::Constructor(c) => constructor = Some(c),
            }
        }
        self.current_class = previous_class;

        let constructor_type = constructor.map(|c| {
            let parameters = c
                .parameters
                .iter()
                .map(|p| match &p.type_node {
                    Some(t) => self.check_type_node(t),
                    None => TypeId::UNKNOWN,
                })
                .collect();
            self.arena.push_function_shape(FunctionShape {
                type_parameters: Vec::new(),
                parameters,
                return_type: TypeId::VOID,
                overloads: Vec::new(),
                is_final: false,
            })
        });

        let shape_id = match self.arena.kind(type_id) {
            TypeKind::Class(id) => *id,
            _ => unreachable!("just interned as a Class type"),
        };
        {
            let shape = self.arena.class_shape_mut(shape_id);
            shape.type_parameters = type_parameters;
            shape.fields = fields;
            shape.methods = methods;
            shape.constructor_type = constructor_type;
            shape.super_type = super_type;
            shape.implements = implements;
            shape.is_final = decl.is_final;
            shape.is_abstract = decl.is_abstract;
            shape.is_extension = decl.is_extension;
            shape.on_type = on_type;
        }
        if decl.is_extension {
            self.arena.register_extension(type_id);
        }

        self.check_abstract_fields_implemented(decl, type_id);

        if let Some(ctor) = constructor {
            self.check_constructor_body(type_id, constructor_type.unwrap(), ctor);
        }

        self.scopes.pop();
    }

    /// `AbstractFieldNotImplemented`: a concrete subclass of an abstract
    /// class must redeclare every field the ancestor leaves abstract (i.e.
    /// never gives a type-compatible field of its own).
    fn check_abstract_fields_implemented(&mut self, decl: &ClassDeclaration, type_id: TypeId) {
        if decl.is_abstract {
            return;
        }
        let TypeKind::Class(shape_id) = self.arena.kind(type_id).clone() else { return };
        let class = self.arena.class_shape(shape_id).clone();
        let Some(super_ty) = class.super_type else { return };
        let TypeKind::Class(super_shape_id) = self.arena.kind(super_ty).clone() else { return };
        let super_class = self.arena.class_shape(super_shape_id).clone();
        if !super_class.is_abstract {
            return;
        }
        for (field_name, _) in super_class.fields.iter() {
            if !class.fields.contains_key(field_name) {
                let name = self.interner.resolve(*field_name).to_string();
                self.error(diagnostic_codes::ABSTRACT_FIELD_NOT_IMPLEMENTED, decl.span, &[&name]);
            }
        }
    }

    fn check_constructor_body(&mut self, class_ty: TypeId, ctor_shape: corevm_types::FunctionShapeId, ctor: &ConstructorMember) {
        let previous_class = self.current_class.replace(class_ty);
        let previous_in_constructor = std::mem::replace(&mut self.in_constructor, true);
        let previous_this_initialized = std::mem::replace(&mut self.is_this_initialized, false);
        let previous_checking_init = std::mem::replace(&mut self.is_checking_field_initializer, true);
        let previous_fields = std::mem::take(&mut self.initialized_fields);
        self.initialized_fields = FxHashSet::default();

        self.scopes.push();
        let shape = self.arena.function_shape(ctor_shape).clone();
        for (param, &ty) in ctor.parameters.iter().zip(shape.parameters.iter()) {
            self.declare_value(&param.name, SymbolInfo::new(ty, SymbolKind::Let, param.id), false, param.span);
        }
        for stmt in &ctor.body {
            self.check_stmt(stmt);
        }
        self.scopes.pop();

        self.current_class = previous_class;
        self.in_constructor = previous_in_constructor;
        self.is_this_initialized = previous_this_initialized;
        self.is_checking_field_initializer = previous_checking_init;
        self.initialized_fields = previous_fields;
    }

    /// Checks a method/getter/setter body via [`Checker::check_function_expr`]
    /// (with `self.current_class` already set by the caller so `this`
    /// resolves inside it) and returns the resulting signature's shape id,
    /// with `is_final` recorded on that shape (getters/setters have no
    /// `final` keyword of their own, so callers always pass `false` for
    /// those).
    fn check_method_body(&mut self, function: &corevm_ast::FunctionExpr, is_final: bool) -> corevm_types::FunctionShapeId {
        let ty = self.check_function_expr(function);
        let shape_id = match self.arena.kind(ty) {
            TypeKind::Function(id) => *id,
            _ => unreachable!("check_function_expr always returns a Function type"),
        };
        self.arena.function_shape_mut(shape_id).is_final = is_final;
        shape_id
    }

    fn declare_type_parameters(&mut self, type_parameters: &[corevm_ast::TypeParamNode]) -> Vec<corevm_types::TypeParamId> {
        let mut ids = Vec::new();
        for tp in type_parameters {
            let default_type = tp.default_type.as_ref().map(|d| self.check_type_node(d));
            let name = self.interner.intern(&tp.name);
            let param_id = self.arena.type_param(TypeParamType { name, default_type });
            let param_ty = self.arena.type_parameter_ref(param_id);
            self.declare_type(&tp.name, SymbolInfo::new(param_ty, SymbolKind::Type, tp.id), tp.span);
            ids.push(param_id);
        }
        ids
    }

    pub(crate) fn check_interface_declaration(&mut self, decl: &InterfaceDeclaration) {
        let name_atom = self.interner.intern(&decl.name);
        let mut iface = InterfaceType::template(name_atom);

        self.scopes.push();
        iface.type_parameters = self.declare_type_parameters(&decl.type_parameters);
        iface.extends = decl.extends.iter().map(|t| self.check_type_node(t)).collect();
        for field in &decl.fields {
            let ty = self.check_type_node(&field.type_node);
            iface.fields.insert(self.interner.intern(&field.name), ty);
        }
        for method in &decl.methods {
            let ty = self.check_type_node(&method.type_node);
            let shape_id = match self.arena.kind(ty) {
                TypeKind::Function(id) => *id,
                _ => self.arena.push_function_shape(FunctionShape {
                    type_parameters: Vec::new(),
                    parameters: Vec::new(),
                    return_type: ty,
                    overloads: Vec::new(),
                    is_final: false,
                }),
            };
            iface.methods.insert(self.interner.intern(&method.name), shape_id);
        }
        self.scopes.pop();

        let type_id = self.arena.interface_type(iface);
        self.declare_type(&decl.name, SymbolInfo::new(type_id, SymbolKind::Type, decl.id), decl.span);
        self.context.set_inferred_type(decl.id, type_id);
    }

    pub(crate) fn check_mixin_declaration(&mut self, decl: &MixinDeclaration) {
        let name_atom = self.interner.intern(&decl.name);
        let mut mixin = MixinType {
            name: name_atom,
            type_parameters: Vec::new(),
            type_arguments: None,
            fields: IndexMap::new(),
            methods: IndexMap::new(),
            on_type: None,
            generic_source: None,
        };

        self.scopes.push();
        mixin.type_parameters = self.declare_type_parameters(&decl.type_parameters);
        mixin.on_type = decl.on_type.as_ref().map(|t| self.check_type_node(t));
        for member in &decl.members {
            match member {
                ClassMember::Field(f) => {
                    let ty = self.check_type_node(&f.type_node);
                    mixin.fields.insert(self.interner.intern(&f.name), ty);
                }
                ClassMember::Method(m) => {
                    let shape_id = self.check_method_body(&m.function, m.is_final);
                    mixin.methods.insert(self.interner.intern(&m.name), shape_id);
                }
                ClassMember::Getter(g) => {
                    let shape_id = self.check_method_body(&g.function, false);
                    mixin.methods.insert(self.interner.intern(&g.name), shape_id);
                }
                ClassMember::Setter(s) => {
                    let shape_id = self.check_method_body(&s.function, false);
                    mixin.methods.insert(self.interner.intern(&s.name), shape_id);
                }
                ClassMember::Constructor(_) => {
                    self.error(diagnostic_codes::INTERNAL_COMPILER_ERROR, decl.span, &["mixins cannot declare a constructor"]);
                }
            }
        }
        self.scopes.pop();

        let type_id = self.arena.mixin_type(mixin);
        self.declare_type(&decl.name, SymbolInfo::new(type_id, SymbolKind::Type, decl.id), decl.span);
        self.context.set_inferred_type(decl.id, type_id);
    }

    pub(crate) fn check_type_alias_declaration(&mut self, decl: &TypeAliasDeclaration) {
        self.scopes.push();
        let type_parameters = self.declare_type_parameters(&decl.type_parameters);
        let target = self.check_type_node(&decl.target);
        self.scopes.pop();

        let name_atom = self.interner.intern(&decl.name);
        let type_id = self.arena.alias_type(TypeAliasType {
            name: name_atom,
            target,
            type_parameters,
            is_distinct: decl.is_distinct,
        });
        self.declare_type(&decl.name, SymbolInfo::new(type_id, SymbolKind::Type, decl.id), decl.span);
        self.context.set_inferred_type(decl.id, type_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corevm_ast::testkit::{new_expr, this_expr, ty_i32, ty_name};
    use corevm_ast::{FieldMember, NodeIdGen, Param, Stmt};
    use corevm_common::{CheckerOptions, Span};

    fn empty_class(gen: &NodeIdGen, name: &str, is_abstract: bool, super_class: Option<corevm_ast::TypeNode>) -> ClassDeclaration {
        ClassDeclaration {
            id: gen.next(),
            span: Span::new(0, 0),
            name: name.to_string(),
            type_parameters: Vec::new(),
            super_class,
            implements: Vec::new(),
            is_final: false,
            is_abstract,
            is_extension: false,
            on_type: None,
            members: Vec::new(),
            is_exported: false,
        }
    }

    #[test]
    fn abstract_class_cannot_be_instantiated() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();
        checker.check_class_declaration(&empty_class(&gen, "Shape", true, None));

        let expr = new_expr(&gen, "Shape", Vec::new(), Vec::new());
        let ty = checker.check_expression(&expr);

        assert_eq!(ty, TypeId::UNKNOWN);
        assert!(checker
            .diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::CANNOT_INSTANTIATE_ABSTRACT_CLASS));
    }

    #[test]
    fn abstract_field_not_implemented_is_reported() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();

        let mut base = empty_class(&gen, "Base", true, None);
        base.members.push(ClassMember::Field(FieldMember {
            id: gen.next(),
            span: Span::new(0, 0),
            name: "x".to_string(),
            type_node: ty_i32(),
            is_static: false,
            is_private: false,
        }));
        checker.check_class_declaration(&base);

        let derived = empty_class(&gen, "Derived", false, Some(ty_name("Base")));
        checker.check_class_declaration(&derived);

        assert!(checker
            .diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::ABSTRACT_FIELD_NOT_IMPLEMENTED));
    }

    #[test]
    fn redeclaring_the_missing_field_silences_the_diagnostic() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();

        let mut base = empty_class(&gen, "Base", true, None);
        base.members.push(ClassMember::Field(FieldMember {
            id: gen.next(),
            span: Span::new(0, 0),
            name: "x".to_string(),
            type_node: ty_i32(),
            is_static: false,
            is_private: false,
        }));
        checker.check_class_declaration(&base);

        let mut derived = empty_class(&gen, "Derived", false, Some(ty_name("Base")));
        derived.members.push(ClassMember::Field(FieldMember {
            id: gen.next(),
            span: Span::new(0, 0),
            name: "x".to_string(),
            type_node: ty_i32(),
            is_static: false,
            is_private: false,
        }));
        checker.check_class_declaration(&derived);

        assert!(!checker
            .diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::ABSTRACT_FIELD_NOT_IMPLEMENTED));
    }

    #[test]
    fn this_before_super_is_reported() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();

        checker.check_class_declaration(&empty_class(&gen, "Base", false, None));

        let mut derived = empty_class(&gen, "Derived", false, Some(ty_name("Base")));
        derived.members.push(ClassMember::Constructor(ConstructorMember {
            id: gen.next(),
            span: Span::new(0, 0),
            parameters: Vec::<Param>::new(),
            body: vec![Stmt::ExpressionStatement(this_expr(&gen))],
        }));
        checker.check_class_declaration(&derived);

        assert!(checker.diagnostics.iter().any(|d| d.code == diagnostic_codes::THIS_BEFORE_SUPER));
    }

    #[test]
    fn field_read_before_initialized_is_reported() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();

        let mut class = empty_class(&gen, "Point", false, None);
        class.members.push(ClassMember::Field(FieldMember {
            id: gen.next(),
            span: Span::new(0, 0),
            name: "x".to_string(),
            type_node: ty_i32(),
            is_static: false,
            is_private: false,
        }));
        let read_this_x = corevm_ast::testkit::member(&gen, this_expr(&gen), "x");
        class.members.push(ClassMember::Constructor(ConstructorMember {
            id: gen.next(),
            span: Span::new(0, 0),
            parameters: Vec::new(),
            body: vec![Stmt::ExpressionStatement(read_this_x)],
        }));
        checker.check_class_declaration(&class);

        assert!(checker
            .diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::FIELD_USED_BEFORE_INITIALIZED));
    }

    fn method(gen: &NodeIdGen, name: &str, is_final: bool) -> ClassMember {
        ClassMember::Method(corevm_ast::MethodMember {
            id: gen.next(),
            span: Span::new(0, 0),
            name: name.to_string(),
            is_static: false,
            is_private: false,
            is_final,
            function: corevm_ast::FunctionExpr {
                id: gen.next(),
                span: Span::new(0, 0),
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                return_type: Some(ty_i32()),
                body: corevm_ast::FunctionBody::Expr(Box::new(corevm_ast::testkit::number(gen, "0"))),
            },
        })
    }

    #[test]
    fn final_method_call_site_is_static_dispatch() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();

        let mut class = empty_class(&gen, "Animal", false, None);
        class.members.push(method(&gen, "speak", true));
        checker.check_class_declaration(&class);

        let site = corevm_ast::testkit::member(&gen, new_expr(&gen, "Animal", Vec::new(), Vec::new()), "speak");
        let site_id = site.id;
        checker.check_expression(&site);

        assert_eq!(
            checker.context.binding(site_id).and_then(|b| b.dispatch_class().map(|_| b.is_static_dispatch())),
            Some(true)
        );
    }

    #[test]
    fn non_final_method_on_non_final_class_is_not_static_dispatch() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();

        let mut class = empty_class(&gen, "Animal", false, None);
        class.members.push(method(&gen, "speak", false));
        checker.check_class_declaration(&class);

        let site = corevm_ast::testkit::member(&gen, new_expr(&gen, "Animal", Vec::new(), Vec::new()), "speak");
        let site_id = site.id;
        checker.check_expression(&site);

        assert_eq!(
            checker.context.binding(site_id).and_then(|b| b.dispatch_class().map(|_| b.is_static_dispatch())),
            Some(false)
        );
    }

    #[test]
    fn super_call_with_wrong_argument_count_is_reported() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();

        let mut base = empty_class(&gen, "Base", false, None);
        base.members.push(ClassMember::Constructor(ConstructorMember {
            id: gen.next(),
            span: Span::new(0, 0),
            parameters: vec![Param { id: gen.next(), span: Span::new(0, 0), name: "x".to_string(), type_node: Some(ty_i32()) }],
            body: Vec::new(),
        }));
        checker.check_class_declaration(&base);

        let mut derived = empty_class(&gen, "Derived", false, Some(ty_name("Base")));
        derived.members.push(ClassMember::Constructor(ConstructorMember {
            id: gen.next(),
            span: Span::new(0, 0),
            parameters: Vec::new(),
            body: vec![Stmt::ExpressionStatement(corevm_ast::testkit::super_call(&gen, Vec::new()))],
        }));
        checker.check_class_declaration(&derived);

        assert!(checker.diagnostics.iter().any(|d| d.code == diagnostic_codes::ARGUMENT_COUNT_MISMATCH));
    }

    #[test]
    fn super_call_outside_a_class_with_a_superclass_is_invalid() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();

        let mut class = empty_class(&gen, "Lonely", false, None);
        class.members.push(ClassMember::Constructor(ConstructorMember {
            id: gen.next(),
            span: Span::new(0, 0),
            parameters: Vec::new(),
            body: vec![Stmt::ExpressionStatement(corevm_ast::testkit::super_call(&gen, Vec::new()))],
        }));
        checker.check_class_declaration(&class);

        assert!(checker.diagnostics.iter().any(|d| d.code == diagnostic_codes::INVALID_SUPER_CALL));
    }
}
