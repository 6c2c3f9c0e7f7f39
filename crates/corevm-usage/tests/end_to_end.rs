//! Whole-pipeline scenarios: a `Checker` pass followed by `analyze`, over
//! hand-built programs exercising the checker/usage-analysis boundary end
//! to end rather than either crate in isolation.

use corevm_ast::testkit::{call, ident, let_decl, member, new_expr, number, param, super_call, this_expr, ty_i32, ty_name};
use corevm_ast::{
    ClassDeclaration, ClassMember, ConstructorMember, Expr, ExprKind, FunctionBody, FunctionExpr, MethodMember, Module,
    NodeIdGen, Program, Stmt, TypeParamNode, VarKind, VariableDeclaration,
};
use corevm_checker::Checker;
use corevm_common::{CheckerOptions, Span};
use corevm_usage::{analyze, UsageAnalysisOptions};

fn func_expr(f: FunctionExpr) -> Expr {
    Expr { id: f.id, span: f.span, kind: ExprKind::Function(f) }
}

fn block_fn(gen: &NodeIdGen, parameters: Vec<corevm_ast::Param>, return_type: Option<corevm_ast::TypeNode>, body: Vec<Stmt>) -> Expr {
    func_expr(FunctionExpr { id: gen.next(), span: Span::new(0, 0), type_parameters: Vec::new(), parameters, return_type, body: FunctionBody::Block(body) })
}

fn method(gen: &NodeIdGen, name: &str, return_type: corevm_ast::TypeNode, returns: Expr) -> ClassMember {
    ClassMember::Method(MethodMember {
        id: gen.next(),
        span: Span::new(0, 0),
        name: name.to_string(),
        is_static: false,
        is_private: false,
        is_final: false,
        function: FunctionExpr {
            id: gen.next(),
            span: Span::new(0, 0),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: Some(return_type),
            body: FunctionBody::Block(vec![Stmt::Return { id: gen.next(), span: Span::new(0, 0), value: Some(returns) }]),
        },
    })
}

fn field(gen: &NodeIdGen, name: &str, type_node: corevm_ast::TypeNode) -> ClassMember {
    ClassMember::Field(corevm_ast::FieldMember { id: gen.next(), span: Span::new(0, 0), name: name.to_string(), type_node, is_static: false, is_private: false })
}

fn class(gen: &NodeIdGen, name: &str, super_class: Option<corevm_ast::TypeNode>, members: Vec<ClassMember>) -> ClassDeclaration {
    ClassDeclaration {
        id: gen.next(),
        span: Span::new(0, 0),
        name: name.to_string(),
        type_parameters: Vec::new(),
        super_class,
        implements: Vec::new(),
        is_final: false,
        is_abstract: false,
        is_extension: false,
        on_type: None,
        members,
        is_exported: false,
    }
}

fn var_decl_typed(gen: &NodeIdGen, name: &str, declared_type: Option<corevm_ast::TypeNode>, init: Expr) -> Stmt {
    Stmt::VariableDeclaration(VariableDeclaration {
        id: gen.next(),
        span: Span::new(0, 0),
        name: name.to_string(),
        kind: VarKind::Let,
        declared_type,
        init: Some(init),
        is_exported: false,
    })
}

fn run(module: Module) -> (Checker, corevm_usage::UsageAnalysisResult) {
    let entry = module.path.clone();
    let mut program = Program::new(entry);
    program.add_module(module);
    let mut checker = Checker::new(CheckerOptions::default());
    checker.check_program(&program);
    let result = analyze(&program, &checker.context, &checker.arena, UsageAnalysisOptions::default());
    (checker, result)
}

#[test]
fn exported_transitive_function_chain_is_fully_used() {
    let gen = NodeIdGen::new();

    let helper = let_decl(&gen, "helper", block_fn(&gen, Vec::new(), None, vec![Stmt::Return { id: gen.next(), span: Span::new(0, 0), value: Some(number(&gen, "1")) }]), false);
    let helper_id = helper.id();

    let used = let_decl(
        &gen,
        "used",
        block_fn(&gen, Vec::new(), None, vec![Stmt::Return { id: gen.next(), span: Span::new(0, 0), value: Some(call(&gen, ident(&gen, "helper"), Vec::new())) }]),
        false,
    );
    let used_id = used.id();

    let main = let_decl(
        &gen,
        "main",
        block_fn(&gen, Vec::new(), None, vec![Stmt::Return { id: gen.next(), span: Span::new(0, 0), value: Some(call(&gen, ident(&gen, "used"), Vec::new())) }]),
        true,
    );
    let main_id = main.id();

    let mut module = Module::new("main");
    module.body = vec![helper, used, main];
    module.exports.insert("main".to_string(), main_id);

    let (checker, result) = run(module);

    assert!(checker.diagnostics.is_empty());
    assert!(result.is_used(helper_id));
    assert!(result.is_used(used_id));
    assert!(result.is_used(main_id));
    assert!(result.is_module_used("main"));
}

#[test]
fn unused_base_class_is_used_through_an_instantiated_subclass() {
    let gen = NodeIdGen::new();

    let base_ctor = ClassMember::Constructor(ConstructorMember {
        id: gen.next(),
        span: Span::new(0, 0),
        parameters: Vec::new(),
        body: vec![Stmt::ExpressionStatement(corevm_ast::testkit::assign(&gen, member(&gen, this_expr(&gen), "x"), number(&gen, "0")))],
    });
    let base = class(&gen, "Base", None, vec![field(&gen, "x", ty_i32()), base_ctor]);
    let base_id = base.id;

    let derived_ctor = ClassMember::Constructor(ConstructorMember {
        id: gen.next(),
        span: Span::new(0, 0),
        parameters: Vec::new(),
        body: vec![Stmt::ExpressionStatement(super_call(&gen, Vec::new()))],
    });
    let derived = class(&gen, "Derived", Some(ty_name("Base")), vec![derived_ctor]);
    let derived_id = derived.id;

    let main = let_decl(&gen, "main", block_fn(&gen, Vec::new(), None, vec![Stmt::Return { id: gen.next(), span: Span::new(0, 0), value: Some(new_expr(&gen, "Derived", Vec::new(), Vec::new())) }]), true);
    let main_id = main.id();

    let mut module = Module::new("main");
    module.body = vec![Stmt::ClassDeclaration(base), Stmt::ClassDeclaration(derived), main];
    module.exports.insert("main".to_string(), main_id);

    let (checker, result) = run(module);

    assert!(checker.diagnostics.is_empty());
    assert!(result.is_used(derived_id));
    assert!(result.is_used(base_id), "Base should be reachable through Derived's `extends Base` clause");
}

#[test]
fn polymorphic_method_call_propagates_to_the_overriding_subclass() {
    let gen = NodeIdGen::new();

    let animal = class(&gen, "Animal", None, vec![method(&gen, "speak", ty_i32(), number(&gen, "0"))]);
    let animal_id = animal.id;

    let dog = class(&gen, "Dog", Some(ty_name("Animal")), vec![method(&gen, "speak", ty_i32(), number(&gen, "1"))]);
    let dog_id = dog.id;

    let main_body = vec![
        var_decl_typed(&gen, "a", Some(ty_name("Animal")), new_expr(&gen, "Dog", Vec::new(), Vec::new())),
        Stmt::Return { id: gen.next(), span: Span::new(0, 0), value: Some(call(&gen, member(&gen, ident(&gen, "a"), "speak"), Vec::new())) },
    ];
    let main = let_decl(&gen, "main", block_fn(&gen, Vec::new(), Some(ty_i32()), main_body), true);
    let main_id = main.id();

    let mut module = Module::new("main");
    module.body = vec![Stmt::ClassDeclaration(animal), Stmt::ClassDeclaration(dog), main];
    module.exports.insert("main".to_string(), main_id);

    let (mut checker, result) = run(module);

    assert!(checker.diagnostics.is_empty());
    assert!(result.is_used(dog_id));
    assert!(result.is_used(animal_id));

    let dog_ty = checker.context.inferred_type(dog_id).expect("Dog was checked");
    let speak = checker.interner.intern("speak");
    assert!(result.is_method_used(&checker.arena, dog_ty, speak), "polymorphic call on Animal should propagate to Dog");
}

#[test]
fn generic_identity_call_is_fully_inferred_at_the_call_site() {
    let gen = NodeIdGen::new();

    let type_param = TypeParamNode { id: gen.next(), span: Span::new(0, 0), name: "T".to_string(), default_type: None };
    let id_fn = func_expr(FunctionExpr {
        id: gen.next(),
        span: Span::new(0, 0),
        type_parameters: vec![type_param],
        parameters: vec![param(&gen, "x", ty_name("T"))],
        return_type: Some(ty_name("T")),
        body: FunctionBody::Expr(Box::new(ident(&gen, "x"))),
    });
    let id_decl = let_decl(&gen, "id", id_fn, false);

    let call_expr = call(&gen, ident(&gen, "id"), vec![number(&gen, "42")]);
    let call_id = call_expr.id;
    let main = let_decl(&gen, "main", block_fn(&gen, Vec::new(), Some(ty_i32()), vec![Stmt::Return { id: gen.next(), span: Span::new(0, 0), value: Some(call_expr) }]), true);
    let main_id = main.id();

    let mut module = Module::new("main");
    module.body = vec![id_decl, main];
    module.exports.insert("main".to_string(), main_id);

    let (checker, _result) = run(module);

    assert!(checker.diagnostics.is_empty());
    assert_eq!(checker.context.inferred_type_arguments(call_id), Some(&[corevm_types::TypeId::I32][..]));
    assert_eq!(checker.context.inferred_type(call_id), Some(corevm_types::TypeId::I32));
}

#[test]
fn instantiating_an_abstract_class_reports_exactly_one_diagnostic() {
    let gen = NodeIdGen::new();

    let mut a = class(&gen, "A", None, vec![field(&gen, "x", ty_i32())]);
    a.is_abstract = true;

    let main = let_decl(&gen, "main", block_fn(&gen, Vec::new(), None, vec![Stmt::ExpressionStatement(new_expr(&gen, "A", Vec::new(), Vec::new()))]), true);
    let main_id = main.id();

    let mut module = Module::new("main");
    module.body = vec![Stmt::ClassDeclaration(a), main];
    module.exports.insert("main".to_string(), main_id);

    let (checker, _result) = run(module);

    assert_eq!(checker.diagnostics.len(), 1);
    assert_eq!(checker.diagnostics.iter().next().unwrap().code, corevm_common::diagnostics::diagnostic_codes::CANNOT_INSTANTIATE_ABSTRACT_CLASS);
}

#[test]
fn write_only_field_is_distinguished_from_a_read_field() {
    let gen = NodeIdGen::new();

    let ctor = ClassMember::Constructor(ConstructorMember {
        id: gen.next(),
        span: Span::new(0, 0),
        parameters: vec![param(&gen, "n", ty_i32()), param(&gen, "id", ty_i32())],
        body: vec![
            Stmt::ExpressionStatement(corevm_ast::testkit::assign(&gen, member(&gen, this_expr(&gen), "name"), ident(&gen, "n"))),
            Stmt::ExpressionStatement(corevm_ast::testkit::assign(&gen, member(&gen, this_expr(&gen), "unusedId"), ident(&gen, "id"))),
        ],
    });
    let u = class(&gen, "U", None, vec![field(&gen, "name", ty_i32()), field(&gen, "unusedId", ty_i32()), ctor]);
    let u_id = u.id;

    let main_body = vec![
        var_decl_typed(&gen, "u", None, new_expr(&gen, "U", Vec::new(), vec![number(&gen, "42"), number(&gen, "999")])),
        Stmt::Return { id: gen.next(), span: Span::new(0, 0), value: Some(member(&gen, ident(&gen, "u"), "name")) },
    ];
    let main = let_decl(&gen, "main", block_fn(&gen, Vec::new(), Some(ty_i32()), main_body), true);
    let main_id = main.id();

    let mut module = Module::new("main");
    module.body = vec![Stmt::ClassDeclaration(u), main];
    module.exports.insert("main".to_string(), main_id);

    let (checker, result) = run(module);
    assert!(checker.diagnostics.is_empty());

    let u_ty = checker.context.inferred_type(u_id).expect("U was checked");
    let name = checker.interner.intern("name");
    let unused_id = checker.interner.intern("unusedId");

    let name_usage = result.get_field_usage(u_ty, name).expect("name field usage recorded");
    assert!(name_usage.is_read);
    assert!(name_usage.is_written);

    let unused_usage = result.get_field_usage(u_ty, unused_id).expect("unusedId field usage recorded");
    assert!(!unused_usage.is_read);
    assert!(unused_usage.is_written);
}
