//! Small AST construction helpers shared by every crate's test fixtures.
//!
//! There is no parser in this workspace, so integration tests across
//! `corevm-types`/`corevm-checker`/`corevm-usage` build their sample
//! programs by hand. Centralizing the boilerplate here keeps those
//! fixtures readable.

use crate::expr::{BinaryOp, Expr, ExprKind, FunctionBody, FunctionExpr, Param};
use crate::node_id::NodeIdGen;
use crate::stmt::{Stmt, VarKind, VariableDeclaration};
use crate::type_node::{TypeNode, TypeNodeKind};
use corevm_common::span::Span;

fn dummy_span() -> Span {
    Span::new(0, 0)
}

pub fn ident(gen: &NodeIdGen, name: &str) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::Identifier(name.to_string()),
    }
}

pub fn number(gen: &NodeIdGen, raw: &str) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::NumberLiteral {
            raw: raw.to_string(),
        },
    }
}

pub fn string_lit(gen: &NodeIdGen, value: &str) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::StringLiteral(value.to_string()),
    }
}

pub fn boolean(gen: &NodeIdGen, value: bool) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::BooleanLiteral(value),
    }
}

pub fn call(gen: &NodeIdGen, callee: Expr, arguments: Vec<Expr>) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::Call {
            callee: Box::new(callee),
            type_arguments: Vec::new(),
            arguments,
        },
    }
}

pub fn call_with_type_args(
    gen: &NodeIdGen,
    callee: Expr,
    type_arguments: Vec<TypeNode>,
    arguments: Vec<Expr>,
) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::Call {
            callee: Box::new(callee),
            type_arguments,
            arguments,
        },
    }
}

pub fn binary(gen: &NodeIdGen, op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
    }
}

pub fn member(gen: &NodeIdGen, object: Expr, property: &str) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::Member {
            object: Box::new(object),
            property: property.to_string(),
            is_private: false,
        },
    }
}

pub fn new_expr(
    gen: &NodeIdGen,
    class_name: &str,
    type_arguments: Vec<TypeNode>,
    arguments: Vec<Expr>,
) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::New {
            class_name: class_name.to_string(),
            type_arguments,
            arguments,
        },
    }
}

pub fn super_call(gen: &NodeIdGen, arguments: Vec<Expr>) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::SuperCall { arguments },
    }
}

pub fn this_expr(gen: &NodeIdGen) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::ThisExpression,
    }
}

pub fn assign(gen: &NodeIdGen, target: Expr, value: Expr) -> Expr {
    Expr {
        id: gen.next(),
        span: dummy_span(),
        kind: ExprKind::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        },
    }
}

/// A zero-parameter arrow whose body is a single expression:
/// `() => <expr>`.
pub fn thunk(gen: &NodeIdGen, body: Expr) -> FunctionExpr {
    FunctionExpr {
        id: gen.next(),
        span: dummy_span(),
        type_parameters: Vec::new(),
        parameters: Vec::new(),
        return_type: None,
        body: FunctionBody::Expr(Box::new(body)),
    }
}

pub fn arrow(
    gen: &NodeIdGen,
    parameters: Vec<Param>,
    return_type: Option<TypeNode>,
    body: Expr,
) -> FunctionExpr {
    FunctionExpr {
        id: gen.next(),
        span: dummy_span(),
        type_parameters: Vec::new(),
        parameters,
        return_type,
        body: FunctionBody::Expr(Box::new(body)),
    }
}

pub fn param(gen: &NodeIdGen, name: &str, type_node: TypeNode) -> Param {
    Param {
        id: gen.next(),
        span: dummy_span(),
        name: name.to_string(),
        type_node: Some(type_node),
    }
}

pub fn let_decl(gen: &NodeIdGen, name: &str, init: Expr, exported: bool) -> Stmt {
    Stmt::VariableDeclaration(VariableDeclaration {
        id: gen.next(),
        span: dummy_span(),
        name: name.to_string(),
        kind: VarKind::Let,
        declared_type: None,
        init: Some(init),
        is_exported: exported,
    })
}

pub fn var_decl(gen: &NodeIdGen, name: &str, init: Option<Expr>) -> Stmt {
    Stmt::VariableDeclaration(VariableDeclaration {
        id: gen.next(),
        span: dummy_span(),
        name: name.to_string(),
        kind: VarKind::Var,
        declared_type: None,
        init,
        is_exported: false,
    })
}

pub fn ty(kind: TypeNodeKind) -> TypeNode {
    TypeNode {
        id: crate::node_id::NodeId::DUMMY,
        span: dummy_span(),
        kind,
    }
}

pub fn ty_i32() -> TypeNode {
    ty(TypeNodeKind::Number(crate::type_node::NumberName::I32))
}

pub fn ty_name(name: &str) -> TypeNode {
    ty(TypeNodeKind::NameRef {
        name: name.to_string(),
        type_arguments: Vec::new(),
    })
}
