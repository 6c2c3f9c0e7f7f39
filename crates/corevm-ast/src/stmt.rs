//! Statements and top-level declarations.
//!
//! A "Declaration" in the sense of the glossary (an AST node introducing a
//! name into scope) is simply any `Stmt` variant here that carries a
//! `NodeId` — there is no separate `Declaration` type; the checker and
//! usage analyzer key their side tables on that `NodeId` directly.

use crate::expr::{Expr, FunctionExpr, Param};
use crate::node_id::NodeId;
use crate::type_node::{TypeNode, TypeParamNode};
use corevm_common::span::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    VariableDeclaration(VariableDeclaration),
    ClassDeclaration(ClassDeclaration),
    InterfaceDeclaration(InterfaceDeclaration),
    MixinDeclaration(MixinDeclaration),
    TypeAliasDeclaration(TypeAliasDeclaration),
    ImportDeclaration(ImportDeclaration),

    ExpressionStatement(Expr),
    Return {
        id: NodeId,
        span: Span,
        value: Option<Expr>,
    },
    If {
        id: NodeId,
        span: Span,
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    Block {
        id: NodeId,
        span: Span,
        body: Vec<Stmt>,
    },
}

impl Stmt {
    pub fn id(&self) -> NodeId {
        match self {
            Stmt::VariableDeclaration(d) => d.id,
            Stmt::ClassDeclaration(d) => d.id,
            Stmt::InterfaceDeclaration(d) => d.id,
            Stmt::MixinDeclaration(d) => d.id,
            Stmt::TypeAliasDeclaration(d) => d.id,
            Stmt::ImportDeclaration(d) => d.id,
            Stmt::ExpressionStatement(e) => e.id,
            Stmt::Return { id, .. } => *id,
            Stmt::If { id, .. } => *id,
            Stmt::Block { id, .. } => *id,
        }
    }

    /// Whether this statement introduces a name that can be exported /
    /// targeted by usage analysis as a top-level declaration.
    pub fn is_top_level_declaration(&self) -> bool {
        matches!(
            self,
            Stmt::VariableDeclaration(_)
                | Stmt::ClassDeclaration(_)
                | Stmt::InterfaceDeclaration(_)
                | Stmt::MixinDeclaration(_)
                | Stmt::TypeAliasDeclaration(_)
                | Stmt::ImportDeclaration(_)
        )
    }

    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Stmt::VariableDeclaration(d) => Some(&d.name),
            Stmt::ClassDeclaration(d) => Some(&d.name),
            Stmt::InterfaceDeclaration(d) => Some(&d.name),
            Stmt::MixinDeclaration(d) => Some(&d.name),
            Stmt::TypeAliasDeclaration(d) => Some(&d.name),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Let,
    Var,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub kind: VarKind,
    pub declared_type: Option<TypeNode>,
    pub init: Option<Expr>,
    pub is_exported: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMember {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub type_node: TypeNode,
    pub is_static: bool,
    pub is_private: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodMember {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub is_static: bool,
    pub is_private: bool,
    pub is_final: bool,
    pub function: FunctionExpr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessorMember {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub is_private: bool,
    pub function: FunctionExpr,
}

/// `#new(...) { ... }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorMember {
    pub id: NodeId,
    pub span: Span,
    pub parameters: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassMember {
    Field(FieldMember),
    Method(MethodMember),
    Getter(AccessorMember),
    Setter(AccessorMember),
    Constructor(ConstructorMember),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub type_parameters: Vec<TypeParamNode>,
    pub super_class: Option<TypeNode>,
    pub implements: Vec<TypeNode>,
    pub is_final: bool,
    pub is_abstract: bool,
    /// `class Foo extends FixedArray<i32> on FixedArray<i32>` style
    /// extension classes — `on_type` is the underlying type the class
    /// attaches methods to.
    pub is_extension: bool,
    pub on_type: Option<TypeNode>,
    pub members: Vec<ClassMember>,
    pub is_exported: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceMemberSig {
    pub name: String,
    pub type_node: TypeNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDeclaration {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub type_parameters: Vec<TypeParamNode>,
    pub extends: Vec<TypeNode>,
    pub fields: Vec<InterfaceMemberSig>,
    pub methods: Vec<InterfaceMemberSig>,
    pub is_exported: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixinDeclaration {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub type_parameters: Vec<TypeParamNode>,
    pub on_type: Option<TypeNode>,
    pub members: Vec<ClassMember>,
    pub is_exported: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasDeclaration {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub type_parameters: Vec<TypeParamNode>,
    pub target: TypeNode,
    pub is_distinct: bool,
    pub is_exported: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub imported_name: String,
    pub local_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub id: NodeId,
    pub span: Span,
    pub module_path: String,
    pub specifiers: Vec<ImportSpecifier>,
}
