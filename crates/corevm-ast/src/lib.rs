//! AST node shapes — the contract between a parser (out of this
//! repository's scope) and the semantic middle-end.
//!
//! This crate defines *shapes only*: it has no parser, and it stores no
//! semantic annotations on its nodes. `inferredType`, `resolvedBinding` and
//! friends live in side tables owned by `corevm-checker`, keyed by
//! `NodeId`.

pub mod expr;
pub mod module;
pub mod node_id;
pub mod stmt;
pub mod testkit;
pub mod type_node;

pub use expr::{BinaryOp, Expr, ExprKind, FunctionBody, FunctionExpr, Param, RecordLiteralField, TemplatePart};
pub use module::{Module, Program};
pub use node_id::{NodeId, NodeIdGen};
pub use stmt::{
    AccessorMember, ClassDeclaration, ClassMember, ConstructorMember, FieldMember,
    ImportDeclaration, ImportSpecifier, InterfaceDeclaration, InterfaceMemberSig, MethodMember,
    MixinDeclaration, Stmt, TypeAliasDeclaration, VarKind, VariableDeclaration,
};
pub use type_node::{NumberName, TypeNode, TypeNodeKind, TypeParamNode};
