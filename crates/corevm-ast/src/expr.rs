//! Expression nodes.
//!
//! These carry no type/binding fields — the checker writes `inferredType`,
//! `inferredTypeArguments` and `resolvedOperatorMethod` into side tables
//! keyed by `Expr::id`.

use crate::node_id::NodeId;
use crate::stmt::Stmt;
use crate::type_node::TypeNode;
use corevm_common::span::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Identifier(String),
    ThisExpression,
    NullLiteral,
    BooleanLiteral(bool),
    /// `raw` is kept verbatim: a `.` in the raw text selects `f32` over
    /// `i32`.
    NumberLiteral {
        raw: String,
    },
    StringLiteral(String),
    TemplateLiteral(Vec<TemplatePart>),
    ArrayLiteral(Vec<Expr>),
    TupleLiteral(Vec<Expr>),
    RecordLiteral(Vec<RecordLiteralField>),

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        type_arguments: Vec<TypeNode>,
        arguments: Vec<Expr>,
    },

    /// `super(...)` — only legal as the callee-position of a `Call` inside
    /// a constructor, but modeled as its own expression kind so the checker
    /// can recognize it without peeking into `Call::callee`.
    SuperCall {
        arguments: Vec<Expr>,
    },

    New {
        class_name: String,
        type_arguments: Vec<TypeNode>,
        arguments: Vec<Expr>,
    },

    Member {
        object: Box<Expr>,
        property: String,
        /// `#`-prefixed member access.
        is_private: bool,
    },

    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },

    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    Function(FunctionExpr),

    Throw(Box<Expr>),

    Range {
        from: Option<Box<Expr>>,
        to: Option<Box<Expr>>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplatePart {
    Text(String),
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLiteralField {
    pub name: String,
    pub value: Expr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
}

impl BinaryOp {
    /// True for `==`/`!=`, which require mutual assignability rather than
    /// identical numeric kinds.
    pub fn is_equality(self) -> bool {
        matches!(self, BinaryOp::Eq | BinaryOp::NotEq)
    }

    /// True for ordering/equality comparisons, whose result type is always
    /// `Boolean`.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
        )
    }

    /// The operator-overload method name a class may define for this
    /// operator (e.g. `==`), used when resolving `resolvedOperatorMethod`.
    pub fn method_name(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// A parameter in a function expression's parameter list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub type_node: Option<TypeNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionBody {
    Block(Vec<Stmt>),
    Expr(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionExpr {
    pub id: NodeId,
    pub span: Span,
    pub type_parameters: Vec<crate::type_node::TypeParamNode>,
    pub parameters: Vec<Param>,
    pub return_type: Option<TypeNode>,
    pub body: FunctionBody,
}
