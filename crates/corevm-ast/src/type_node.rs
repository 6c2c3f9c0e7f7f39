//! Type annotations as written in source — the input to the type system's
//! type-node checking step. Distinct from `corevm_types::Type`, the
//! resolved semantic type these annotations are checked *into*.

use crate::node_id::NodeId;
use corevm_common::span::Span;

/// A parsed type annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeNode {
    pub id: NodeId,
    pub span: Span,
    pub kind: TypeNodeKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeNodeKind {
    /// Nullary keyword types: `never`, `void`, `null`, `any`, `anyref`,
    /// `unknown`, `boolean`, `bytearray`.
    Never,
    Void,
    Null,
    Any,
    AnyRef,
    Unknown,
    Boolean,
    ByteArray,

    /// One of `i32, i64, u32, u64, f32, f64`.
    Number(NumberName),

    /// A named reference, optionally generic: `List<i32>`, `Animal`.
    NameRef {
        name: String,
        type_arguments: Vec<TypeNode>,
    },

    /// `T[]`-style growable array.
    Array(Box<TypeNode>),

    /// `FixedArray<T>` — the well-known fixed-length array class.
    FixedArray(Box<TypeNode>),

    /// `[T, U, V]`.
    Tuple(Vec<TypeNode>),

    /// `{ x: i32, y: i32 }` — a structural record type.
    Record(Vec<RecordFieldNode>),

    /// `(a: T, b: U) => R`.
    Function {
        type_parameters: Vec<TypeParamNode>,
        parameters: Vec<TypeNode>,
        return_type: Box<TypeNode>,
    },

    /// `A | B | C`.
    Union(Vec<TypeNode>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberName {
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordFieldNode {
    pub name: String,
    pub type_node: TypeNode,
}

/// A type parameter declaration site: `<T = i32>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamNode {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub default_type: Option<TypeNode>,
}
