//! Structural payloads for the compound `TypeKind` variants.
//!
//! Kept as separate structs behind `*ShapeId` handles rather than inline in
//! `TypeKind` so that `TypeKind` itself stays small and `Copy`-ish: a type
//! tag and its out-of-line shape.

pub use corevm_ast::NumberName;
use corevm_common::Atom;
use indexmap::IndexMap;

use crate::ids::{FunctionShapeId, TypeId, TypeParamId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LiteralValue {
    Str(Atom),
    /// IEEE-754 bit pattern, so the value is `Eq`/`Hash`-able for interning
    /// and equality without `f64`'s partial ordering getting in the way.
    Num(u64),
    Bool(bool),
}

impl Eq for LiteralValue {}

impl std::hash::Hash for LiteralValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            LiteralValue::Str(a) => a.hash(state),
            LiteralValue::Num(bits) => bits.hash(state),
            LiteralValue::Bool(b) => b.hash(state),
        }
    }
}

impl LiteralValue {
    pub fn from_f64(value: f64) -> Self {
        LiteralValue::Num(value.to_bits())
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            LiteralValue::Num(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionShape {
    pub type_parameters: Vec<TypeParamId>,
    pub parameters: Vec<TypeId>,
    pub return_type: TypeId,
    /// Additional overload signatures, populated when multiple `let`
    /// declarations of the same function name were merged.
    pub overloads: Vec<FunctionShapeId>,
    /// `true` for a method declared `final` — one of the three inputs to a
    /// call site's `isStaticDispatch` (alongside the declaring class's own
    /// `isFinal` and `isExtension`). Always `false` for a plain function
    /// value, which has no notion of "final".
    pub is_final: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassType {
    pub name: Atom,
    pub type_parameters: Vec<TypeParamId>,
    pub type_arguments: Option<Vec<TypeId>>,
    pub fields: IndexMap<Atom, TypeId>,
    pub methods: IndexMap<Atom, FunctionShapeId>,
    pub constructor_type: Option<FunctionShapeId>,
    pub super_type: Option<TypeId>,
    pub implements: Vec<TypeId>,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_extension: bool,
    pub on_type: Option<TypeId>,
    pub generic_source: Option<TypeId>,
}

impl ClassType {
    pub fn template(name: Atom) -> Self {
        ClassType {
            name,
            type_parameters: Vec::new(),
            type_arguments: None,
            fields: IndexMap::new(),
            methods: IndexMap::new(),
            constructor_type: None,
            super_type: None,
            implements: Vec::new(),
            is_final: false,
            is_abstract: false,
            is_extension: false,
            on_type: None,
            generic_source: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceType {
    pub name: Atom,
    pub type_parameters: Vec<TypeParamId>,
    pub type_arguments: Option<Vec<TypeId>>,
    pub fields: IndexMap<Atom, TypeId>,
    pub methods: IndexMap<Atom, FunctionShapeId>,
    pub extends: Vec<TypeId>,
    pub generic_source: Option<TypeId>,
}

impl InterfaceType {
    pub fn template(name: Atom) -> Self {
        InterfaceType {
            name,
            type_parameters: Vec::new(),
            type_arguments: None,
            fields: IndexMap::new(),
            methods: IndexMap::new(),
            extends: Vec::new(),
            generic_source: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixinType {
    pub name: Atom,
    pub type_parameters: Vec<TypeParamId>,
    pub type_arguments: Option<Vec<TypeId>>,
    pub fields: IndexMap<Atom, TypeId>,
    pub methods: IndexMap<Atom, FunctionShapeId>,
    pub on_type: Option<TypeId>,
    pub generic_source: Option<TypeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeParamType {
    pub name: Atom,
    pub default_type: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasType {
    pub name: Atom,
    pub target: TypeId,
    pub type_parameters: Vec<TypeParamId>,
    pub is_distinct: bool,
}
