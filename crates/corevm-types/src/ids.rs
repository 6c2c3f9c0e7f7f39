//! Interned handles into a `TypeArena`.
//!
//! `TypeId` indexes the flat type table; class/interface/mixin/function
//! types carry their (larger, less frequently compared) structural payload
//! in a side arena instead of inline, accessed via a `TypeId` and its
//! `*_shape(shape_id)` accessors.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const NEVER: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);
    pub const NULL: TypeId = TypeId(2);
    pub const ANY: TypeId = TypeId(3);
    pub const ANY_REF: TypeId = TypeId(4);
    pub const UNKNOWN: TypeId = TypeId(5);
    pub const BOOLEAN: TypeId = TypeId(6);
    pub const BYTE_ARRAY: TypeId = TypeId(7);
    pub const I32: TypeId = TypeId(8);
    pub const I64: TypeId = TypeId(9);
    pub const U32: TypeId = TypeId(10);
    pub const U64: TypeId = TypeId(11);
    pub const F32: TypeId = TypeId(12);
    pub const F64: TypeId = TypeId(13);

    /// Number of well-known singletons pre-populated by `TypeArena::new`.
    pub(crate) const WELL_KNOWN_COUNT: u32 = 14;

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

macro_rules! shape_id {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

shape_id!(ClassShapeId);
shape_id!(InterfaceShapeId);
shape_id!(MixinShapeId);
shape_id!(FunctionShapeId);
shape_id!(TypeParamId);
shape_id!(AliasId);
