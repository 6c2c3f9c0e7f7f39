//! The type system: canonical `Type` representation, interning,
//! `substitute`, `instantiate`, `isAssignableTo`, `isAdaptable`, union
//! validation, `typeToString`.

pub mod adaptability;
pub mod arena;
pub mod assignability;
pub mod display;
pub mod ids;
pub mod instantiate;
pub mod shapes;
pub mod substitute;
pub mod union;

pub use adaptability::is_adaptable;
pub use arena::{TypeArena, TypeKind};
pub use assignability::is_assignable_to;
pub use display::type_to_string;
pub use ids::{AliasId, ClassShapeId, FunctionShapeId, InterfaceShapeId, MixinShapeId, TypeId, TypeParamId};
pub use instantiate::instantiate;
pub use shapes::{
    ClassType, FunctionShape, InterfaceType, LiteralValue, MixinType, NumberName, TypeAliasType,
    TypeParamType,
};
pub use substitute::{substitute, SubstitutionMap};
pub use union::{validate_union, UnionValidationError};
