//! Union validation — run by the checker before calling
//! `TypeArena::union` to build a `Union { Type }` type node from a written
//! `A | B | C` annotation.

use corevm_common::Interner;

use crate::arena::{TypeArena, TypeKind};
use crate::ids::TypeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnionValidationError {
    /// A bare `Number`/`Boolean` member (literal members are fine — they
    /// are runtime-discriminable).
    PrimitiveMember(TypeId),
    /// Two extension members whose `onType`s erase to the same underlying
    /// type.
    AmbiguousExtensionMembers(TypeId, TypeId),
    /// Two distinct aliases with different names but mutually-assignable
    /// targets — indistinguishable at runtime.
    AmbiguousDistinctAliases(TypeId, TypeId),
}

pub fn validate_union(
    members: &[TypeId],
    arena: &mut TypeArena,
    interner: &Interner,
) -> Result<(), UnionValidationError> {
    for &member in members {
        if matches!(arena.kind(member), TypeKind::Number(_) | TypeKind::Boolean) {
            return Err(UnionValidationError::PrimitiveMember(member));
        }
    }

    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            let (a, b) = (members[i], members[j]);

            if let (Some(on_a), Some(on_b)) = (extension_on_type(a, arena), extension_on_type(b, arena)) {
                if crate::assignability::is_assignable_to(on_a, on_b, arena, interner)
                    && crate::assignability::is_assignable_to(on_b, on_a, arena, interner)
                {
                    return Err(UnionValidationError::AmbiguousExtensionMembers(a, b));
                }
            }

            if let (Some((name_a, target_a)), Some((name_b, target_b))) =
                (distinct_alias_parts(a, arena), distinct_alias_parts(b, arena))
            {
                if name_a != name_b
                    && crate::assignability::is_assignable_to(target_a, target_b, arena, interner)
                    && crate::assignability::is_assignable_to(target_b, target_a, arena, interner)
                {
                    return Err(UnionValidationError::AmbiguousDistinctAliases(a, b));
                }
            }
        }
    }

    Ok(())
}

fn extension_on_type(id: TypeId, arena: &TypeArena) -> Option<TypeId> {
    match arena.kind(id) {
        TypeKind::Class(shape_id) => {
            let class = arena.class_shape(*shape_id);
            class.is_extension.then_some(class.on_type).flatten()
        }
        _ => None,
    }
}

fn distinct_alias_parts(id: TypeId, arena: &TypeArena) -> Option<(corevm_common::Atom, TypeId)> {
    match arena.kind(id) {
        TypeKind::TypeAlias(alias_id) => {
            let alias = arena.alias(*alias_id);
            alias.is_distinct.then_some((alias.name, alias.target))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bare_number_member() {
        let mut arena = TypeArena::new();
        let interner = Interner::new();
        let err = validate_union(&[TypeId::I32, TypeId::BOOLEAN], &mut arena, &interner);
        assert!(matches!(err, Err(UnionValidationError::PrimitiveMember(_))));
    }

    #[test]
    fn accepts_reference_type_members() {
        let mut arena = TypeArena::new();
        let interner = Interner::new();
        let array = arena.array(TypeId::I32);
        let tuple = arena.tuple(vec![TypeId::I32, TypeId::BOOLEAN]);
        assert!(validate_union(&[array, tuple], &mut arena, &interner).is_ok());
    }
}
