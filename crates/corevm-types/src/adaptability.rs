//! `isAdaptable(source, target)` — function-to-function
//! conversion: covariant return, contravariant parameters, source may drop
//! trailing parameters.

use corevm_common::Interner;

use crate::arena::{TypeArena, TypeKind};
use crate::assignability::is_assignable_to;
use crate::ids::TypeId;

pub fn is_adaptable(source: TypeId, target: TypeId, arena: &mut TypeArena, interner: &Interner) -> bool {
    let (source_shape, target_shape) = match (arena.kind(source), arena.kind(target)) {
        (TypeKind::Function(s), TypeKind::Function(t)) => (*s, *t),
        _ => return false,
    };
    let source_fn = arena.function_shape(source_shape).clone();
    let target_fn = arena.function_shape(target_shape).clone();

    if source_fn.parameters.len() > target_fn.parameters.len() {
        return false;
    }
    if !is_assignable_to(source_fn.return_type, target_fn.return_type, arena, interner) {
        return false;
    }
    for (i, &source_param) in source_fn.parameters.iter().enumerate() {
        let target_param = target_fn.parameters[i];
        // Contravariant: the target's parameter type must be assignable to
        // the source's — the adapted function only promises to accept what
        // the source declared, so callers giving it the wider target
        // parameter must still satisfy the narrower source expectation.
        if !is_assignable_to(target_param, source_param, arena, interner) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::FunctionShape;

    fn function_of(arena: &mut TypeArena, parameters: Vec<TypeId>, return_type: TypeId) -> TypeId {
        arena.function_type(FunctionShape {
            type_parameters: Vec::new(),
            parameters,
            return_type,
            overloads: Vec::new(),
            is_final: false,
        })
    }

    #[test]
    fn identical_signatures_are_adaptable() {
        let mut arena = TypeArena::new();
        let f = function_of(&mut arena, vec![TypeId::I32], TypeId::BOOLEAN);
        let interner = Interner::new();
        assert!(is_adaptable(f, f, &mut arena, &interner));
    }

    #[test]
    fn source_may_drop_trailing_parameters() {
        let mut arena = TypeArena::new();
        let source = function_of(&mut arena, vec![], TypeId::VOID);
        let target = function_of(&mut arena, vec![TypeId::I32], TypeId::VOID);
        let interner = Interner::new();
        assert!(is_adaptable(source, target, &mut arena, &interner));
    }

    #[test]
    fn source_cannot_require_more_parameters_than_target_supplies() {
        let mut arena = TypeArena::new();
        let source = function_of(&mut arena, vec![TypeId::I32], TypeId::VOID);
        let target = function_of(&mut arena, vec![], TypeId::VOID);
        let interner = Interner::new();
        assert!(!is_adaptable(source, target, &mut arena, &interner));
    }
}
