//! `isAssignableTo(source, target)` — twenty ordered rules,
//! first match wins.

use corevm_common::limits::MAX_TYPE_RECURSION_DEPTH;
use corevm_common::Interner;

use crate::adaptability::is_adaptable;
use crate::arena::{TypeArena, TypeKind};
use crate::ids::TypeId;
use crate::instantiate::instantiate_for_reconstitution;
use crate::shapes::LiteralValue;

pub fn is_assignable_to(source: TypeId, target: TypeId, arena: &mut TypeArena, interner: &Interner) -> bool {
    is_assignable_to_rec(source, target, arena, interner, 0)
}

fn is_reference_kind(kind: &TypeKind) -> bool {
    matches!(
        kind,
        TypeKind::Class(_)
            | TypeKind::Interface(_)
            | TypeKind::Array(_)
            | TypeKind::FixedArray(_)
            | TypeKind::Record(_)
            | TypeKind::Tuple(_)
            | TypeKind::Function(_)
            | TypeKind::Null
            | TypeKind::ByteArray
    )
}

fn is_assignable_to_rec(
    source: TypeId,
    target: TypeId,
    arena: &mut TypeArena,
    interner: &Interner,
    depth: u32,
) -> bool {
    // Rule 1: identity.
    if source == target {
        return true;
    }
    if depth > MAX_TYPE_RECURSION_DEPTH {
        return false;
    }

    // Rule 2: Never / Unknown.
    if matches!(arena.kind(source), TypeKind::Never) {
        return true;
    }
    if matches!(arena.kind(source), TypeKind::Unknown) || matches!(arena.kind(target), TypeKind::Unknown) {
        return true;
    }

    // Rule 3: Any.
    if matches!(arena.kind(target), TypeKind::Any) {
        return true;
    }
    if matches!(arena.kind(source), TypeKind::Any) {
        return false;
    }

    // Rule 4: Literal -> base.
    if let TypeKind::Literal(value) = arena.kind(source).clone() {
        return match value {
            LiteralValue::Str(atom) => match arena.kind(target) {
                TypeKind::Class(shape_id) => interner.resolve(arena.class_shape(*shape_id).name) == "String",
                _ => false,
            },
            LiteralValue::Num(_) => target == TypeId::I32,
            LiteralValue::Bool(_) => target == TypeId::BOOLEAN,
        };
    }

    // Rule 5: AnyRef.
    if matches!(arena.kind(target), TypeKind::AnyRef) {
        return is_reference_kind(arena.kind(source));
    }

    // Rule 6: distinct alias opacity.
    let source_distinct = match arena.kind(source) {
        TypeKind::TypeAlias(id) => arena.alias(*id).is_distinct.then(|| arena.alias(*id).name),
        _ => None,
    };
    let target_distinct = match arena.kind(target) {
        TypeKind::TypeAlias(id) => arena.alias(*id).is_distinct.then(|| arena.alias(*id).name),
        _ => None,
    };
    if source_distinct.is_some() || target_distinct.is_some() {
        if let Some(name) = source_distinct {
            if let TypeKind::Union(members) = arena.kind(target).clone() {
                return members.iter().any(|&m| {
                    matches!(arena.kind(m), TypeKind::TypeAlias(id) if arena.alias(*id).name == name)
                });
            }
            if let TypeKind::TypeAlias(id) = arena.kind(target) {
                return arena.alias(*id).name == name;
            }
            return false;
        }
        if let Some(name) = target_distinct {
            if let TypeKind::TypeAlias(id) = arena.kind(source) {
                return arena.alias(*id).name == name;
            }
            return false;
        }
    }

    // Rule 7: transparent alias.
    if let TypeKind::TypeAlias(id) = arena.kind(source).clone() {
        let inner = arena.alias(id).target;
        return is_assignable_to_rec(inner, target, arena, interner, depth + 1);
    }
    if let TypeKind::TypeAlias(id) = arena.kind(target).clone() {
        let inner = arena.alias(id).target;
        return is_assignable_to_rec(source, inner, arena, interner, depth + 1);
    }

    // Rule 8: union source.
    if let TypeKind::Union(members) = arena.kind(source).clone() {
        return members
            .iter()
            .all(|&m| is_assignable_to_rec(m, target, arena, interner, depth + 1));
    }

    // Rule 9: union target.
    if let TypeKind::Union(members) = arena.kind(target).clone() {
        return members
            .iter()
            .any(|&m| is_assignable_to_rec(source, m, arena, interner, depth + 1));
    }

    // Rule 10: Null.
    if matches!(arena.kind(source), TypeKind::Null) {
        return matches!(arena.kind(target), TypeKind::Null) || is_reference_kind(arena.kind(target));
    }

    let source_kind = arena.kind(source).clone();
    let target_kind = arena.kind(target).clone();

    // Rule 11 / 12: Class -> Class / Class -> Interface.
    if let TypeKind::Class(source_shape) = source_kind {
        match target_kind.clone() {
            TypeKind::Class(_) => {
                if class_chain_matches_class(source, target, arena, interner, depth) {
                    return true;
                }
            }
            TypeKind::Interface(_) => {
                if class_chain_implements_interface(source, target, arena, interner, depth) {
                    return true;
                }
            }
            TypeKind::Record(_) => {
                if class_satisfies_record(source, target, arena, interner, depth) {
                    return true;
                }
            }
            _ => {}
        }
        // Rule 16: extension class -> T.
        let on_type = arena.class_shape(source_shape).on_type;
        let is_extension = arena.class_shape(source_shape).is_extension;
        if is_extension {
            if let Some(on_type) = on_type {
                if is_assignable_to_rec(on_type, target, arena, interner, depth + 1) {
                    return true;
                }
            }
        }
    }

    // Rule 15: Record -> Record width subtyping (extra source properties allowed).
    if let TypeKind::Record(source_props) = source_kind.clone() {
        if let TypeKind::Record(_) = target_kind {
            if record_satisfies_record(&source_props, target, arena, interner, depth) {
                return true;
            }
        }
    }

    // Rule 13: Interface -> Interface.
    if let (TypeKind::Interface(_), TypeKind::Interface(_)) = (&source_kind, &target_kind) {
        if interface_chain_matches(source, target, arena, interner, depth) {
            return true;
        }
    }

    // Rule 17: Array -> extension class wrapping array.
    if matches!(source_kind, TypeKind::Array(_) | TypeKind::FixedArray(_)) {
        if let TypeKind::Class(target_shape) = target_kind {
            let target_class = arena.class_shape(target_shape).clone();
            if target_class.is_extension {
                if let Some(on_type) = target_class.on_type {
                    if is_assignable_to_rec(source, on_type, arena, interner, depth + 1) {
                        return true;
                    }
                }
            }
        }
    }

    // Rule 18: source has an extension implementing target interface.
    if matches!(target_kind, TypeKind::Interface(_)) && extension_bridges_to_interface(source, target, arena, interner, depth) {
        return true;
    }

    // Rule 19: Function -> Function.
    if let (TypeKind::Function(_), TypeKind::Function(_)) = (&source_kind, &target_kind) {
        return is_adaptable(source, target, arena, interner);
    }

    // Rule 20: fallback canonical string equality.
    crate::display::type_to_string(source, arena, interner) == crate::display::type_to_string(target, arena, interner)
}

fn class_chain_matches_class(
    source: TypeId,
    target: TypeId,
    arena: &TypeArena,
    _interner: &Interner,
    depth: u32,
) -> bool {
    let target_name = match arena.kind(target) {
        TypeKind::Class(id) => arena.class_shape(*id).name,
        _ => return false,
    };
    let mut current = Some(source);
    let mut steps = 0;
    while let Some(id) = current {
        if steps > MAX_TYPE_RECURSION_DEPTH || depth + steps > MAX_TYPE_RECURSION_DEPTH {
            return false;
        }
        steps += 1;
        match arena.kind(id) {
            TypeKind::Class(shape_id) => {
                let class = arena.class_shape(*shape_id);
                if class.name == target_name || id == target {
                    return true;
                }
                current = class.super_type;
            }
            _ => return false,
        }
    }
    false
}

fn class_chain_implements_interface(
    source: TypeId,
    target: TypeId,
    arena: &mut TypeArena,
    interner: &Interner,
    depth: u32,
) -> bool {
    let mut current = Some(source);
    let mut steps = 0;
    while let Some(id) = current {
        if steps > MAX_TYPE_RECURSION_DEPTH {
            return false;
        }
        steps += 1;
        let class = match arena.kind(id) {
            TypeKind::Class(shape_id) => arena.class_shape(*shape_id).clone(),
            _ => return false,
        };
        let mut implements = class.implements.clone();
        if implements.is_empty() {
            if let Some(generic_source) = class.generic_source {
                if let Some(type_arguments) = &class.type_arguments {
                    implements = instantiate_for_reconstitution(generic_source, type_arguments, arena);
                }
            }
        }
        for iface in implements {
            if is_assignable_to_rec(iface, target, arena, interner, depth + 1) {
                return true;
            }
        }
        current = class.super_type;
    }
    false
}

fn interface_chain_matches(
    source: TypeId,
    target: TypeId,
    arena: &TypeArena,
    interner: &Interner,
    depth: u32,
) -> bool {
    let target_name = match arena.kind(target) {
        TypeKind::Interface(id) => arena.interface_shape(*id).name,
        _ => return false,
    };
    let source_shape = match arena.kind(source) {
        TypeKind::Interface(id) => *id,
        _ => return false,
    };
    let source_iface = arena.interface_shape(source_shape);
    if source_iface.name == target_name {
        return true;
    }
    if depth > MAX_TYPE_RECURSION_DEPTH {
        return false;
    }
    source_iface
        .extends
        .iter()
        .any(|&e| interface_chain_matches(e, target, arena, interner, depth + 1))
}

fn class_satisfies_record(
    source: TypeId,
    target: TypeId,
    arena: &mut TypeArena,
    interner: &Interner,
    depth: u32,
) -> bool {
    let properties = match arena.kind(target) {
        TypeKind::Record(props) => props.clone(),
        _ => return false,
    };
    for (name, prop_ty) in properties.iter() {
        match find_class_field(source, *name, arena) {
            Some(field_ty) => {
                if !is_assignable_to_rec(field_ty, *prop_ty, arena, interner, depth + 1) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Mirrors [`class_satisfies_record`]: every property the target record
/// declares must be present (by name) on the source record and assignable.
/// Extra properties on the source are allowed — this is the width-subtyping
/// half of record assignability that a source `Class` already gets via
/// `class_satisfies_record`.
fn record_satisfies_record(
    source_props: &indexmap::IndexMap<corevm_common::Atom, TypeId>,
    target: TypeId,
    arena: &mut TypeArena,
    interner: &Interner,
    depth: u32,
) -> bool {
    let target_props = match arena.kind(target) {
        TypeKind::Record(props) => props.clone(),
        _ => return false,
    };
    for (name, prop_ty) in target_props.iter() {
        match source_props.get(name) {
            Some(&field_ty) => {
                if !is_assignable_to_rec(field_ty, *prop_ty, arena, interner, depth + 1) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

fn find_class_field(source: TypeId, name: corevm_common::Atom, arena: &TypeArena) -> Option<TypeId> {
    let mut current = Some(source);
    let mut steps = 0;
    while let Some(id) = current {
        if steps > MAX_TYPE_RECURSION_DEPTH {
            return None;
        }
        steps += 1;
        match arena.kind(id) {
            TypeKind::Class(shape_id) => {
                let class = arena.class_shape(*shape_id);
                if let Some(&ty) = class.fields.get(&name) {
                    return Some(ty);
                }
                current = class.super_type;
            }
            _ => return None,
        }
    }
    None
}

/// Rule 18: does *some* registered extension class bridge `source` into
/// implementing the `target` interface? Only the outer shape (array vs.
/// fixed-array vs. class) needs to line up — the extension's own element
/// type is left free (it is itself generic over the array it extends).
fn extension_bridges_to_interface(
    source: TypeId,
    target: TypeId,
    arena: &mut TypeArena,
    interner: &Interner,
    depth: u32,
) -> bool {
    if depth > MAX_TYPE_RECURSION_DEPTH {
        return false;
    }
    for &ext in arena.extension_classes().to_vec().iter() {
        let ext_class = match arena.kind(ext) {
            TypeKind::Class(shape_id) => arena.class_shape(*shape_id).clone(),
            _ => continue,
        };
        let Some(on_type) = ext_class.on_type else {
            continue;
        };
        if !erased_shape_matches(source, on_type, arena) {
            continue;
        }
        if class_chain_implements_interface(ext, target, arena, interner, depth + 1) {
            return true;
        }
    }
    false
}

/// True when `a` and `b` are the "same kind of container" ignoring the
/// concrete element/type-argument (e.g. two `FixedArray<_>`s).
fn erased_shape_matches(a: TypeId, b: TypeId, arena: &TypeArena) -> bool {
    match (arena.kind(a), arena.kind(b)) {
        (TypeKind::FixedArray(_), TypeKind::FixedArray(_)) => true,
        (TypeKind::Array(_), TypeKind::Array(_)) => true,
        (TypeKind::Class(sa), TypeKind::Class(sb)) => {
            arena.class_shape(*sa).name == arena.class_shape(*sb).name
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflexivity_holds_for_every_well_known_type() {
        let mut arena = TypeArena::new();
        let interner = Interner::new();
        for id in [
            TypeId::NEVER,
            TypeId::VOID,
            TypeId::NULL,
            TypeId::ANY,
            TypeId::ANY_REF,
            TypeId::UNKNOWN,
            TypeId::BOOLEAN,
            TypeId::BYTE_ARRAY,
            TypeId::I32,
        ] {
            assert!(is_assignable_to(id, id, &mut arena, &interner));
        }
    }

    #[test]
    fn never_is_assignable_to_anything() {
        let mut arena = TypeArena::new();
        let interner = Interner::new();
        assert!(is_assignable_to(TypeId::NEVER, TypeId::I32, &mut arena, &interner));
        assert!(is_assignable_to(TypeId::NEVER, TypeId::BOOLEAN, &mut arena, &interner));
    }

    #[test]
    fn any_accepts_everything_but_is_not_itself_assignable() {
        let mut arena = TypeArena::new();
        let interner = Interner::new();
        assert!(is_assignable_to(TypeId::I32, TypeId::ANY, &mut arena, &interner));
        assert!(!is_assignable_to(TypeId::ANY, TypeId::I32, &mut arena, &interner));
    }

    #[test]
    fn null_is_assignable_to_reference_kinds() {
        let mut arena = TypeArena::new();
        let interner = Interner::new();
        let array = arena.array(TypeId::I32);
        assert!(is_assignable_to(TypeId::NULL, array, &mut arena, &interner));
        assert!(!is_assignable_to(TypeId::NULL, TypeId::I32, &mut arena, &interner));
    }

    #[test]
    fn union_target_accepts_any_member() {
        let mut arena = TypeArena::new();
        let interner = Interner::new();
        let union = arena.union(vec![TypeId::I32, TypeId::BOOLEAN]);
        assert!(is_assignable_to(TypeId::I32, union, &mut arena, &interner));
        assert!(is_assignable_to(TypeId::BOOLEAN, union, &mut arena, &interner));
    }

    #[test]
    fn union_source_requires_every_member_assignable() {
        let mut arena = TypeArena::new();
        let interner = Interner::new();
        let union = arena.union(vec![TypeId::I32, TypeId::BOOLEAN]);
        assert!(!is_assignable_to(union, TypeId::I32, &mut arena, &interner));
    }

    #[test]
    fn wider_record_is_assignable_to_narrower_record() {
        let mut arena = TypeArena::new();
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");

        let mut wide = indexmap::IndexMap::new();
        wide.insert(x, TypeId::I32);
        wide.insert(y, TypeId::BOOLEAN);
        let wide_record = arena.record(wide);

        let mut narrow = indexmap::IndexMap::new();
        narrow.insert(x, TypeId::I32);
        let narrow_record = arena.record(narrow);

        assert!(is_assignable_to(wide_record, narrow_record, &mut arena, &interner));
        assert!(!is_assignable_to(narrow_record, wide_record, &mut arena, &interner));
    }
}
