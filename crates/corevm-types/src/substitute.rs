//! `substitute(type, map)`.
//!
//! An informal `name → Type` substitution becomes a `TypeParamId → TypeId`
//! map here: type parameters are already
//! identity-distinct declaration sites (one per `<T>` written in source),
//! so keying by name would conflate same-named parameters from unrelated
//! generics.

use rustc_hash::FxHashSet;

use crate::arena::{TypeArena, TypeKind};
use crate::ids::TypeId;
use crate::ids::TypeParamId;
use crate::shapes::{ClassType, FunctionShape, InterfaceType, MixinType, TypeAliasType};
use corevm_common::limits::MAX_TYPE_RECURSION_DEPTH;

pub type SubstitutionMap = rustc_hash::FxHashMap<TypeParamId, TypeId>;

pub fn substitute(ty: TypeId, map: &SubstitutionMap, arena: &mut TypeArena) -> TypeId {
    let mut in_progress = FxHashSet::default();
    substitute_rec(ty, map, arena, &mut in_progress, 0)
}

fn substitute_rec(
    ty: TypeId,
    map: &SubstitutionMap,
    arena: &mut TypeArena,
    in_progress: &mut FxHashSet<TypeId>,
    depth: u32,
) -> TypeId {
    if depth > MAX_TYPE_RECURSION_DEPTH {
        return ty;
    }
    // A type that refers back to itself (a class field typed as the
    // enclosing generic class, for instance) is treated as already
    // substituted rather than re-entered — this keeps substitution total
    // without needing a lazily-tied-together arena slot.
    if !in_progress.insert(ty) {
        return ty;
    }
    let result = substitute_once(ty, map, arena, in_progress, depth);
    in_progress.remove(&ty);
    result
}

fn substitute_once(
    ty: TypeId,
    map: &SubstitutionMap,
    arena: &mut TypeArena,
    in_progress: &mut FxHashSet<TypeId>,
    depth: u32,
) -> TypeId {
    match arena.kind(ty).clone() {
        TypeKind::TypeParameter(pid) => map.get(&pid).copied().unwrap_or(ty),

        TypeKind::Array(elem) => {
            let new_elem = substitute_rec(elem, map, arena, in_progress, depth + 1);
            if new_elem == elem {
                ty
            } else {
                arena.array(new_elem)
            }
        }
        TypeKind::FixedArray(elem) => {
            let new_elem = substitute_rec(elem, map, arena, in_progress, depth + 1);
            if new_elem == elem {
                ty
            } else {
                arena.fixed_array(new_elem)
            }
        }
        TypeKind::Tuple(elements) => {
            let new_elements: Vec<TypeId> = elements
                .iter()
                .map(|&e| substitute_rec(e, map, arena, in_progress, depth + 1))
                .collect();
            if new_elements == elements {
                ty
            } else {
                arena.tuple(new_elements)
            }
        }
        TypeKind::Record(properties) => {
            let mut changed = false;
            let mut new_properties = indexmap::IndexMap::new();
            for (name, field_ty) in properties.iter() {
                let substituted = substitute_rec(*field_ty, map, arena, in_progress, depth + 1);
                changed |= substituted != *field_ty;
                new_properties.insert(*name, substituted);
            }
            if changed {
                arena.record(new_properties)
            } else {
                ty
            }
        }
        TypeKind::Union(members) => {
            let new_members: Vec<TypeId> = members
                .iter()
                .map(|&m| substitute_rec(m, map, arena, in_progress, depth + 1))
                .collect();
            if new_members == members {
                ty
            } else {
                arena.union(new_members)
            }
        }
        TypeKind::Function(shape_id) => {
            let shape = arena.function_shape(shape_id).clone();
            let new_return = substitute_rec(shape.return_type, map, arena, in_progress, depth + 1);
            let new_params: Vec<TypeId> = shape
                .parameters
                .iter()
                .map(|&p| substitute_rec(p, map, arena, in_progress, depth + 1))
                .collect();
            if new_return == shape.return_type && new_params == shape.parameters {
                ty
            } else {
                arena.function_type(FunctionShape {
                    type_parameters: shape.type_parameters.clone(),
                    parameters: new_params,
                    return_type: new_return,
                    overloads: shape.overloads.clone(),
                    is_final: shape.is_final,
                })
            }
        }
        TypeKind::Class(shape_id) => {
            let class = arena.class_shape(shape_id).clone();
            let mut changed = false;

            let new_type_arguments = class.type_arguments.as_ref().map(|args| {
                let substituted: Vec<TypeId> = args
                    .iter()
                    .map(|&a| substitute_rec(a, map, arena, in_progress, depth + 1))
                    .collect();
                changed |= &substituted != args;
                substituted
            });

            let mut new_fields = indexmap::IndexMap::new();
            for (name, field_ty) in class.fields.iter() {
                let substituted = substitute_rec(*field_ty, map, arena, in_progress, depth + 1);
                changed |= substituted != *field_ty;
                new_fields.insert(*name, substituted);
            }

            let mut new_methods = indexmap::IndexMap::new();
            for (name, method_id) in class.methods.iter() {
                let method_shape = arena.function_shape(*method_id).clone();
                let new_return =
                    substitute_rec(method_shape.return_type, map, arena, in_progress, depth + 1);
                let new_params: Vec<TypeId> = method_shape
                    .parameters
                    .iter()
                    .map(|&p| substitute_rec(p, map, arena, in_progress, depth + 1))
                    .collect();
                let new_method = if new_return == method_shape.return_type
                    && new_params == method_shape.parameters
                {
                    *method_id
                } else {
                    changed = true;
                    arena.push_function_shape(FunctionShape {
                        type_parameters: method_shape.type_parameters.clone(),
                        parameters: new_params,
                        return_type: new_return,
                        overloads: method_shape.overloads.clone(),
                        is_final: method_shape.is_final,
                    })
                };
                new_methods.insert(*name, new_method);
            }

            let new_super_type = class.super_type.map(|s| {
                let substituted = substitute_rec(s, map, arena, in_progress, depth + 1);
                changed |= substituted != s;
                substituted
            });

            let new_implements: Vec<TypeId> = class
                .implements
                .iter()
                .map(|&i| substitute_rec(i, map, arena, in_progress, depth + 1))
                .collect();
            changed |= new_implements != class.implements;

            let new_on_type = class.on_type.map(|o| {
                let substituted = substitute_rec(o, map, arena, in_progress, depth + 1);
                changed |= substituted != o;
                substituted
            });

            if !changed {
                return ty;
            }

            arena.class_type(ClassType {
                name: class.name,
                type_parameters: class.type_parameters,
                type_arguments: new_type_arguments,
                fields: new_fields,
                methods: new_methods,
                constructor_type: class.constructor_type,
                super_type: new_super_type,
                implements: new_implements,
                is_final: class.is_final,
                is_abstract: class.is_abstract,
                is_extension: class.is_extension,
                on_type: new_on_type,
                // genericSource is preserved, not substituted.
                generic_source: class.generic_source,
            })
        }
        TypeKind::Interface(shape_id) => {
            let iface = arena.interface_shape(shape_id).clone();
            let mut changed = false;

            let new_type_arguments = iface.type_arguments.as_ref().map(|args| {
                let substituted: Vec<TypeId> = args
                    .iter()
                    .map(|&a| substitute_rec(a, map, arena, in_progress, depth + 1))
                    .collect();
                changed |= &substituted != args;
                substituted
            });

            let mut new_fields = indexmap::IndexMap::new();
            for (name, field_ty) in iface.fields.iter() {
                let substituted = substitute_rec(*field_ty, map, arena, in_progress, depth + 1);
                changed |= substituted != *field_ty;
                new_fields.insert(*name, substituted);
            }

            let new_methods = iface.methods.clone();

            let new_extends: Vec<TypeId> = iface
                .extends
                .iter()
                .map(|&e| substitute_rec(e, map, arena, in_progress, depth + 1))
                .collect();
            changed |= new_extends != iface.extends;

            if !changed {
                return ty;
            }

            arena.interface_type(InterfaceType {
                name: iface.name,
                type_parameters: iface.type_parameters,
                type_arguments: new_type_arguments,
                fields: new_fields,
                methods: new_methods,
                extends: new_extends,
                generic_source: iface.generic_source,
            })
        }
        TypeKind::Mixin(shape_id) => {
            let mixin = arena.mixin_shape(shape_id).clone();
            let mut changed = false;

            let new_type_arguments = mixin.type_arguments.as_ref().map(|args| {
                let substituted: Vec<TypeId> = args
                    .iter()
                    .map(|&a| substitute_rec(a, map, arena, in_progress, depth + 1))
                    .collect();
                changed |= &substituted != args;
                substituted
            });

            let mut new_fields = indexmap::IndexMap::new();
            for (name, field_ty) in mixin.fields.iter() {
                let substituted = substitute_rec(*field_ty, map, arena, in_progress, depth + 1);
                changed |= substituted != *field_ty;
                new_fields.insert(*name, substituted);
            }

            let new_on_type = mixin.on_type.map(|o| {
                let substituted = substitute_rec(o, map, arena, in_progress, depth + 1);
                changed |= substituted != o;
                substituted
            });

            if !changed {
                return ty;
            }

            arena.mixin_type(MixinType {
                name: mixin.name,
                type_parameters: mixin.type_parameters,
                type_arguments: new_type_arguments,
                fields: new_fields,
                methods: mixin.methods,
                on_type: new_on_type,
                generic_source: mixin.generic_source,
            })
        }
        TypeKind::TypeAlias(alias_id) => {
            let alias = arena.alias(alias_id).clone();
            let new_target = substitute_rec(alias.target, map, arena, in_progress, depth + 1);
            if new_target == alias.target {
                ty
            } else {
                arena.alias_type(TypeAliasType {
                    name: alias.name,
                    target: new_target,
                    type_parameters: alias.type_parameters,
                    is_distinct: alias.is_distinct,
                })
            }
        }
        // Nullary singletons, numbers and literals carry no type parameters.
        TypeKind::Never
        | TypeKind::Void
        | TypeKind::Null
        | TypeKind::Any
        | TypeKind::AnyRef
        | TypeKind::Unknown
        | TypeKind::Boolean
        | TypeKind::ByteArray
        | TypeKind::Number(_)
        | TypeKind::Literal(_) => ty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::TypeParamType;
    use corevm_common::Interner;

    #[test]
    fn identity_map_is_idempotent() {
        let mut arena = TypeArena::new();
        let array = arena.array(TypeId::I32);
        let map = SubstitutionMap::default();
        let once = substitute(array, &map, &mut arena);
        let twice = substitute(once, &map, &mut arena);
        assert_eq!(once, array);
        assert_eq!(twice, once);
    }

    #[test]
    fn substitutes_a_type_parameter_inside_an_array() {
        let mut arena = TypeArena::new();
        let mut interner = Interner::new();
        let t_name = interner.intern("T");
        let param_id = arena.type_param(TypeParamType {
            name: t_name,
            default_type: None,
        });
        let param_ref = arena.type_parameter_ref(param_id);
        let array_of_t = arena.array(param_ref);
        let mut map = SubstitutionMap::default();
        map.insert(param_id, TypeId::I32);
        let result = substitute(array_of_t, &map, &mut arena);
        match arena.kind(result) {
            TypeKind::Array(elem) => assert_eq!(*elem, TypeId::I32),
            other => panic!("expected Array, got {other:?}"),
        }
    }
}
