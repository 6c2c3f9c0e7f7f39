//! `instantiate(template, typeArguments)`.
//!
//! Only `Class`/`Interface`/`Mixin` carry `typeParameters`/`typeArguments`/
//! `genericSource` in the type model (§3.1); generic *functions* are
//! resolved transiently during call-checking (§4.2.2 step 5) via
//! `substitute` directly, without going through the interning cache here.

use indexmap::IndexMap;

use corevm_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message, Diagnostic, DiagnosticBag};
use corevm_common::Span;

use crate::arena::{TypeArena, TypeKind};
use crate::ids::{TypeId, TypeParamId};
use crate::shapes::{ClassType, FunctionShape, InterfaceType, MixinType};
use crate::substitute::{substitute, SubstitutionMap};

/// `None` for anything that isn't a generic template kind; `Some(params)`
/// (possibly empty) for `Class`/`Interface`/`Mixin`.
fn type_parameters_of(id: TypeId, arena: &TypeArena) -> Option<Vec<TypeParamId>> {
    match arena.kind(id) {
        TypeKind::Class(shape_id) => Some(arena.class_shape(*shape_id).type_parameters.clone()),
        TypeKind::Interface(shape_id) => {
            Some(arena.interface_shape(*shape_id).type_parameters.clone())
        }
        TypeKind::Mixin(shape_id) => Some(arena.mixin_shape(*shape_id).type_parameters.clone()),
        _ => None,
    }
}

fn substitute_function_shape(
    shape_id: crate::ids::FunctionShapeId,
    map: &SubstitutionMap,
    arena: &mut TypeArena,
) -> crate::ids::FunctionShapeId {
    let shape = arena.function_shape(shape_id).clone();
    let new_parameters = shape
        .parameters
        .iter()
        .map(|&p| substitute(p, map, arena))
        .collect();
    let new_return = substitute(shape.return_type, map, arena);
    arena.push_function_shape(FunctionShape {
        type_parameters: shape.type_parameters,
        parameters: new_parameters,
        return_type: new_return,
        overloads: shape.overloads,
        is_final: shape.is_final,
    })
}

pub fn instantiate(
    template: TypeId,
    type_arguments: Vec<TypeId>,
    arena: &mut TypeArena,
    diagnostics: &mut DiagnosticBag,
    module: &str,
    span: Span,
) -> TypeId {
    let Some(params) = type_parameters_of(template, arena) else {
        return template;
    };
    if params.is_empty() {
        return template;
    }
    if params.len() != type_arguments.len() {
        let text = format_message(
            diagnostic_messages::GENERIC_TYPE_ARGUMENT_MISMATCH.message,
            &[&params.len().to_string(), &type_arguments.len().to_string()],
        );
        diagnostics.push(Diagnostic::error(
            module,
            span,
            text,
            diagnostic_codes::GENERIC_TYPE_ARGUMENT_MISMATCH,
        ));
        return TypeId::UNKNOWN;
    }
    if let Some(cached) = arena.lookup_generic_instance(template, &type_arguments) {
        return cached;
    }

    let mut map = SubstitutionMap::default();
    for (param, arg) in params.iter().zip(type_arguments.iter()) {
        map.insert(*param, *arg);
    }

    let result = instantiate_shape(template, &map, &type_arguments, arena);
    arena.cache_generic_instance(template, type_arguments, result);
    result
}

fn instantiate_shape(
    template: TypeId,
    map: &SubstitutionMap,
    args: &[TypeId],
    arena: &mut TypeArena,
) -> TypeId {
    match arena.kind(template).clone() {
        TypeKind::Class(shape_id) => {
            let class = arena.class_shape(shape_id).clone();

            let mut new_fields = IndexMap::new();
            for (name, field_ty) in class.fields.iter() {
                new_fields.insert(*name, substitute(*field_ty, map, arena));
            }

            let mut new_methods = IndexMap::new();
            for (name, method_id) in class.methods.iter() {
                new_methods.insert(*name, substitute_function_shape(*method_id, map, arena));
            }

            let new_constructor_type = class
                .constructor_type
                .map(|c| substitute_function_shape(c, map, arena));
            let new_super_type = class.super_type.map(|s| substitute(s, map, arena));
            let new_implements: Vec<TypeId> = class
                .implements
                .iter()
                .map(|&i| substitute(i, map, arena))
                .collect();
            let new_on_type = class.on_type.map(|o| substitute(o, map, arena));

            arena.class_type(ClassType {
                name: class.name,
                type_parameters: class.type_parameters,
                type_arguments: Some(args.to_vec()),
                fields: new_fields,
                methods: new_methods,
                constructor_type: new_constructor_type,
                super_type: new_super_type,
                implements: new_implements,
                is_final: class.is_final,
                is_abstract: class.is_abstract,
                is_extension: class.is_extension,
                on_type: new_on_type,
                generic_source: Some(template),
            })
        }
        TypeKind::Interface(shape_id) => {
            let iface = arena.interface_shape(shape_id).clone();

            let mut new_fields = IndexMap::new();
            for (name, field_ty) in iface.fields.iter() {
                new_fields.insert(*name, substitute(*field_ty, map, arena));
            }
            let mut new_methods = IndexMap::new();
            for (name, method_id) in iface.methods.iter() {
                new_methods.insert(*name, substitute_function_shape(*method_id, map, arena));
            }
            let new_extends: Vec<TypeId> = iface
                .extends
                .iter()
                .map(|&e| substitute(e, map, arena))
                .collect();

            arena.interface_type(InterfaceType {
                name: iface.name,
                type_parameters: iface.type_parameters,
                type_arguments: Some(args.to_vec()),
                fields: new_fields,
                methods: new_methods,
                extends: new_extends,
                generic_source: Some(template),
            })
        }
        TypeKind::Mixin(shape_id) => {
            let mixin = arena.mixin_shape(shape_id).clone();

            let mut new_fields = IndexMap::new();
            for (name, field_ty) in mixin.fields.iter() {
                new_fields.insert(*name, substitute(*field_ty, map, arena));
            }
            let mut new_methods = IndexMap::new();
            for (name, method_id) in mixin.methods.iter() {
                new_methods.insert(*name, substitute_function_shape(*method_id, map, arena));
            }
            let new_on_type = mixin.on_type.map(|o| substitute(o, map, arena));

            arena.mixin_type(MixinType {
                name: mixin.name,
                type_parameters: mixin.type_parameters,
                type_arguments: Some(args.to_vec()),
                fields: new_fields,
                methods: new_methods,
                on_type: new_on_type,
                generic_source: Some(template),
            })
        }
        _ => template,
    }
}

/// Rebuild an `implements`/`extends`-style list for a specialization whose
/// own list was left empty because it was never explicitly substituted
/// (assignability rule 12): substitute `generic_source`'s list using
/// `type_arguments` directly. Infallible — the arity was already checked
/// when the specialization was created by [`instantiate`].
pub fn instantiate_for_reconstitution(
    generic_source: TypeId,
    type_arguments: &[TypeId],
    arena: &mut TypeArena,
) -> Vec<TypeId> {
    let Some(params) = type_parameters_of(generic_source, arena) else {
        return Vec::new();
    };
    if params.len() != type_arguments.len() {
        return Vec::new();
    }
    let mut map = SubstitutionMap::default();
    for (param, arg) in params.iter().zip(type_arguments.iter()) {
        map.insert(*param, *arg);
    }
    let implements = match arena.kind(generic_source) {
        TypeKind::Class(shape_id) => arena.class_shape(*shape_id).implements.clone(),
        TypeKind::Interface(shape_id) => arena.interface_shape(*shape_id).extends.clone(),
        _ => return Vec::new(),
    };
    implements
        .iter()
        .map(|&i| substitute(i, &map, arena))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::TypeParamType;
    use corevm_common::Interner;

    fn sample_generic_class(arena: &mut TypeArena, interner: &mut Interner) -> TypeId {
        let name = interner.intern("Box");
        let t_name = interner.intern("T");
        let field_name = interner.intern("value");
        let param_id = arena.type_param(TypeParamType {
            name: t_name,
            default_type: None,
        });
        let param_ref = arena.type_parameter_ref(param_id);
        let mut fields = IndexMap::new();
        fields.insert(field_name, param_ref);
        arena.class_type(ClassType {
            name,
            type_parameters: vec![param_id],
            type_arguments: None,
            fields,
            methods: IndexMap::new(),
            constructor_type: None,
            super_type: None,
            implements: Vec::new(),
            is_final: false,
            is_abstract: false,
            is_extension: false,
            on_type: None,
            generic_source: None,
        })
    }

    #[test]
    fn instantiating_the_same_template_and_arguments_is_interned() {
        let mut arena = TypeArena::new();
        let mut interner = Interner::new();
        let template = sample_generic_class(&mut arena, &mut interner);
        let mut diagnostics = DiagnosticBag::new();
        let a = instantiate(
            template,
            vec![TypeId::I32],
            &mut arena,
            &mut diagnostics,
            "m",
            Span::dummy(),
        );
        let b = instantiate(
            template,
            vec![TypeId::I32],
            &mut arena,
            &mut diagnostics,
            "m",
            Span::dummy(),
        );
        assert_eq!(a, b);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn different_arguments_produce_distinct_instances() {
        let mut arena = TypeArena::new();
        let mut interner = Interner::new();
        let template = sample_generic_class(&mut arena, &mut interner);
        let mut diagnostics = DiagnosticBag::new();
        let int_box = instantiate(
            template,
            vec![TypeId::I32],
            &mut arena,
            &mut diagnostics,
            "m",
            Span::dummy(),
        );
        let str_box = instantiate(
            template,
            vec![TypeId::BOOLEAN],
            &mut arena,
            &mut diagnostics,
            "m",
            Span::dummy(),
        );
        assert_ne!(int_box, str_box);
    }

    #[test]
    fn arity_mismatch_reports_a_diagnostic() {
        let mut arena = TypeArena::new();
        let mut interner = Interner::new();
        let template = sample_generic_class(&mut arena, &mut interner);
        let mut diagnostics = DiagnosticBag::new();
        let result = instantiate(template, vec![], &mut arena, &mut diagnostics, "m", Span::dummy());
        assert_eq!(result, TypeId::UNKNOWN);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().code,
            diagnostic_codes::GENERIC_TYPE_ARGUMENT_MISMATCH
        );
    }
}
