//! `typeToString` — the canonical string form used both for
//! diagnostic rendering and as the "fallback" comparison in assignability
//! rule 20.

use corevm_common::Interner;

use crate::arena::{TypeArena, TypeKind};
use crate::ids::TypeId;

pub fn type_to_string(id: TypeId, arena: &TypeArena, interner: &Interner) -> String {
    match arena.kind(id) {
        TypeKind::Never => "never".to_string(),
        TypeKind::Void => "void".to_string(),
        TypeKind::Null => "null".to_string(),
        TypeKind::Any => "any".to_string(),
        TypeKind::AnyRef => "anyref".to_string(),
        TypeKind::Unknown => "unknown".to_string(),
        TypeKind::Boolean => "boolean".to_string(),
        TypeKind::ByteArray => "bytearray".to_string(),
        TypeKind::Number(name) => number_name(*name).to_string(),
        TypeKind::Literal(value) => literal_to_string(*value, interner),
        TypeKind::Array(elem) => format!("{}[]", type_to_string(*elem, arena, interner)),
        TypeKind::FixedArray(elem) => {
            format!("FixedArray<{}>", type_to_string(*elem, arena, interner))
        }
        TypeKind::Tuple(elements) => {
            let parts: Vec<String> = elements
                .iter()
                .map(|&e| type_to_string(e, arena, interner))
                .collect();
            format!("[{}]", parts.join(", "))
        }
        TypeKind::Record(properties) => {
            let parts: Vec<String> = properties
                .iter()
                .map(|(name, &ty)| {
                    format!("{}: {}", interner.resolve(*name), type_to_string(ty, arena, interner))
                })
                .collect();
            format!("{{ {} }}", parts.join(", "))
        }
        TypeKind::Function(shape_id) => {
            let shape = arena.function_shape(*shape_id);
            let params: Vec<String> = shape
                .parameters
                .iter()
                .map(|&p| type_to_string(p, arena, interner))
                .collect();
            format!(
                "({}) => {}",
                params.join(", "),
                type_to_string(shape.return_type, arena, interner)
            )
        }
        TypeKind::Class(shape_id) => {
            class_like_name(interner.resolve(arena.class_shape(*shape_id).name), &arena.class_shape(*shape_id).type_arguments, arena, interner)
        }
        TypeKind::Interface(shape_id) => {
            let iface = arena.interface_shape(*shape_id);
            class_like_name(interner.resolve(iface.name), &iface.type_arguments, arena, interner)
        }
        TypeKind::Mixin(shape_id) => {
            let mixin = arena.mixin_shape(*shape_id);
            class_like_name(interner.resolve(mixin.name), &mixin.type_arguments, arena, interner)
        }
        TypeKind::TypeParameter(param_id) => {
            interner.resolve(arena.type_param_info(*param_id).name).to_string()
        }
        TypeKind::TypeAlias(alias_id) => interner.resolve(arena.alias(*alias_id).name).to_string(),
        TypeKind::Union(members) => {
            let parts: Vec<String> = members
                .iter()
                .map(|&m| type_to_string(m, arena, interner))
                .collect();
            parts.join(" | ")
        }
    }
}

fn class_like_name(
    name: &str,
    type_arguments: &Option<Vec<TypeId>>,
    arena: &TypeArena,
    interner: &Interner,
) -> String {
    match type_arguments {
        Some(args) if !args.is_empty() => {
            let parts: Vec<String> = args
                .iter()
                .map(|&a| type_to_string(a, arena, interner))
                .collect();
            format!("{name}<{}>", parts.join(", "))
        }
        _ => name.to_string(),
    }
}

fn number_name(name: corevm_ast::NumberName) -> &'static str {
    use corevm_ast::NumberName::*;
    match name {
        I32 => "i32",
        I64 => "i64",
        U32 => "u32",
        U64 => "u64",
        F32 => "f32",
        F64 => "f64",
    }
}

fn literal_to_string(value: crate::shapes::LiteralValue, interner: &Interner) -> String {
    use crate::shapes::LiteralValue;
    match value {
        LiteralValue::Str(atom) => format!("\"{}\"", interner.resolve(atom)),
        LiteralValue::Num(bits) => format!("{}", f64::from_bits(bits)),
        LiteralValue::Bool(b) => b.to_string(),
    }
}
