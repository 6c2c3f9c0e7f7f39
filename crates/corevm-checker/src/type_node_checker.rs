//! Resolves a parsed `TypeNode` into an interned
//! `corevm_types::TypeId`. Distinct from `check_expression`: this runs over
//! the *written* annotation, not a value expression.

use corevm_ast::{TypeNode, TypeNodeKind};
use corevm_common::diagnostics::diagnostic_codes;
use corevm_types::{instantiate, UnionValidationError};

use crate::scope::Namespace;
use crate::state::Checker;

impl Checker {
    pub fn check_type_node(&mut self, node: &TypeNode) -> corevm_types::TypeId {
        match &node.kind {
            TypeNodeKind::Never => corevm_types::TypeId::NEVER,
            TypeNodeKind::Void => corevm_types::TypeId::VOID,
            TypeNodeKind::Null => corevm_types::TypeId::NULL,
            TypeNodeKind::Any => corevm_types::TypeId::ANY,
            TypeNodeKind::AnyRef => corevm_types::TypeId::ANY_REF,
            TypeNodeKind::Unknown => corevm_types::TypeId::UNKNOWN,
            TypeNodeKind::Boolean => corevm_types::TypeId::BOOLEAN,
            TypeNodeKind::ByteArray => corevm_types::TypeId::BYTE_ARRAY,
            TypeNodeKind::Number(name) => self.arena.number(*name),

            TypeNodeKind::Array(elem) => {
                let elem_ty = self.check_type_node(elem);
                self.arena.array(elem_ty)
            }
            TypeNodeKind::FixedArray(elem) => {
                let elem_ty = self.check_type_node(elem);
                self.arena.fixed_array(elem_ty)
            }
            TypeNodeKind::Tuple(elements) => {
                let tys = elements.iter().map(|e| self.check_type_node(e)).collect();
                self.arena.tuple(tys)
            }
            TypeNodeKind::Record(fields) => {
                let mut properties = indexmap::IndexMap::new();
                for field in fields {
                    let ty = self.check_type_node(&field.type_node);
                    let name = self.interner.intern(&field.name);
                    properties.insert(name, ty);
                }
                self.arena.record(properties)
            }
            TypeNodeKind::Function {
                type_parameters: _,
                parameters,
                return_type,
            } => {
                let params = parameters.iter().map(|p| self.check_type_node(p)).collect();
                let ret = self.check_type_node(return_type);
                self.arena.function_type(corevm_types::FunctionShape {
                    type_parameters: Vec::new(),
                    parameters: params,
                    return_type: ret,
                    overloads: Vec::new(),
                    is_final: false,
                })
            }
            TypeNodeKind::Union(members) => {
                let tys: Vec<_> = members.iter().map(|m| self.check_type_node(m)).collect();
                if let Err(err) = corevm_types::validate_union(&tys, &mut self.arena, &self.interner) {
                    let code = match err {
                        UnionValidationError::AmbiguousDistinctAliases(..) => {
                            diagnostic_codes::DISTINCT_ALIAS_VIOLATION
                        }
                        _ => diagnostic_codes::INVALID_UNION_MEMBER,
                    };
                    let rendered = corevm_types::type_to_string(tys[0], &self.arena, &self.interner);
                    self.error(code, node.span, &[&rendered]);
                }
                self.arena.union(tys)
            }

            TypeNodeKind::NameRef { name, type_arguments } => {
                let Some(info) = self.resolve_type(name) else {
                    self.error(diagnostic_codes::SYMBOL_NOT_FOUND, node.span, &[name]);
                    return corevm_types::TypeId::UNKNOWN;
                };
                if type_arguments.is_empty() {
                    return info.ty;
                }
                let args: Vec<_> = type_arguments.iter().map(|a| self.check_type_node(a)).collect();
                let module = self.current_module.clone();
                instantiate(info.ty, args, &mut self.arena, &mut self.diagnostics, &module, node.span)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corevm_ast::testkit;
    use corevm_common::CheckerOptions;

    #[test]
    fn resolves_nullary_keyword_types() {
        let mut checker = Checker::new(CheckerOptions::default());
        let node = testkit::ty(TypeNodeKind::Boolean);
        assert_eq!(checker.check_type_node(&node), corevm_types::TypeId::BOOLEAN);
    }

    #[test]
    fn unresolved_name_ref_reports_symbol_not_found() {
        let mut checker = Checker::new(CheckerOptions::default());
        let node = testkit::ty_name("Ghost");
        let ty = checker.check_type_node(&node);
        assert_eq!(ty, corevm_types::TypeId::UNKNOWN);
        assert_eq!(checker.diagnostics.len(), 1);
    }
}
