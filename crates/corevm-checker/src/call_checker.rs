//! `CallExpression` and `NewExpression` checking, including
//! the generic-function inference step.

use corevm_ast::{Expr, ExprKind};
use corevm_common::diagnostics::diagnostic_codes;
use corevm_types::{substitute, SubstitutionMap, TypeId, TypeKind};

use crate::binding::ResolvedBinding;
use crate::state::Checker;

impl Checker {
    pub(crate) fn check_call(&mut self, expr: &Expr) -> TypeId {
        let ExprKind::Call { callee, type_arguments, arguments } = &expr.kind else {
            unreachable!("check_call invoked on a non-Call expression");
        };

        let arg_types: Vec<TypeId> = arguments.iter().map(|a| self.check_expression(a)).collect();
        let callee_ty = self.check_expression(callee);
        let explicit_type_args: Vec<TypeId> = type_arguments.iter().map(|t| self.check_type_node(t)).collect();

        match self.arena.kind(callee_ty).clone() {
            TypeKind::Union(members) => self.check_union_call(expr, &members, &arg_types),
            TypeKind::Function(shape_id) => {
                self.check_single_call(expr, shape_id, &explicit_type_args, &arg_types, arguments)
            }
            _ => {
                let rendered = corevm_types::type_to_string(callee_ty, &self.arena, &self.interner);
                self.error(diagnostic_codes::TYPE_MISMATCH, expr.span, &[&rendered, "function"]);
                TypeId::UNKNOWN
            }
        }
    }

    fn check_union_call(&mut self, expr: &Expr, members: &[TypeId], arg_types: &[TypeId]) -> TypeId {
        let mut return_types = Vec::new();
        for &member in members {
            let TypeKind::Function(shape_id) = self.arena.kind(member).clone() else {
                self.error(diagnostic_codes::TYPE_MISMATCH, expr.span, &["non-function union member", "function"]);
                return TypeId::UNKNOWN;
            };
            let shape = self.arena.function_shape(shape_id).clone();
            if !self.arity_and_types_match(&shape.parameters, arg_types) {
                self.error(diagnostic_codes::ARGUMENT_COUNT_MISMATCH, expr.span, &[&shape.parameters.len().to_string(), &arg_types.len().to_string()]);
                return TypeId::UNKNOWN;
            }
            return_types.push(shape.return_type);
        }
        let first = return_types[0];
        for &other in &return_types[1..] {
            if !corevm_types::is_assignable_to(first, other, &mut self.arena, &self.interner)
                || !corevm_types::is_assignable_to(other, first, &mut self.arena, &self.interner)
            {
                self.error(diagnostic_codes::TYPE_MISMATCH, expr.span, &["incompatible union return types", "a common type"]);
                return TypeId::UNKNOWN;
            }
        }
        first
    }

    pub(crate) fn arity_and_types_match(&mut self, parameters: &[TypeId], arg_types: &[TypeId]) -> bool {
        if parameters.len() != arg_types.len() {
            return false;
        }
        parameters
            .iter()
            .zip(arg_types.iter())
            .all(|(&p, &a)| corevm_types::is_assignable_to(a, p, &mut self.arena, &self.interner))
    }

    fn check_single_call(
        &mut self,
        expr: &Expr,
        shape_id: corevm_types::FunctionShapeId,
        explicit_type_args: &[TypeId],
        arg_types: &[TypeId],
        arguments: &[Expr],
    ) -> TypeId {
        let shape = self.arena.function_shape(shape_id).clone();

        let candidates: Vec<_> = std::iter::once(shape_id).chain(shape.overloads.iter().copied()).collect();
        let mut chosen = shape.clone();
        for &candidate_id in &candidates {
            let candidate = self.arena.function_shape(candidate_id).clone();
            if candidate.parameters.len() == arg_types.len() {
                chosen = candidate;
                break;
            }
        }

        if chosen.type_parameters.is_empty() {
            if !self.arity_and_types_match(&chosen.parameters, arg_types) {
                self.error(
                    diagnostic_codes::ARGUMENT_COUNT_MISMATCH,
                    expr.span,
                    &[&chosen.parameters.len().to_string(), &arg_types.len().to_string()],
                );
                return TypeId::UNKNOWN;
            }
            return chosen.return_type;
        }

        let mut map = SubstitutionMap::default();
        for (&param, &explicit) in chosen.type_parameters.iter().zip(explicit_type_args.iter()) {
            map.insert(param, explicit);
        }
        for (&param_ty, &arg_ty) in chosen.parameters.iter().zip(arg_types.iter()) {
            self.unify(param_ty, arg_ty, &mut map);
        }
        for &param in &chosen.type_parameters {
            if !map.contains_key(&param) {
                let default = self.arena.type_param_info(param).default_type;
                match default {
                    Some(d) => {
                        map.insert(param, d);
                    }
                    None => {
                        let name = self.interner.resolve(self.arena.type_param_info(param).name).to_string();
                        self.error(diagnostic_codes::CANNOT_INFER_TYPE_ARGUMENT, expr.span, &[&name]);
                        return TypeId::UNKNOWN;
                    }
                }
            }
        }

        let inferred: Vec<TypeId> = chosen.type_parameters.iter().map(|p| map[p]).collect();
        self.context.set_inferred_type_arguments(expr.id, inferred);

        let substituted_params: Vec<TypeId> =
            chosen.parameters.iter().map(|&p| substitute(p, &map, &mut self.arena)).collect();
        let substituted_return = substitute(chosen.return_type, &map, &mut self.arena);

        if !self.arity_and_types_match(&substituted_params, arg_types) {
            self.error(
                diagnostic_codes::ARGUMENT_COUNT_MISMATCH,
                expr.span,
                &[&substituted_params.len().to_string(), &arg_types.len().to_string()],
            );
            return TypeId::UNKNOWN;
        }
        let _ = arguments;
        substituted_return
    }

    /// Structural unification: binds each `TypeParameter` it finds in
    /// `param` to the corresponding subtree of
    /// `arg`, recursing through `FixedArray`/`Array`/same-named
    /// `Class`/`Function` shapes. First match for a given parameter wins.
    fn unify(&mut self, param: TypeId, arg: TypeId, map: &mut SubstitutionMap) {
        match (self.arena.kind(param).clone(), self.arena.kind(arg).clone()) {
            (TypeKind::TypeParameter(pid), _) => {
                map.entry(pid).or_insert(arg);
            }
            (TypeKind::FixedArray(p_elem), TypeKind::FixedArray(a_elem))
            | (TypeKind::Array(p_elem), TypeKind::Array(a_elem)) => {
                self.unify(p_elem, a_elem, map);
            }
            (TypeKind::Class(p_shape), TypeKind::Class(a_shape)) => {
                let p_class = self.arena.class_shape(p_shape).clone();
                let a_class = self.arena.class_shape(a_shape).clone();
                if p_class.name == a_class.name {
                    if let (Some(p_args), Some(a_args)) = (p_class.type_arguments, a_class.type_arguments) {
                        for (p, a) in p_args.iter().zip(a_args.iter()) {
                            self.unify(*p, *a, map);
                        }
                    }
                }
            }
            (TypeKind::Function(p_shape), TypeKind::Function(a_shape)) => {
                let p_fn = self.arena.function_shape(p_shape).clone();
                let a_fn = self.arena.function_shape(a_shape).clone();
                for (p, a) in p_fn.parameters.iter().zip(a_fn.parameters.iter()) {
                    self.unify(*p, *a, map);
                }
                self.unify(p_fn.return_type, a_fn.return_type, map);
            }
            _ => {}
        }
    }

    pub(crate) fn check_new(&mut self, expr: &Expr) -> TypeId {
        let ExprKind::New { class_name, type_arguments, arguments } = &expr.kind else {
            unreachable!("check_new invoked on a non-New expression");
        };

        let arg_types: Vec<TypeId> = arguments.iter().map(|a| self.check_expression(a)).collect();

        let Some(info) = self.resolve_type(class_name) else {
            self.error(diagnostic_codes::SYMBOL_NOT_FOUND, expr.span, &[class_name]);
            return TypeId::UNKNOWN;
        };
        self.context.set_binding(expr.id, ResolvedBinding::Class { ty: info.ty });

        let TypeKind::Class(shape_id) = self.arena.kind(info.ty).clone() else {
            self.error(diagnostic_codes::SYMBOL_NOT_FOUND, expr.span, &[class_name]);
            return TypeId::UNKNOWN;
        };
        let class = self.arena.class_shape(shape_id).clone();
        if class.is_abstract {
            let name = self.interner.resolve(class.name).to_string();
            self.error(diagnostic_codes::CANNOT_INSTANTIATE_ABSTRACT_CLASS, expr.span, &[&name]);
            return TypeId::UNKNOWN;
        }

        let explicit_args: Vec<TypeId> = type_arguments.iter().map(|t| self.check_type_node(t)).collect();
        let instance_ty = if class.type_parameters.is_empty() {
            info.ty
        } else if !explicit_args.is_empty() {
            let module = self.current_module.clone();
            corevm_types::instantiate(info.ty, explicit_args, &mut self.arena, &mut self.diagnostics, &module, expr.span)
        } else if let Some(ctor) = class.constructor_type {
            let ctor_shape = self.arena.function_shape(ctor).clone();
            let mut map = SubstitutionMap::default();
            for (&param_ty, &arg_ty) in ctor_shape.parameters.iter().zip(arg_types.iter()) {
                self.unify(param_ty, arg_ty, &mut map);
            }
            let args: Vec<TypeId> = class
                .type_parameters
                .iter()
                .map(|p| map.get(p).copied().unwrap_or(TypeId::UNKNOWN))
                .collect();
            let module = self.current_module.clone();
            corevm_types::instantiate(info.ty, args, &mut self.arena, &mut self.diagnostics, &module, expr.span)
        } else {
            info.ty
        };

        if let TypeKind::Class(instance_shape) = self.arena.kind(instance_ty).clone() {
            let instance_class = self.arena.class_shape(instance_shape).clone();
            if let Some(ctor) = instance_class.constructor_type {
                let ctor_shape = self.arena.function_shape(ctor).clone();
                if !self.arity_and_types_match(&ctor_shape.parameters, &arg_types) {
                    self.error(
                        diagnostic_codes::ARGUMENT_COUNT_MISMATCH,
                        expr.span,
                        &[&ctor_shape.parameters.len().to_string(), &arg_types.len().to_string()],
                    );
                }
            }
        }

        instance_ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corevm_ast::testkit::{call, ident, let_decl, number, param, ty_i32, ty_name};
    use corevm_ast::{Expr, FunctionBody, FunctionExpr, NodeIdGen, TypeParamNode};
    use corevm_common::{CheckerOptions, Span};

    fn generic_identity(gen: &NodeIdGen) -> Expr {
        let type_param = TypeParamNode { id: gen.next(), span: Span::new(0, 0), name: "T".to_string(), default_type: None };
        let f = FunctionExpr {
            id: gen.next(),
            span: Span::new(0, 0),
            type_parameters: vec![type_param],
            parameters: vec![param(gen, "x", ty_name("T"))],
            return_type: Some(ty_name("T")),
            body: FunctionBody::Expr(Box::new(ident(gen, "x"))),
        };
        Expr { id: gen.next(), span: Span::new(0, 0), kind: ExprKind::Function(f) }
    }

    #[test]
    fn generic_call_infers_type_argument_from_argument_type() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();
        checker.check_stmt(&let_decl(&gen, "identity", generic_identity(&gen), false));

        let call_expr = call(&gen, ident(&gen, "identity"), vec![number(&gen, "1")]);
        let call_id = call_expr.id;
        let result = checker.check_expression(&call_expr);

        assert!(checker.diagnostics.is_empty());
        assert_eq!(result, TypeId::I32);
        assert_eq!(checker.context.inferred_type_arguments(call_id), Some(&vec![TypeId::I32][..]));
    }

    #[test]
    fn generic_call_without_enough_information_reports_cannot_infer() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();
        checker.check_stmt(&let_decl(&gen, "identity", generic_identity(&gen), false));

        let call_expr = call(&gen, ident(&gen, "identity"), Vec::new());
        checker.check_expression(&call_expr);

        assert!(checker
            .diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::CANNOT_INFER_TYPE_ARGUMENT));
    }

    #[test]
    fn wrong_argument_count_is_reported() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = NodeIdGen::new();
        let f = Expr {
            id: gen.next(),
            span: Span::new(0, 0),
            kind: ExprKind::Function(FunctionExpr {
                id: gen.next(),
                span: Span::new(0, 0),
                type_parameters: Vec::new(),
                parameters: vec![param(&gen, "x", ty_i32())],
                return_type: Some(ty_i32()),
                body: FunctionBody::Expr(Box::new(ident(&gen, "x"))),
            }),
        };
        checker.check_stmt(&let_decl(&gen, "identity", f, false));

        let call_expr = call(&gen, ident(&gen, "identity"), Vec::new());
        checker.check_expression(&call_expr);

        assert!(checker
            .diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::ARGUMENT_COUNT_MISMATCH));
    }
}
