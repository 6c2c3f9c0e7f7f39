//! Statement checking. Declarations push a symbol into the
//! current scope; everything else dispatches into expression checking.

use corevm_ast::{Stmt, VarKind, VariableDeclaration};
use corevm_common::diagnostics::diagnostic_codes;
use corevm_common::Span;
use corevm_types::{TypeId, TypeKind};

use crate::scope::{SymbolInfo, SymbolKind};
use crate::state::Checker;

impl Checker {
    pub fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VariableDeclaration(decl) => self.check_variable_declaration(decl),
            Stmt::ClassDeclaration(decl) => self.check_class_declaration(decl),
            Stmt::InterfaceDeclaration(decl) => self.check_interface_declaration(decl),
            Stmt::MixinDeclaration(decl) => self.check_mixin_declaration(decl),
            Stmt::TypeAliasDeclaration(decl) => self.check_type_alias_declaration(decl),
            Stmt::ImportDeclaration(_) => {
                // Import wiring (binding local names to the target module's
                // exports) happens at the `Program` level, before any
                // module's statements are checked; by the time we reach
                // here the names are already in scope.
            }
            Stmt::ExpressionStatement(expr) => {
                self.check_expression(expr);
            }
            Stmt::Return { span, value, .. } => self.check_return(*span, value),
            Stmt::If { condition, then_branch, else_branch, .. } => {
                self.check_expression(condition);
                self.scopes.push();
                for s in then_branch {
                    self.check_stmt(s);
                }
                self.scopes.pop();
                if let Some(else_body) = else_branch {
                    self.scopes.push();
                    for s in else_body {
                        self.check_stmt(s);
                    }
                    self.scopes.pop();
                }
            }
            Stmt::Block { body, .. } => {
                self.scopes.push();
                for s in body {
                    self.check_stmt(s);
                }
                self.scopes.pop();
            }
        }
    }

    fn check_variable_declaration(&mut self, decl: &VariableDeclaration) {
        let declared_ty = decl.declared_type.as_ref().map(|t| self.check_type_node(t));
        let init_ty = decl.init.as_ref().map(|e| self.check_expression(e));

        let ty = match (declared_ty, init_ty) {
            (Some(declared), Some(init)) => {
                if !corevm_types::is_assignable_to(init, declared, &mut self.arena, &self.interner) {
                    let lhs = corevm_types::type_to_string(declared, &self.arena, &self.interner);
                    let rhs = corevm_types::type_to_string(init, &self.arena, &self.interner);
                    self.error(diagnostic_codes::TYPE_MISMATCH, decl.span, &[&rhs, &lhs]);
                }
                declared
            }
            (Some(declared), None) => declared,
            (None, Some(init)) => init,
            (None, None) => TypeId::UNKNOWN,
        };

        let kind = match decl.kind {
            VarKind::Let => SymbolKind::Let,
            VarKind::Var => SymbolKind::Var,
        };
        let is_function_type = kind == SymbolKind::Let && matches!(self.arena.kind(ty), TypeKind::Function(_));
        self.declare_value(&decl.name, SymbolInfo::new(ty, kind, decl.id), is_function_type, decl.span);
        self.context.set_inferred_type(decl.id, ty);
    }

    fn check_return(&mut self, span: Span, value: &Option<corevm_ast::Expr>) {
        let actual = match value {
            Some(e) => self.check_expression(e),
            None => TypeId::VOID,
        };
        match self.current_function_return_type {
            Some(expected) => {
                if !corevm_types::is_assignable_to(actual, expected, &mut self.arena, &self.interner) {
                    let lhs = corevm_types::type_to_string(expected, &self.arena, &self.interner);
                    let rhs = corevm_types::type_to_string(actual, &self.arena, &self.interner);
                    self.error(diagnostic_codes::TYPE_MISMATCH, span, &[&rhs, &lhs]);
                }
            }
            None => {
                self.error(diagnostic_codes::RETURN_OUTSIDE_FUNCTION, span, &[]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corevm_ast::testkit::{let_decl, number, var_decl};
    use corevm_common::CheckerOptions;

    #[test]
    fn let_declaration_infers_type_from_initializer() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = corevm_ast::NodeIdGen::new();
        let stmt = let_decl(&gen, "x", number(&gen, "1"), false);
        checker.check_stmt(&stmt);
        assert_eq!(checker.resolve_value("x").unwrap().ty, TypeId::I32);
        assert!(checker.diagnostics.is_empty());
    }

    #[test]
    fn var_declaration_is_mutable_kind() {
        let mut checker = Checker::new(CheckerOptions::default());
        let gen = corevm_ast::NodeIdGen::new();
        let stmt = var_decl(&gen, "x", Some(number(&gen, "1")));
        checker.check_stmt(&stmt);
        assert_eq!(checker.resolve_value("x").unwrap().kind, SymbolKind::Var);
    }
}
