//! `Program`-level driver: checks every module's top-level statements in
//! dependency order (leaf modules first), wiring import bindings before a
//! module's own body is checked.

use corevm_ast::{ImportDeclaration, Program, Stmt};
use corevm_types::TypeId;

use crate::scope::SymbolKind;
use crate::state::Checker;

impl Checker {
    /// Checks every module of `program`, leaf-first. Each module gets its
    /// own top-level scope (module-level declarations do not leak into
    /// sibling modules — only re-exported names, wired via
    /// `ImportDeclaration`, cross a module boundary).
    pub fn check_program(&mut self, program: &Program) {
        for path in program.topological_order() {
            let Some(module) = program.modules.get(path) else { continue };
            self.current_module = module.path.clone();
            self.scopes.push();
            for stmt in &module.body {
                if let Stmt::ImportDeclaration(import) = stmt {
                    self.bind_import(program, import);
                }
            }
            for stmt in &module.body {
                self.check_stmt(stmt);
            }
            self.scopes.pop();
        }
    }

    /// Binds each imported local name to the target module's exported
    /// declaration. The target module was already checked (imports only
    /// point at earlier entries in topological order), but its scope was
    /// popped once `check_program` moved on — so the type is pulled
    /// straight from `self.context`, which outlives any one module's scope,
    /// keyed on the exported declaration's own `NodeId` rather than by
    /// re-resolving the name through scopes that no longer hold it.
    fn bind_import(&mut self, program: &Program, import: &ImportDeclaration) {
        let Some(target) = program.modules.get(&import.module_path) else {
            for spec in &import.specifiers {
                self.error(
                    corevm_common::diagnostics::diagnostic_codes::SYMBOL_NOT_FOUND,
                    import.span,
                    &[&spec.imported_name],
                );
            }
            return;
        };
        for spec in &import.specifiers {
            let Some(&node) = target.exports.get(&spec.imported_name) else {
                self.error(
                    corevm_common::diagnostics::diagnostic_codes::SYMBOL_NOT_FOUND,
                    import.span,
                    &[&spec.imported_name],
                );
                continue;
            };
            let ty = self.context.inferred_type(node).unwrap_or(TypeId::UNKNOWN);
            self.declare_value(
                &spec.local_name,
                crate::scope::SymbolInfo::new(ty, SymbolKind::Import, node),
                false,
                import.span,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ResolvedBinding;
    use corevm_ast::testkit::{ident, let_decl, number};
    use corevm_ast::{ImportSpecifier, Module, NodeIdGen, Stmt};
    use corevm_common::{CheckerOptions, Span};

    #[test]
    fn imported_value_resolves_to_the_exporting_module_s_type_and_binds_as_import() {
        let gen = NodeIdGen::new();

        let exported = let_decl(&gen, "helper", number(&gen, "1"), true);
        let exported_id = exported.id();

        let mut helper_module = Module::new("helper");
        helper_module.body = vec![exported];
        helper_module.exports.insert("helper".to_string(), exported_id);

        let import_id = gen.next();
        let reference = ident(&gen, "helper");
        let reference_id = reference.id;
        let main_stmt = Stmt::ExpressionStatement(reference);

        let mut main_module = Module::new("main");
        main_module.body = vec![
            Stmt::ImportDeclaration(corevm_ast::ImportDeclaration {
                id: import_id,
                span: Span::new(0, 0),
                module_path: "helper".to_string(),
                specifiers: vec![ImportSpecifier { imported_name: "helper".to_string(), local_name: "helper".to_string() }],
            }),
            main_stmt,
        ];

        let mut program = Program::new("main");
        program.add_module(helper_module);
        program.add_module(main_module);

        let mut checker = Checker::new(CheckerOptions::default());
        checker.check_program(&program);

        assert!(checker.diagnostics.is_empty(), "{:?}", checker.diagnostics);
        assert_eq!(checker.context.inferred_type(reference_id), Some(corevm_types::TypeId::I32));
        assert_eq!(checker.context.binding(reference_id), Some(ResolvedBinding::Import { node: exported_id }));
    }

    #[test]
    fn import_of_unknown_module_reports_symbol_not_found() {
        let gen = NodeIdGen::new();

        let mut main_module = Module::new("main");
        main_module.body = vec![Stmt::ImportDeclaration(corevm_ast::ImportDeclaration {
            id: gen.next(),
            span: Span::new(0, 0),
            module_path: "missing".to_string(),
            specifiers: vec![ImportSpecifier { imported_name: "thing".to_string(), local_name: "thing".to_string() }],
        })];

        let mut program = Program::new("main");
        program.add_module(main_module);

        let mut checker = Checker::new(CheckerOptions::default());
        checker.check_program(&program);

        assert_eq!(checker.diagnostics.len(), 1);
    }
}
