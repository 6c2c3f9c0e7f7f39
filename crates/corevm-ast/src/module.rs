//! Modules and programs.

use crate::node_id::NodeId;
use crate::stmt::Stmt;
use indexmap::IndexMap;

/// A single source module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub path: String,
    pub body: Vec<Stmt>,
    /// Exported name → the `NodeId` of the declaration it refers to.
    /// An `IndexMap` rather than a `HashMap` so export order is stable
    /// (useful for deterministic diagnostics and `typeToString` on a
    /// module's public surface).
    pub exports: IndexMap<String, NodeId>,
    pub is_stdlib: bool,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body: Vec::new(),
            exports: IndexMap::new(),
            is_stdlib: false,
        }
    }

    pub fn top_level_declarations(&self) -> impl Iterator<Item = &Stmt> {
        self.body.iter().filter(|s| s.is_top_level_declaration())
    }
}

/// The whole program: an ordered mapping from module path to `Module`, plus
/// the entry point and the prelude modules injected into every module's
/// scope.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub modules: IndexMap<String, Module>,
    pub entry_point: String,
    pub prelude_modules: Vec<String>,
}

impl Program {
    pub fn new(entry_point: impl Into<String>) -> Self {
        Self {
            modules: IndexMap::new(),
            entry_point: entry_point.into(),
            prelude_modules: Vec::new(),
        }
    }

    pub fn add_module(&mut self, module: Module) {
        self.modules.insert(module.path.clone(), module);
    }

    pub fn entry_module(&self) -> Option<&Module> {
        self.modules.get(&self.entry_point)
    }

    /// Topological order, leaves first. Modules form a
    /// DAG over imports in a well-formed program; this performs a simple
    /// DFS post-order over each module's `ImportDeclaration`s, falling back
    /// to insertion order for modules with no recorded edges (e.g. the
    /// prelude, or when the caller hasn't wired up import edges at all).
    pub fn topological_order(&self) -> Vec<&str> {
        let mut order = Vec::with_capacity(self.modules.len());
        let mut visited = std::collections::HashSet::new();
        fn visit<'a>(
            program: &'a Program,
            path: &str,
            visited: &mut std::collections::HashSet<String>,
            order: &mut Vec<&'a str>,
        ) {
            if !visited.insert(path.to_string()) {
                return;
            }
            if let Some(module) = program.modules.get(path) {
                for stmt in &module.body {
                    if let Stmt::ImportDeclaration(import) = stmt {
                        visit(program, &import.module_path, visited, order);
                    }
                }
                order.push(module.path.as_str());
            }
        }
        for path in self.modules.keys() {
            visit(self, path, &mut visited, &mut order);
        }
        order
    }
}
