//! The prelude table — symbols injected from standard-library
//! modules, consulted only after every enclosing scope has missed.

use crate::scope::{Namespace, SymbolInfo};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Default)]
pub struct PreludeTable {
    symbols: FxHashMap<(Namespace, String), SymbolInfo>,
    consulted: FxHashSet<(Namespace, String)>,
}

impl PreludeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, namespace: Namespace, name: &str, info: SymbolInfo) {
        self.symbols.insert((namespace, name.to_string()), info);
    }

    /// Resolve `name`, recording it as consulted so the usage analyzer can
    /// treat the standard-library declaration it names as reachable.
    pub fn resolve(&mut self, namespace: Namespace, name: &str) -> Option<SymbolInfo> {
        let key = (namespace, name.to_string());
        let info = self.symbols.get(&key).cloned();
        if info.is_some() {
            self.consulted.insert(key);
        }
        info
    }

    pub fn consulted_names(&self) -> impl Iterator<Item = &str> {
        self.consulted.iter().map(|(_, name)| name.as_str())
    }
}
