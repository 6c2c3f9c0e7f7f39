//! Public result types for usage analysis.

use corevm_ast::NodeId;
use corevm_common::Atom;
use corevm_types::{TypeArena, TypeId, TypeKind};
use rustc_hash::{FxHashMap, FxHashSet};

/// Why a declaration is (or isn't) used, recorded only when
/// [`UsageAnalysisOptions::include_reasons`] is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsageInfo {
    pub is_used: bool,
    pub reason: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldUsage {
    pub is_read: bool,
    pub is_written: bool,
}

/// Tuning knobs for [`crate::analyze`].
#[derive(Clone, Debug, Default)]
pub struct UsageAnalysisOptions {
    /// Record a human-readable reason alongside each `UsageInfo`. Off by
    /// default since most callers only care about the boolean.
    pub include_reasons: bool,
    /// Module paths whose declarations may be dropped by a caller when
    /// unused. A module outside this set is only ever *reported on*, never
    /// eliminated — see [`UsageAnalysisResult::is_module_used`].
    pub pure_modules: FxHashSet<String>,
}

/// The output of a whole-program usage analysis pass.
pub struct UsageAnalysisResult {
    pub(crate) usage: FxHashMap<NodeId, UsageInfo>,
    pub(crate) used_declarations: FxHashSet<NodeId>,
    pub(crate) used_modules: FxHashSet<String>,
    pub(crate) used_methods: FxHashMap<TypeId, FxHashSet<Atom>>,
    pub(crate) polymorphic_methods: FxHashMap<TypeId, FxHashSet<Atom>>,
    pub(crate) field_usage: FxHashMap<TypeId, FxHashMap<Atom, FieldUsage>>,
    pub(crate) pure_modules: FxHashSet<String>,
}

impl UsageAnalysisResult {
    pub fn get_usage(&self, decl: NodeId) -> Option<&UsageInfo> {
        self.usage.get(&decl)
    }

    /// Unindexed declarations (not seen during the index phase) default to
    /// used — the conservative fallback for anything this analysis can't
    /// account for.
    pub fn is_used(&self, decl: NodeId) -> bool {
        self.usage.get(&decl).map(|info| info.is_used).unwrap_or(true)
    }

    pub fn is_module_used(&self, module_path: &str) -> bool {
        self.used_modules.contains(module_path)
    }

    /// Whether `module_path`'s unused declarations are eligible for removal.
    /// Non-pure modules are only ever reported on.
    pub fn is_module_pure(&self, module_path: &str) -> bool {
        self.pure_modules.contains(module_path)
    }

    /// Whether `name` is ever called/read on `class_ty` or anything in its
    /// reachable ancestry (superclasses and implemented/extended interfaces,
    /// transitively). `arena` is needed to walk that ancestry.
    pub fn is_method_used(&self, arena: &TypeArena, class_ty: TypeId, name: Atom) -> bool {
        if self.used_methods.get(&class_ty).is_some_and(|used| used.contains(&name)) {
            return true;
        }
        self.ancestor_polymorphic_call(arena, class_ty, name, &mut FxHashSet::default())
    }

    fn ancestor_polymorphic_call(
        &self,
        arena: &TypeArena,
        ty: TypeId,
        name: Atom,
        seen: &mut FxHashSet<TypeId>,
    ) -> bool {
        if !seen.insert(ty) {
            return false;
        }
        if self.polymorphic_methods.get(&ty).is_some_and(|poly| poly.contains(&name)) {
            return true;
        }
        match arena.kind(ty) {
            TypeKind::Class(shape_id) => {
                let class = arena.class_shape(*shape_id);
                if let Some(super_ty) = class.super_type {
                    if self.ancestor_polymorphic_call(arena, super_ty, name, seen) {
                        return true;
                    }
                }
                class
                    .implements
                    .iter()
                    .any(|&iface| self.ancestor_polymorphic_call(arena, iface, name, seen))
            }
            TypeKind::Interface(shape_id) => {
                let iface = arena.interface_shape(*shape_id);
                iface
                    .extends
                    .iter()
                    .any(|&parent| self.ancestor_polymorphic_call(arena, parent, name, seen))
            }
            _ => false,
        }
    }

    pub fn get_field_usage(&self, class_ty: TypeId, name: Atom) -> Option<FieldUsage> {
        self.field_usage.get(&class_ty).and_then(|fields| fields.get(&name)).copied()
    }

    pub fn used_declarations(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.used_declarations.iter().copied()
    }

    pub fn used_modules(&self) -> impl Iterator<Item = &str> + '_ {
        self.used_modules.iter().map(|s| s.as_str())
    }
}
