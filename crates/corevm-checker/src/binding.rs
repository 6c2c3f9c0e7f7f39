//! `ResolvedBinding` and `SemanticContext` — the side tables a
//! code generator consults instead of re-resolving names from the AST.

use corevm_ast::NodeId;
use corevm_common::Atom;
use corevm_types::TypeId;
use rustc_hash::FxHashMap;

/// What an `Identifier` or `MemberExpression` node actually refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedBinding {
    Local { node: NodeId },
    Global { node: NodeId },
    Function { node: NodeId },
    Class { ty: TypeId },
    Interface { ty: TypeId },
    Mixin { ty: TypeId },
    TypeAlias { ty: TypeId },
    TypeParameter { ty: TypeId },
    Import { node: NodeId },
    Field { class_ty: TypeId, name: Atom, is_static_dispatch: bool },
    Getter { class_ty: TypeId, name: Atom, is_static_dispatch: bool },
    Setter { class_ty: TypeId, name: Atom, is_static_dispatch: bool },
    Method { class_ty: TypeId, name: Atom, is_static_dispatch: bool },
    RecordField { record_ty: TypeId, name: Atom },
}

impl ResolvedBinding {
    /// The class/interface a member binding dispatches on, if any — used by
    /// usage analysis's `markMethodUsed`.
    pub fn dispatch_class(self) -> Option<TypeId> {
        match self {
            ResolvedBinding::Field { class_ty, .. }
            | ResolvedBinding::Getter { class_ty, .. }
            | ResolvedBinding::Setter { class_ty, .. }
            | ResolvedBinding::Method { class_ty, .. } => Some(class_ty),
            _ => None,
        }
    }

    pub fn is_static_dispatch(self) -> bool {
        matches!(
            self,
            ResolvedBinding::Field { is_static_dispatch: true, .. }
                | ResolvedBinding::Getter { is_static_dispatch: true, .. }
                | ResolvedBinding::Setter { is_static_dispatch: true, .. }
                | ResolvedBinding::Method { is_static_dispatch: true, .. }
        )
    }
}

/// Expression/node identity → `ResolvedBinding`, plus the companion
/// `inferredType`/`inferredTypeArguments`/`resolvedOperatorMethod` side
/// tables. All keyed by `NodeId` rather than embedded in the AST node
/// itself (see `corevm_ast::node_id`).
#[derive(Default)]
pub struct SemanticContext {
    bindings: FxHashMap<NodeId, ResolvedBinding>,
    inferred_types: FxHashMap<NodeId, TypeId>,
    inferred_type_arguments: FxHashMap<NodeId, Vec<TypeId>>,
    resolved_operator_methods: FxHashMap<NodeId, Atom>,
}

impl SemanticContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_binding(&mut self, node: NodeId, binding: ResolvedBinding) {
        self.bindings.insert(node, binding);
    }

    pub fn binding(&self, node: NodeId) -> Option<ResolvedBinding> {
        self.bindings.get(&node).copied()
    }

    pub fn set_inferred_type(&mut self, node: NodeId, ty: TypeId) {
        self.inferred_types.insert(node, ty);
    }

    pub fn inferred_type(&self, node: NodeId) -> Option<TypeId> {
        self.inferred_types.get(&node).copied()
    }

    pub fn set_inferred_type_arguments(&mut self, node: NodeId, args: Vec<TypeId>) {
        self.inferred_type_arguments.insert(node, args);
    }

    pub fn inferred_type_arguments(&self, node: NodeId) -> Option<&[TypeId]> {
        self.inferred_type_arguments.get(&node).map(|v| v.as_slice())
    }

    pub fn set_resolved_operator_method(&mut self, node: NodeId, name: Atom) {
        self.resolved_operator_methods.insert(node, name);
    }

    pub fn resolved_operator_method(&self, node: NodeId) -> Option<Atom> {
        self.resolved_operator_methods.get(&node).copied()
    }
}
