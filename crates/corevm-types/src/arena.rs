//! `TypeArena` — the owner of every `Type` for a program's lifetime
//!.

use corevm_common::Atom;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::ids::{
    AliasId, ClassShapeId, FunctionShapeId, InterfaceShapeId, MixinShapeId, TypeId, TypeParamId,
};
use crate::shapes::{
    ClassType, FunctionShape, InterfaceType, LiteralValue, MixinType, TypeAliasType, TypeParamType,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Never,
    Void,
    Null,
    Any,
    AnyRef,
    Unknown,
    Boolean,
    ByteArray,
    Number(corevm_ast::NumberName),
    Literal(LiteralValue),
    Array(TypeId),
    FixedArray(TypeId),
    Tuple(Vec<TypeId>),
    Record(IndexMap<Atom, TypeId>),
    Function(FunctionShapeId),
    Class(ClassShapeId),
    Interface(InterfaceShapeId),
    Mixin(MixinShapeId),
    TypeParameter(TypeParamId),
    TypeAlias(AliasId),
    Union(Vec<TypeId>),
}

/// Every `Type` ever constructed for one program, plus the caches that make
/// `instantiate` and the compound constructors interning.
pub struct TypeArena {
    types: Vec<TypeKind>,

    class_shapes: Vec<ClassType>,
    interface_shapes: Vec<InterfaceType>,
    mixin_shapes: Vec<MixinType>,
    function_shapes: Vec<FunctionShape>,
    type_params: Vec<TypeParamType>,
    aliases: Vec<TypeAliasType>,

    array_cache: FxHashMap<TypeId, TypeId>,
    fixed_array_cache: FxHashMap<TypeId, TypeId>,
    tuple_cache: FxHashMap<Vec<TypeId>, TypeId>,
    record_cache: FxHashMap<Vec<(Atom, TypeId)>, TypeId>,
    union_cache: FxHashMap<Vec<TypeId>, TypeId>,
    literal_cache: FxHashMap<LiteralValue, TypeId>,

    /// Interning key: `(template identity, tuple of type-argument
    /// identities)`.
    generic_instance_cache: FxHashMap<(TypeId, Vec<TypeId>), TypeId>,

    /// Classes declared `isExtension`, consulted by assignability rule 18.
    extension_classes: Vec<TypeId>,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    pub fn new() -> Self {
        use corevm_ast::NumberName::*;
        let mut arena = TypeArena {
            types: Vec::new(),
            class_shapes: Vec::new(),
            interface_shapes: Vec::new(),
            mixin_shapes: Vec::new(),
            function_shapes: Vec::new(),
            type_params: Vec::new(),
            aliases: Vec::new(),
            array_cache: FxHashMap::default(),
            fixed_array_cache: FxHashMap::default(),
            tuple_cache: FxHashMap::default(),
            record_cache: FxHashMap::default(),
            union_cache: FxHashMap::default(),
            literal_cache: FxHashMap::default(),
            generic_instance_cache: FxHashMap::default(),
            extension_classes: Vec::new(),
        };
        let well_known = [
            TypeKind::Never,
            TypeKind::Void,
            TypeKind::Null,
            TypeKind::Any,
            TypeKind::AnyRef,
            TypeKind::Unknown,
            TypeKind::Boolean,
            TypeKind::ByteArray,
            TypeKind::Number(I32),
            TypeKind::Number(I64),
            TypeKind::Number(U32),
            TypeKind::Number(U64),
            TypeKind::Number(F32),
            TypeKind::Number(F64),
        ];
        for kind in well_known {
            arena.types.push(kind);
        }
        debug_assert_eq!(arena.types.len() as u32, TypeId::WELL_KNOWN_COUNT);
        arena
    }

    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.types[id.index()]
    }

    fn push(&mut self, kind: TypeKind) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(kind);
        id
    }

    pub fn number(&self, name: corevm_ast::NumberName) -> TypeId {
        match name {
            corevm_ast::NumberName::I32 => TypeId::I32,
            corevm_ast::NumberName::I64 => TypeId::I64,
            corevm_ast::NumberName::U32 => TypeId::U32,
            corevm_ast::NumberName::U64 => TypeId::U64,
            corevm_ast::NumberName::F32 => TypeId::F32,
            corevm_ast::NumberName::F64 => TypeId::F64,
        }
    }

    pub fn literal(&mut self, value: LiteralValue) -> TypeId {
        if let Some(&id) = self.literal_cache.get(&value) {
            return id;
        }
        let id = self.push(TypeKind::Literal(value));
        self.literal_cache.insert(value, id);
        id
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.array_cache.get(&element) {
            return id;
        }
        let id = self.push(TypeKind::Array(element));
        self.array_cache.insert(element, id);
        id
    }

    pub fn fixed_array(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.fixed_array_cache.get(&element) {
            return id;
        }
        let id = self.push(TypeKind::FixedArray(element));
        self.fixed_array_cache.insert(element, id);
        id
    }

    pub fn tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        if let Some(&id) = self.tuple_cache.get(&elements) {
            return id;
        }
        let id = self.push(TypeKind::Tuple(elements.clone()));
        self.tuple_cache.insert(elements, id);
        id
    }

    pub fn record(&mut self, properties: IndexMap<Atom, TypeId>) -> TypeId {
        let mut key: Vec<(Atom, TypeId)> = properties.iter().map(|(&k, &v)| (k, v)).collect();
        key.sort_by(|(a, _), (b, _)| a.cmp(b));
        if let Some(&id) = self.record_cache.get(&key) {
            return id;
        }
        let id = self.push(TypeKind::Record(properties));
        self.record_cache.insert(key, id);
        id
    }

    /// Union of `members`; callers are expected to have already run
    /// `crate::union::validate_union` — this constructor only handles
    /// identity/dedup, not validation.
    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        if members.len() == 1 {
            return members[0];
        }
        let mut key = members.clone();
        key.sort_by_key(|t| t.0);
        key.dedup();
        if let Some(&id) = self.union_cache.get(&key) {
            return id;
        }
        let id = self.push(TypeKind::Union(members));
        self.union_cache.insert(key, id);
        id
    }

    pub fn push_function_shape(&mut self, shape: FunctionShape) -> FunctionShapeId {
        let id = FunctionShapeId(self.function_shapes.len() as u32);
        self.function_shapes.push(shape);
        id
    }

    pub fn function_shape(&self, id: FunctionShapeId) -> &FunctionShape {
        &self.function_shapes[id.index()]
    }

    pub fn function_shape_mut(&mut self, id: FunctionShapeId) -> &mut FunctionShape {
        &mut self.function_shapes[id.index()]
    }

    pub fn function_type(&mut self, shape: FunctionShape) -> TypeId {
        let id = self.push_function_shape(shape);
        self.push(TypeKind::Function(id))
    }

    pub fn push_class_shape(&mut self, class: ClassType) -> ClassShapeId {
        let id = ClassShapeId(self.class_shapes.len() as u32);
        self.class_shapes.push(class);
        id
    }

    pub fn class_shape(&self, id: ClassShapeId) -> &ClassType {
        &self.class_shapes[id.index()]
    }

    pub fn class_shape_mut(&mut self, id: ClassShapeId) -> &mut ClassType {
        &mut self.class_shapes[id.index()]
    }

    pub fn class_type(&mut self, class: ClassType) -> TypeId {
        let is_extension = class.is_extension;
        let shape_id = self.push_class_shape(class);
        let type_id = self.push(TypeKind::Class(shape_id));
        if is_extension {
            self.extension_classes.push(type_id);
        }
        type_id
    }

    pub fn push_interface_shape(&mut self, iface: InterfaceType) -> InterfaceShapeId {
        let id = InterfaceShapeId(self.interface_shapes.len() as u32);
        self.interface_shapes.push(iface);
        id
    }

    pub fn interface_shape(&self, id: InterfaceShapeId) -> &InterfaceType {
        &self.interface_shapes[id.index()]
    }

    pub fn interface_type(&mut self, iface: InterfaceType) -> TypeId {
        let id = self.push_interface_shape(iface);
        self.push(TypeKind::Interface(id))
    }

    pub fn push_mixin_shape(&mut self, mixin: MixinType) -> MixinShapeId {
        let id = MixinShapeId(self.mixin_shapes.len() as u32);
        self.mixin_shapes.push(mixin);
        id
    }

    pub fn mixin_shape(&self, id: MixinShapeId) -> &MixinType {
        &self.mixin_shapes[id.index()]
    }

    pub fn mixin_type(&mut self, mixin: MixinType) -> TypeId {
        let id = self.push_mixin_shape(mixin);
        self.push(TypeKind::Mixin(id))
    }

    pub fn type_param(&mut self, param: TypeParamType) -> TypeParamId {
        let id = TypeParamId(self.type_params.len() as u32);
        self.type_params.push(param);
        id
    }

    pub fn type_param_info(&self, id: TypeParamId) -> &TypeParamType {
        &self.type_params[id.index()]
    }

    pub fn type_parameter_type(&mut self, param: TypeParamType) -> TypeId {
        let id = self.type_param(param);
        self.push(TypeKind::TypeParameter(id))
    }

    /// Wrap an already-registered type parameter (its declaration site) as
    /// a reference `TypeId`, without registering a new one.
    pub fn type_parameter_ref(&mut self, id: TypeParamId) -> TypeId {
        self.push(TypeKind::TypeParameter(id))
    }

    pub fn push_alias(&mut self, alias: TypeAliasType) -> AliasId {
        let id = AliasId(self.aliases.len() as u32);
        self.aliases.push(alias);
        id
    }

    pub fn alias(&self, id: AliasId) -> &TypeAliasType {
        &self.aliases[id.index()]
    }

    pub fn alias_type(&mut self, alias: TypeAliasType) -> TypeId {
        let id = self.push_alias(alias);
        self.push(TypeKind::TypeAlias(id))
    }

    /// The interning lookup: `(template, args)` → previously-built
    /// instance, if any.
    pub fn lookup_generic_instance(&self, template: TypeId, args: &[TypeId]) -> Option<TypeId> {
        self.generic_instance_cache
            .get(&(template, args.to_vec()))
            .copied()
    }

    pub fn cache_generic_instance(&mut self, template: TypeId, args: Vec<TypeId>, result: TypeId) {
        self.generic_instance_cache.insert((template, args), result);
    }

    pub fn extension_classes(&self) -> &[TypeId] {
        &self.extension_classes
    }

    pub fn register_extension(&mut self, class_type: TypeId) {
        if !self.extension_classes.contains(&class_type) {
            self.extension_classes.push(class_type);
        }
    }
}
