//! Libraries, arenas and the canonical name registry.
//!
//! Scanners build one `Library` each through the `Model` API:
//!
//! ```ignore
//! let mut model = Model::new();
//! let dom = model.add_library("DOM");
//! let window = model.declare_type(dom, "Window", TypeKind::Interface);
//! let string = model.reference("DOMString");
//! model.add_operation(window, Operation::new("open").with_param(Parameter::new("url", string)));
//! ```
//!
//! The registry starts out holding only built-ins; the merge engine elects
//! and registers one canonical Type per name.

use crate::classify::NUMBER_TYPES;
use crate::members::{Modifiers, Operation, OperationId, Property};
use crate::types::{Type, TypeId, TypeKind};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::trace;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Non-numeric primitives the `Model` synthesizes on demand.
///
/// Every spelling in `NUMBER_TYPES` is synthesized as well, and so are the
/// nullable (`long?`) and `unrestricted ` forms of any built-in spelling.
pub const BUILTIN_TYPES: &[&str] = &["any", "void", "boolean", "DOMString", "object"];

// =============================================================================
// Library
// =============================================================================

/// Index of a Library in registration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LibraryId(pub u32);

/// The Types one source contributed, in discovery order.
#[derive(Clone, Debug)]
pub struct Library {
    pub name: String,
    pub types: Vec<TypeId>,
}

// =============================================================================
// Model
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct Model {
    types: Vec<Type>,
    operations: Vec<Operation>,
    libraries: Vec<Library>,
    /// Name -> canonical Type, in registration order.
    registry: FxIndexMap<String, TypeId>,
    /// Unregistered nodes handed out by `reference` for names not yet known.
    placeholders: FxHashMap<String, TypeId>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Libraries
    // -------------------------------------------------------------------------

    pub fn add_library(&mut self, name: impl Into<String>) -> LibraryId {
        let id = LibraryId(self.libraries.len() as u32);
        let name = name.into();
        trace!(library = %name, id = id.0, "Model::add_library");
        self.libraries.push(Library {
            name,
            types: Vec::new(),
        });
        id
    }

    pub fn library(&self, id: LibraryId) -> &Library {
        &self.libraries[id.0 as usize]
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    fn alloc_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        trace!(type_id = id.0, name = %ty.name, kind = ?ty.kind, "Model::alloc_type");
        self.types.push(ty);
        id
    }

    /// Declare a new Type node contributed by `library`.
    ///
    /// Declaring the same name twice (in one or several libraries) creates
    /// separate nodes; the merge engine folds them into one canonical Type.
    pub fn declare_type(
        &mut self,
        library: LibraryId,
        name: impl Into<String>,
        kind: TypeKind,
    ) -> TypeId {
        let mut ty = Type::new(name, kind);
        ty.library = Some(library);
        let id = self.alloc_type(ty);
        self.libraries[library.0 as usize].types.push(id);
        id
    }

    /// Make an existing Type node part of another library as well.
    pub fn attach_type(&mut self, library: LibraryId, ty: TypeId) {
        let types = &mut self.libraries[library.0 as usize].types;
        if !types.contains(&ty) {
            types.push(ty);
        }
    }

    /// Resolve a Type name for use as a reference.
    ///
    /// Returns the registered Type, a synthesized built-in, or a shared
    /// placeholder that the merge engine later resolves to the canonical
    /// declaration of `name`.
    pub fn reference(&mut self, name: &str) -> TypeId {
        if let Some(id) = self.get_type(name) {
            return id;
        }
        if let Some(&id) = self.placeholders.get(name) {
            return id;
        }
        let id = self.alloc_type(Type::new(name, TypeKind::Interface));
        self.placeholders.insert(name.to_string(), id);
        id
    }

    /// The canonical Type registered under `name`, synthesizing built-ins lazily.
    pub fn get_type(&mut self, name: &str) -> Option<TypeId> {
        if let Some(&id) = self.registry.get(name) {
            return Some(id);
        }
        if !is_builtin_name(name) {
            return None;
        }
        let mut ty = Type::new(name, TypeKind::Interface);
        ty.builtin = true;
        let id = self.alloc_type(ty);
        self.registry.insert(name.to_string(), id);
        Some(id)
    }

    /// The universal `any` Type.
    pub fn any_type(&mut self) -> TypeId {
        match self.get_type("any") {
            Some(id) => id,
            None => unreachable!("`any` is a built-in type"),
        }
    }

    /// Registry lookup without synthesizing.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.registry.get(name).copied()
    }

    /// Register `ty` as the canonical Type for its name.
    ///
    /// Returns the previously registered Type if the name was taken, in which
    /// case the registry is left unchanged.
    pub fn register(&mut self, ty: TypeId) -> Option<TypeId> {
        let name = self.types[ty.index()].name.clone();
        match self.registry.get(&name) {
            Some(&existing) => Some(existing),
            None => {
                trace!(type_id = ty.0, name = %name, "Model::register");
                self.registry.insert(name, ty);
                None
            }
        }
    }

    pub fn is_canonical(&self, ty: TypeId) -> bool {
        self.registry.get(&self.types[ty.index()].name) == Some(&ty)
    }

    /// Canonical Types in registration order.
    pub fn canonical_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.registry.values().copied()
    }

    pub fn registered_len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_placeholder(&self, ty: TypeId) -> bool {
        self.placeholders.get(&self.types[ty.index()].name) == Some(&ty)
    }

    /// Placeholder nodes, ordered by id.
    pub fn placeholders(&self) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self.placeholders.values().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn contains_type(&self, ty: TypeId) -> bool {
        ty.index() < self.types.len()
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn ty_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id.index()]
    }

    pub fn type_name(&self, id: Option<TypeId>) -> &str {
        match id {
            Some(id) => &self.types[id.index()].name,
            None => "void",
        }
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.types.len() as u32).map(TypeId)
    }

    // -------------------------------------------------------------------------
    // Type edges and members
    // -------------------------------------------------------------------------

    pub fn set_supertype(&mut self, ty: TypeId, supertype: TypeId) {
        self.types[ty.index()].supertype = Some(supertype);
    }

    /// Add an implemented interface, union member or contained Type.
    ///
    /// For interfaces the reverse "implemented by" edge is recorded as well.
    pub fn add_member_type(&mut self, ty: TypeId, member: TypeId) {
        self.types[ty.index()].add_type(member);
        if matches!(
            self.types[ty.index()].kind,
            TypeKind::Interface | TypeKind::Dictionary | TypeKind::CallbackInterface
        ) && ty != member
        {
            self.types[member.index()].add_implemented_by(ty);
        }
    }

    pub fn add_implemented_by(&mut self, ty: TypeId, implementor: TypeId) {
        self.types[ty.index()].add_implemented_by(implementor);
    }

    pub fn add_property(&mut self, ty: TypeId, property: Property) {
        self.types[ty.index()].properties.push(property);
    }

    pub fn add_enum_literal(&mut self, ty: TypeId, literal: impl Into<String>) -> bool {
        self.types[ty.index()].add_enum_literal(literal)
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Allocate an Operation that is not yet attached to any Type.
    pub fn alloc_operation(&mut self, op: Operation) -> OperationId {
        let id = OperationId(self.operations.len() as u32);
        trace!(op_id = id.0, name = %op.name, "Model::alloc_operation");
        self.operations.push(op);
        id
    }

    /// Declare an own operation of `ty`.
    ///
    /// Same-named declarations are kept side by side until merge folds them.
    pub fn add_operation(&mut self, ty: TypeId, op: Operation) -> OperationId {
        let id = self.alloc_operation(op);
        self.types[ty.index()].operations.push(id);
        id
    }

    /// Declare a constructor of `ty`.
    pub fn add_constructor(&mut self, ty: TypeId, op: Operation) -> OperationId {
        let id = self.alloc_operation(op.with_modifiers(Modifiers::CONSTRUCTOR));
        self.types[ty.index()].constructors.push(id);
        id
    }

    pub fn operation(&self, id: OperationId) -> &Operation {
        &self.operations[id.index()]
    }

    pub fn operation_mut(&mut self, id: OperationId) -> &mut Operation {
        &mut self.operations[id.index()]
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// The head operation of `ty` named `name`.
    pub fn find_operation(&self, ty: TypeId, name: &str) -> Option<OperationId> {
        self.types[ty.index()]
            .operations
            .iter()
            .copied()
            .find(|&op| self.operations[op.index()].name == name)
    }

    /// `head` followed by every entry of its overload table, in signature order.
    pub fn variants(&self, head: OperationId) -> Vec<OperationId> {
        let mut out = vec![head];
        out.extend(self.operations[head.index()].overloads.values().copied());
        out
    }
}

/// Whether `Model::get_type` synthesizes `name` on demand.
pub fn is_builtin_name(name: &str) -> bool {
    let base = name.strip_suffix('?').unwrap_or(name);
    let base = base.strip_prefix("unrestricted ").unwrap_or(base);
    BUILTIN_TYPES.contains(&base) || NUMBER_TYPES.binary_search(&base).is_ok()
}

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod tests;
