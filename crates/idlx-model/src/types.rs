//! Type nodes of the interface graph.

use crate::members::{OperationId, Property};
use crate::model::LibraryId;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

// =============================================================================
// TypeId - Arena Handle
// =============================================================================

/// Index of a Type in its `Model`.
///
/// Ids are only meaningful for the `Model` that allocated them. Equality of
/// two ids is reference identity of the Types; after merge it coincides with
/// name identity because every reference points at the canonical node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// TypeKind
// =============================================================================

/// Kind of an interface Type.
///
/// | Kind | `types` holds | `supertype` holds |
/// |------|---------------|-------------------|
/// | Interface | implemented interfaces | inherited interface |
/// | Dictionary | implemented dictionaries | inherited dictionary |
/// | Union | member types, in declared order | - |
/// | Array / Sequence | - | element type |
/// | Promise | - | resolved value type |
/// | Alias | - | aliased type |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Interface,
    Dictionary,
    Enum,
    Union,
    Array,
    Sequence,
    Alias,
    CallbackFunction,
    CallbackInterface,
    Promise,
}

impl TypeKind {
    /// ALIAS and SEQUENCE types only exist to resolve other Types.
    pub const fn is_renderable(self) -> bool {
        !matches!(self, TypeKind::Alias | TypeKind::Sequence)
    }

    pub const fn is_callback(self) -> bool {
        matches!(self, TypeKind::CallbackFunction | TypeKind::CallbackInterface)
    }
}

// =============================================================================
// Type
// =============================================================================

/// A Type node.
///
/// Nullability is part of the name (`Node?`), not a separate field.
#[derive(Clone, Debug)]
pub struct Type {
    pub name: String,
    pub kind: TypeKind,

    /// Synthesized by the `Model` (`any`, `void`, numeric spellings, ...).
    pub builtin: bool,

    /// Library that declared this node; `None` for built-ins and placeholders.
    pub library: Option<LibraryId>,

    pub supertype: Option<TypeId>,

    /// Implemented interfaces, union members or contained types, in first-seen order.
    pub types: Vec<TypeId>,

    /// Reverse edges of `types` for interfaces ("implemented by").
    pub implemented_by: Vec<TypeId>,

    pub properties: Vec<Property>,

    /// Own operations. After merge this holds one head per operation name.
    pub operations: Vec<OperationId>,

    pub constructors: Vec<OperationId>,

    pub enum_literals: IndexSet<String, FxBuildHasher>,
}

impl Type {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            builtin: false,
            library: None,
            supertype: None,
            types: Vec::new(),
            implemented_by: Vec::new(),
            properties: Vec::new(),
            operations: Vec::new(),
            constructors: Vec::new(),
            enum_literals: IndexSet::default(),
        }
    }

    /// Whether the name carries the trailing nullability marker.
    pub fn is_nullable(&self) -> bool {
        self.name.ends_with('?')
    }

    /// Add a contained/implemented Type; keeps set semantics and first-seen order.
    pub fn add_type(&mut self, ty: TypeId) -> bool {
        if self.types.contains(&ty) {
            return false;
        }
        self.types.push(ty);
        true
    }

    pub fn add_implemented_by(&mut self, ty: TypeId) -> bool {
        if self.implemented_by.contains(&ty) {
            return false;
        }
        self.implemented_by.push(ty);
        true
    }

    /// Returns `false` when the literal was already present.
    pub fn add_enum_literal(&mut self, literal: impl Into<String>) -> bool {
        self.enum_literals.insert(literal.into())
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}
