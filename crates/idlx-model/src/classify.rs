//! Numeric / Alias Classifier
//!
//! Pure queries that the merge pipeline and every generator use to agree on
//! what a Type is. All of them are alias-transparent: an ALIAS is resolved to
//! its ultimate supertype before anything is decided, so
//! `typedef unsigned long GLenum` classifies exactly like `unsigned long`.
//!
//! # Example
//!
//! ```rust,ignore
//! match model.classify(param.ty) {
//!     TypeClass::Numeric => { /* primitive number */ }
//!     TypeClass::Sequence(elem) => { /* array-like of elem */ }
//!     TypeClass::Enum => { /* string enum */ }
//!     _ => { /* reference type */ }
//! }
//! ```

use crate::model::Model;
use crate::types::{TypeId, TypeKind};
use idlx_common::StructuralError;
use idlx_common::limits::MAX_ALIAS_DEPTH;
use rustc_hash::FxHashSet;

/// Primitive numeric spellings.
///
/// MUST stay sorted: lookups use binary search.
pub const NUMBER_TYPES: [&str; 13] = [
    "byte",
    "double",
    "float",
    "int",
    "long",
    "long long",
    "number",
    "octet",
    "short",
    "unsigned int",
    "unsigned long",
    "unsigned long long",
    "unsigned short",
];

const STRING_TYPES: &[&str] = &["ByteString", "DOMString", "USVString", "string"];

/// Strip the trailing nullability marker.
pub fn strip_nullable(name: &str) -> &str {
    name.strip_suffix('?').unwrap_or(name)
}

/// Strip the nullability marker and the `unrestricted ` prefix.
pub fn base_name(name: &str) -> &str {
    let name = strip_nullable(name);
    name.strip_prefix("unrestricted ").unwrap_or(name)
}

/// Whether a Type name spells a primitive number.
pub fn is_numeric_name(name: &str) -> bool {
    NUMBER_TYPES.binary_search(&base_name(name)).is_ok()
}

/// Rendering-oriented classification of a Type reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeClass {
    /// Absent type or `void`.
    Void,
    Any,
    Boolean,
    Numeric,
    String,
    Enum,
    /// Only seen before decomposition, or on properties.
    Union,
    Array(Option<TypeId>),
    Sequence(Option<TypeId>),
    Promise(Option<TypeId>),
    Callback,
    Dictionary,
    Interface,
}

impl Model {
    /// Follow ALIAS indirection to the aliased Type.
    ///
    /// Stops after `MAX_ALIAS_DEPTH` hops; validation guarantees that a graph
    /// reaching a generator has no longer chains.
    pub fn resolve_alias(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        for _ in 0..MAX_ALIAS_DEPTH {
            let node = self.ty(current);
            match (node.kind, node.supertype) {
                (TypeKind::Alias, Some(target)) => current = target,
                _ => break,
            }
        }
        current
    }

    /// Fallible alias resolution used by validation.
    pub fn try_resolve_alias(&self, ty: TypeId, limit: u32) -> Result<TypeId, StructuralError> {
        let mut seen = FxHashSet::default();
        let mut current = ty;
        let mut hops = 0u32;
        loop {
            let node = self.ty(current);
            let target = match (node.kind, node.supertype) {
                (TypeKind::Alias, Some(target)) => target,
                _ => return Ok(current),
            };
            if !seen.insert(current) {
                return Err(StructuralError::AliasCycle {
                    name: self.ty(ty).name.clone(),
                });
            }
            hops += 1;
            if hops > limit {
                return Err(StructuralError::AliasTooDeep {
                    name: self.ty(ty).name.clone(),
                    limit,
                });
            }
            if !self.contains_type(target) {
                return Err(StructuralError::DanglingType {
                    from: node.name.clone(),
                    id: target.0,
                });
            }
            current = target;
        }
    }

    /// Kind after alias resolution.
    pub fn resolved_kind(&self, ty: TypeId) -> TypeKind {
        self.ty(self.resolve_alias(ty)).kind
    }

    /// The sole authority on "is this Type numeric".
    pub fn is_numeric(&self, ty: Option<TypeId>) -> bool {
        match ty {
            Some(ty) => is_numeric_name(&self.ty(self.resolve_alias(ty)).name),
            None => false,
        }
    }

    pub fn is_nullable(&self, ty: Option<TypeId>) -> bool {
        ty.is_some_and(|ty| self.ty(ty).is_nullable())
    }

    pub fn is_union(&self, ty: Option<TypeId>) -> bool {
        ty.is_some_and(|ty| self.resolved_kind(ty) == TypeKind::Union)
    }

    pub fn is_array(&self, ty: Option<TypeId>) -> bool {
        ty.is_some_and(|ty| self.resolved_kind(ty) == TypeKind::Array)
    }

    pub fn is_sequence(&self, ty: Option<TypeId>) -> bool {
        ty.is_some_and(|ty| self.resolved_kind(ty) == TypeKind::Sequence)
    }

    pub fn is_enum(&self, ty: Option<TypeId>) -> bool {
        ty.is_some_and(|ty| self.resolved_kind(ty) == TypeKind::Enum)
    }

    pub fn is_callback(&self, ty: Option<TypeId>) -> bool {
        ty.is_some_and(|ty| self.resolved_kind(ty).is_callback())
    }

    /// PROMISE anywhere along the supertype chain.
    pub fn is_promise(&self, ty: Option<TypeId>) -> bool {
        let mut current = ty;
        for _ in 0..=MAX_ALIAS_DEPTH {
            let Some(id) = current else {
                return false;
            };
            let node = self.ty(id);
            if node.kind == TypeKind::Promise {
                return true;
            }
            current = node.supertype;
        }
        false
    }

    /// Element type of an ARRAY or SEQUENCE, or the value type of a PROMISE.
    pub fn element_type(&self, ty: Option<TypeId>) -> Option<TypeId> {
        let resolved = self.resolve_alias(ty?);
        let node = self.ty(resolved);
        match node.kind {
            TypeKind::Array | TypeKind::Sequence | TypeKind::Promise => node.supertype,
            _ => None,
        }
    }

    pub fn classify(&self, ty: Option<TypeId>) -> TypeClass {
        let Some(ty) = ty else {
            return TypeClass::Void;
        };
        let resolved = self.resolve_alias(ty);
        let node = self.ty(resolved);
        let base = base_name(&node.name);
        if is_numeric_name(base) {
            return TypeClass::Numeric;
        }
        match base {
            "void" | "undefined" => return TypeClass::Void,
            "any" => return TypeClass::Any,
            "boolean" | "Boolean" => return TypeClass::Boolean,
            _ if STRING_TYPES.contains(&base) => return TypeClass::String,
            _ => {}
        }
        match node.kind {
            TypeKind::Enum => TypeClass::Enum,
            TypeKind::Union => TypeClass::Union,
            TypeKind::Array => TypeClass::Array(node.supertype),
            TypeKind::Sequence => TypeClass::Sequence(node.supertype),
            TypeKind::Promise => TypeClass::Promise(node.supertype),
            TypeKind::CallbackFunction | TypeKind::CallbackInterface => TypeClass::Callback,
            TypeKind::Dictionary => TypeClass::Dictionary,
            TypeKind::Interface | TypeKind::Alias => {
                if self.is_promise(Some(resolved)) {
                    TypeClass::Promise(node.supertype)
                } else {
                    TypeClass::Interface
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/classify_tests.rs"]
mod tests;
