//! Members of a Type: operations, parameters and properties.

use crate::types::TypeId;
use bitflags::bitflags;
use idlx_common::limits::PARAMETER_INLINE;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Name of the synthetic entry-point operation. Its signature is the name alone.
pub const MAIN_OPERATION: &str = "(main)";

bitflags! {
    /// Modifier flags shared by operations, parameters and properties.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const STATIC = 1 << 0;
        const CONSTANT = 1 << 1;
        const READ_ONLY = 1 << 2;
        const OPTIONAL = 1 << 3;
        const VARIADIC = 1 << 4;
        const CONSTRUCTOR = 1 << 5;
        const STRINGIFIER = 1 << 6;
        const NOT_NULL = 1 << 7;
    }
}

/// Special role of an operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Special {
    /// Indexed or named getter; its key parameter is never merged.
    Getter,
    Setter,
    #[default]
    None,
}

// =============================================================================
// Parameter
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// `None` is the absent/void type.
    pub ty: Option<TypeId>,
    pub modifiers: Modifiers,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            modifiers: Modifiers::empty(),
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.modifiers |= Modifiers::OPTIONAL;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.modifiers |= Modifiers::VARIADIC;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.modifiers.contains(Modifiers::OPTIONAL)
    }

    pub fn is_variadic(&self) -> bool {
        self.modifiers.contains(Modifiers::VARIADIC)
    }
}

// =============================================================================
// Property
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub ty: Option<TypeId>,
    pub modifiers: Modifiers,
    /// Literal initial value, for constants.
    pub initial_value: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            modifiers: Modifiers::empty(),
            initial_value: None,
        }
    }

    pub fn constant(name: impl Into<String>, ty: TypeId, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            modifiers: Modifiers::CONSTANT | Modifiers::STATIC,
            initial_value: Some(value.into()),
        }
    }

    pub fn read_only(mut self) -> Self {
        self.modifiers |= Modifiers::READ_ONLY;
        self
    }

    pub fn is_constant(&self) -> bool {
        self.modifiers.contains(Modifiers::CONSTANT)
    }
}

// =============================================================================
// Operation
// =============================================================================

/// Index of an Operation in its `Model`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(pub u32);

impl OperationId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct Operation {
    pub name: String,
    pub modifiers: Modifiers,
    /// `None` is `void`.
    pub return_type: Option<TypeId>,
    pub parameters: SmallVec<[Parameter; PARAMETER_INLINE]>,
    pub special: Special,
    /// Signature-distinct variants sharing this operation's name.
    /// Never contains this operation's own signature.
    pub overloads: BTreeMap<String, OperationId>,
    /// Body text of synthetic operations.
    pub body: Option<String>,
}

impl Operation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::empty(),
            return_type: None,
            parameters: SmallVec::new(),
            special: Special::None,
            overloads: BTreeMap::new(),
            body: None,
        }
    }

    /// The synthetic entry point.
    pub fn main() -> Self {
        Self::new(MAIN_OPERATION)
    }

    pub fn returning(mut self, ty: TypeId) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn with_special(mut self, special: Special) -> Self {
        self.special = special;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn is_main(&self) -> bool {
        self.name == MAIN_OPERATION
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_constructor(&self) -> bool {
        self.modifiers.contains(Modifiers::CONSTRUCTOR)
    }

    pub fn parameter(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    /// Copy of this operation without its overload table.
    pub fn detached(&self) -> Self {
        Self {
            overloads: BTreeMap::new(),
            ..self.clone()
        }
    }
}
