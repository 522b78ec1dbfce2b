//! Interface Type Graph
//!
//! This crate holds the in-memory graph that scanners populate and the merge
//! pipeline rewrites:
//!
//! - **Arena storage**: Types and Operations live in `Model`-owned vectors and
//!   are addressed by `TypeId` / `OperationId`, so cyclic relations (supertype,
//!   implemented-by back-references) are plain id pairs.
//! - **Member sets**: each Type owns Properties, Operations, Constructors and
//!   enum literals; each Operation owns its parameters and an overload table
//!   keyed by signature.
//! - **Registry**: an insertion-ordered name -> canonical Type map, with
//!   built-in primitives synthesized on first request.
//! - **Classifier**: pure, alias-transparent queries (`is_numeric`,
//!   `classify`, ...) shared by the merge logic and by generators.

pub mod classify;
pub mod members;
pub mod model;
mod signature;
pub mod types;

pub use classify::{NUMBER_TYPES, TypeClass, base_name, is_numeric_name, strip_nullable};
pub use members::{MAIN_OPERATION, Modifiers, Operation, OperationId, Parameter, Property, Special};
pub use model::{BUILTIN_TYPES, Library, LibraryId, Model};
pub use types::{Type, TypeId, TypeKind};

pub use idlx_common::{MergeOptions, StructuralError, Warning, WarningKind, WarningLog};
