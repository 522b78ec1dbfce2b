//! idlx: merge interface definition libraries into one canonical type graph.
//!
//! Scanners (one per source format) populate a `Model` with one `Library`
//! per source. `Pipeline::run` then merges same-named Types across libraries,
//! folds operations into overload tables, expands union-typed parameters into
//! concrete overloads and hands back a read-only `FrozenModel` for the
//! language generators, together with the warnings collected on the way.
//!
//! ```ignore
//! let mut model = Model::new();
//! let dom = model.add_library("DOM");
//! let window = model.declare_type(dom, "Window", TypeKind::Interface);
//! let url = model.reference("DOMString");
//! model.add_operation(window, Operation::new("open").with_param(Parameter::new("url", url)));
//!
//! let output = Pipeline::new(MergeOptions::default()).run(model)?;
//! for ty in output.model.renderable_types() {
//!     // emit bindings
//! }
//! ```

// Common types: limits, options, errors and warnings
pub use idlx_common::{
    MergeOptions, StructuralError, Warning, WarningKind, WarningLog, limits,
};

// Type graph
pub use idlx_model::{
    BUILTIN_TYPES, Library, LibraryId, MAIN_OPERATION, Model, Modifiers, NUMBER_TYPES, Operation,
    OperationId, Parameter, Property, Special, Type, TypeClass, TypeId, TypeKind, base_name,
    is_numeric_name, strip_nullable,
};

// Merge and decomposition passes
pub use idlx_merge::{
    DecompositionStats, FrozenModel, MergeContext, MergeStats, Pipeline, PipelineOutput,
    decompose_unions, merge_libraries, validate,
};

// Tracing setup for embedding binaries
pub mod tracing_config;
pub use tracing_config::init_tracing;
