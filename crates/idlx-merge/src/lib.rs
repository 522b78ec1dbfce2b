//! Merge-and-normalize core.
//!
//! Passes run strictly in sequence over one `Model`:
//!
//! 1. `validate`: reject structurally corrupted input
//! 2. `merge_libraries`: one canonical Type per name, members folded in
//!    library registration order, operations folded through the overload table
//! 3. `validate` again: merge can close alias cycles across sources
//! 4. `decompose_unions`: union-typed parameters become concrete overloads
//! 5. `FrozenModel::freeze`: postconditions re-checked, graph becomes read-only
//!
//! `Pipeline::run` performs all five and never hands out a partially
//! processed graph.

mod context;
pub mod decompose;
pub mod engine;
pub mod freeze;
pub mod overload;
pub mod pipeline;
pub mod validate;

pub use context::MergeContext;
pub use decompose::{DecompositionStats, decompose_unions};
pub use engine::{MergeStats, merge_libraries};
pub use freeze::FrozenModel;
pub use overload::{ParameterMerge, fold_operation, merge_operation, merge_parameter};
pub use pipeline::{Pipeline, PipelineOutput};
pub use validate::validate;

#[cfg(test)]
#[path = "../tests/common.rs"]
mod common;
