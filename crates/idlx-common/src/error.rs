//! Fatal errors.
//!
//! A `StructuralError` means the graph is corrupted and the batch must abort:
//! a half-merged or half-decomposed graph is never handed to a generator.

use thiserror::Error;

/// Structural invariant violations that abort a merge batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A scanner produced a Type without a name.
    #[error("type #{id} has an empty name")]
    EmptyTypeName { id: u32 },

    /// A scanner produced an Operation without a name.
    #[error("operation #{id} on type `{type_name}` has an empty name")]
    EmptyOperationName { type_name: String, id: u32 },

    /// A Type id points outside the arena.
    #[error("dangling type reference #{id} from `{from}`")]
    DanglingType { from: String, id: u32 },

    /// An ALIAS chain loops back onto itself.
    #[error("alias chain starting at `{name}` is cyclic")]
    AliasCycle { name: String },

    /// An ALIAS chain is longer than the configured limit.
    #[error("alias chain starting at `{name}` exceeds {limit} hops")]
    AliasTooDeep { name: String, limit: u32 },

    /// A UNION contains itself, directly or through nested unions.
    #[error("union `{name}` contains itself or nests deeper than {limit} levels")]
    UnionCycle { name: String, limit: u32 },

    /// More than one union parameter on one operation while `strict_unions` is set.
    #[error("operation `{signature}` on `{type_name}` has {count} union-typed parameters")]
    AmbiguousUnion {
        type_name: String,
        signature: String,
        count: usize,
    },

    /// Decomposition of one operation group did not converge.
    #[error("decomposing `{operation}` on `{type_name}` exceeded {limit} expansions")]
    DecompositionLimit {
        type_name: String,
        operation: String,
        limit: u32,
    },

    /// A postcondition failed when freezing the graph.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}
