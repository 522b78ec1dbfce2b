//! Centralized limits and thresholds for the merge pipeline.
//!
//! Every bound that keeps a pass from running forever on a corrupted graph
//! lives here, so validation, the classifier and the decomposition pass agree
//! on the same numbers. `MergeOptions` defaults to these values; embedders can
//! tighten them per run.

// =============================================================================
// Alias Resolution
// =============================================================================

/// Maximum number of ALIAS hops followed when resolving a Type.
///
/// Interface definitions chain typedefs, but real-world chains are short:
///
/// ```text
/// typedef unsigned long  GLenum;
/// typedef GLenum         GLenumAlias;
/// ```
///
/// A chain longer than this is treated as non-terminating. Validation reports
/// it as `StructuralError::AliasTooDeep`; the infallible classifier stops at
/// the last Type it reached.
pub const MAX_ALIAS_DEPTH: u32 = 64;

// =============================================================================
// Union Decomposition
// =============================================================================

/// Maximum nesting depth of union member types.
///
/// ```text
/// typedef (ArrayBuffer or ArrayBufferView) BufferSource;
/// typedef (BufferSource or Blob or USVString) BlobPart;
/// ```
///
/// `BlobPart` nests one union inside another. Validation walks union members
/// recursively and rejects anything deeper than this bound, which also catches
/// unions that contain themselves.
pub const MAX_UNION_NESTING: u32 = 32;

/// Maximum number of union expansions performed for one operation group.
///
/// An operation with `k` union parameters of `n` members each expands into
/// `n^k` variants; this caps the total work for a single name on one Type.
/// Exceeding it aborts the batch with `StructuralError::DecompositionLimit`.
pub const MAX_DECOMPOSITION_STEPS: u32 = 10_000;

// =============================================================================
// Capacity Hints
// =============================================================================

/// Inline capacity for operation parameter lists.
///
/// Most interface operations take four parameters or fewer.
pub const PARAMETER_INLINE: usize = 4;
