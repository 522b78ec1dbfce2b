//! Operation merge.
//!
//! Every named operation of a canonical Type is represented by one head
//! Operation plus an overload table keyed by signature. The head's own
//! signature never appears in its table, and every table key equals the
//! current signature of the Operation stored under it.
//!
//! Folding an Operation into a Type either starts a new group, merges its
//! parameters into the variant with the same signature, or inserts it into
//! the head's table as a distinct overload.

use crate::context::MergeContext;
use idlx_common::limits::PARAMETER_INLINE;
use idlx_common::{Warning, WarningKind};
use idlx_model::{Model, Modifiers, OperationId, Parameter, Special, TypeId};
use smallvec::SmallVec;
use tracing::trace;

/// Result of merging two parameters at the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMerge {
    pub parameter: Parameter,
    /// The two sides had different Types and the result was widened to `any`.
    pub widened: bool,
}

/// Merge the parameters found at one position of two same-signature variants.
///
/// - one side absent: the present side, made OPTIONAL
/// - names: kept when one contains the other, otherwise `first_second`
/// - modifiers: union of both sides
/// - Types: kept when identical, otherwise `any`
pub fn merge_parameter(
    existing: Option<&Parameter>,
    incoming: Option<&Parameter>,
    any: TypeId,
) -> Option<ParameterMerge> {
    let (existing, incoming) = match (existing, incoming) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => {
            let mut parameter = only.clone();
            parameter.modifiers |= Modifiers::OPTIONAL;
            return Some(ParameterMerge {
                parameter,
                widened: false,
            });
        }
        (Some(existing), Some(incoming)) => (existing, incoming),
    };

    let name = if existing.name.contains(incoming.name.as_str())
        || incoming.name.contains(existing.name.as_str())
    {
        existing.name.clone()
    } else {
        format!("{}_{}", existing.name, incoming.name)
    };
    let widened = existing.ty != incoming.ty;
    let ty = if widened { Some(any) } else { existing.ty };

    Some(ParameterMerge {
        parameter: Parameter {
            name,
            ty,
            modifiers: existing.modifiers | incoming.modifiers,
        },
        widened,
    })
}

/// Fold `op` into the operation set of `owner`.
pub fn fold_operation(model: &mut Model, cx: &mut MergeContext, owner: TypeId, op: OperationId) {
    let name = model.operation(op).name.clone();
    match model.find_operation(owner, &name) {
        Some(head) => merge_operation(model, cx, owner, head, op),
        None => {
            trace!(owner = %model.ty(owner).name, op = %name, "new operation group");
            model.ty_mut(owner).operations.push(op);
            let nested = std::mem::take(&mut model.operation_mut(op).overloads);
            for variant in nested.into_values() {
                register_variant(model, cx, owner, op, variant);
            }
        }
    }
}

/// Merge `other` (and its own overload table) into the group headed by `head`.
pub fn merge_operation(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    head: OperationId,
    other: OperationId,
) {
    if head == other {
        return;
    }
    let nested = std::mem::take(&mut model.operation_mut(other).overloads);
    register_variant(model, cx, owner, head, other);
    for variant in nested.into_values() {
        register_variant(model, cx, owner, head, variant);
    }
}

fn register_variant(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    head: OperationId,
    variant: OperationId,
) {
    if head == variant {
        return;
    }
    let signature = model.signature(variant);
    let target = if model.signature(head) == signature {
        Some(head)
    } else {
        model.operation(head).overloads.get(&signature).copied()
    };

    let Some(target) = target else {
        trace!(signature = %signature, "new overload");
        model.operation_mut(head).overloads.insert(signature, variant);
        return;
    };
    if target == variant {
        return;
    }
    if model.operation(target).special == Special::Getter {
        trace!(signature = %signature, "getter keeps its parameters");
        return;
    }

    merge_parameter_lists(model, cx, owner, target, variant);
    resettle(model, cx, owner, head, target, &signature);
}

/// Restore the table invariants after `target`'s signature may have changed.
fn resettle(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    head: OperationId,
    target: OperationId,
    old_signature: &str,
) {
    let signature = model.signature(target);
    if signature == old_signature {
        return;
    }
    trace!(from = %old_signature, to = %signature, "re-keying widened variant");
    if target == head {
        let collided = model.operation_mut(head).overloads.remove(&signature);
        if let Some(entry) = collided {
            register_variant(model, cx, owner, head, entry);
        }
    } else {
        model.operation_mut(head).overloads.remove(old_signature);
        register_variant(model, cx, owner, head, target);
    }
}

fn merge_parameter_lists(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    target: OperationId,
    other: OperationId,
) {
    let any = model.any_type();
    let left = model.operation(target).parameters.clone();
    let right = model.operation(other).parameters.clone();
    let len = left.len().max(right.len());

    let mut merged: SmallVec<[Parameter; PARAMETER_INLINE]> = SmallVec::with_capacity(len);
    let mut widened = Vec::new();
    for i in 0..len {
        if let Some(result) = merge_parameter(left.get(i), right.get(i), any) {
            if result.widened {
                widened.push(result.parameter.name.clone());
            }
            merged.push(result.parameter);
        }
    }

    let signature = model.signature(target);
    let type_name = model.ty(owner).name.clone();
    for name in widened {
        cx.warn(
            Warning::new(
                WarningKind::ParameterWidened,
                type_name.clone(),
                format!("parameter `{name}` declared with different types, widened to any"),
            )
            .with_member(signature.clone()),
        );
    }

    model.operation_mut(target).parameters = merged;
}

#[cfg(test)]
#[path = "../tests/overload_tests.rs"]
mod tests;
