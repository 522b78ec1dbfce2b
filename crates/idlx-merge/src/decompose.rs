//! Union decomposition.
//!
//! Replaces every operation variant that takes a union-typed parameter with
//! one synthetic variant per union member. Synthetic variants are folded
//! back through the overload table, so a member that matches an existing
//! overload merges with it instead of duplicating it. Expansion repeats
//! until no variant of the group has a union parameter left.
//!
//! Only the first union parameter of a variant is expanded per step; the
//! synthesized variants still carry the remaining unions and are expanded
//! in later steps. A variant that starts out with several union parameters
//! is reported once as `AmbiguousUnion`, or rejected under `strict_unions`.
//!
//! Union return types have no overload equivalent and are widened to `any`.

use crate::context::MergeContext;
use crate::overload::{fold_operation, merge_operation};
use idlx_common::{StructuralError, Warning, WarningKind};
use idlx_model::{Model, OperationId, TypeId};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, debug_span, trace};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecompositionStats {
    /// Union-bearing variants replaced by their expansions.
    pub variants_expanded: usize,
    /// Synthetic variants produced, before folding.
    pub variants_synthesized: usize,
    /// Union return types widened to `any`.
    pub returns_widened: usize,
    /// Union-bearing constructors replaced by their expansions.
    pub constructors_expanded: usize,
}

impl DecompositionStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Expand every union-typed parameter of every canonical Type.
///
/// Running the pass on its own output changes nothing.
pub fn decompose_unions(
    model: &mut Model,
    cx: &mut MergeContext,
) -> Result<DecompositionStats, StructuralError> {
    let _span = debug_span!("decompose_unions").entered();
    let mut stats = DecompositionStats::default();

    let owners: Vec<TypeId> = model.canonical_types().collect();
    for owner in owners {
        let names: Vec<String> = model
            .ty(owner)
            .operations
            .iter()
            .map(|&op| model.operation(op).name.clone())
            .collect();
        for name in names {
            decompose_group(model, cx, owner, &name, &mut stats)?;
        }
        decompose_constructors(model, cx, owner, &mut stats)?;
    }

    debug!(
        expanded = stats.variants_expanded,
        synthesized = stats.variants_synthesized,
        returns_widened = stats.returns_widened,
        constructors = stats.constructors_expanded,
        "decompose_unions finished"
    );
    Ok(stats)
}

/// Indices of union-typed parameters, alias-aware.
fn union_parameters(model: &Model, op: OperationId) -> SmallVec<[usize; 2]> {
    model
        .operation(op)
        .parameters
        .iter()
        .enumerate()
        .filter(|(_, param)| model.is_union(param.ty))
        .map(|(i, _)| i)
        .collect()
}

fn widen_union_return(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    op: OperationId,
    stats: &mut DecompositionStats,
) {
    if !model.is_union(model.operation(op).return_type) {
        return;
    }
    let any = model.any_type();
    model.operation_mut(op).return_type = Some(any);
    stats.returns_widened += 1;
    let signature = model.signature(op);
    cx.warn(
        Warning::new(
            WarningKind::UnionReturnWidened,
            model.ty(owner).name.clone(),
            "union return type widened to any",
        )
        .with_member(signature),
    );
}

/// Report, or reject under `strict_unions`, a variant with several union parameters.
fn check_ambiguity(
    model: &Model,
    cx: &mut MergeContext,
    owner: TypeId,
    op: OperationId,
    unions: usize,
) -> Result<(), StructuralError> {
    if unions < 2 {
        return Ok(());
    }
    let type_name = model.ty(owner).name.clone();
    let signature = model.signature(op);
    if cx.options.strict_unions {
        return Err(StructuralError::AmbiguousUnion {
            type_name,
            signature,
            count: unions,
        });
    }
    cx.warn(
        Warning::new(
            WarningKind::AmbiguousUnion,
            type_name,
            format!("{unions} union-typed parameters, expanding them one at a time"),
        )
        .with_member(signature),
    );
    Ok(())
}

/// One synthetic Operation per member of the union at `index`.
///
/// A union without members yields a single variant taking `any`.
fn synthesize(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    op: OperationId,
    index: usize,
    stats: &mut DecompositionStats,
) -> Vec<OperationId> {
    let template = model.operation(op).detached();
    let union = template.parameters[index].ty.map(|ty| model.resolve_alias(ty));
    let mut members: Vec<TypeId> = union.map(|u| model.ty(u).types.clone()).unwrap_or_default();
    if members.is_empty() {
        cx.warn(
            Warning::new(
                WarningKind::EmptyUnion,
                model.ty(owner).name.clone(),
                format!(
                    "parameter `{}` has an empty union type, widened to any",
                    template.parameters[index].name
                ),
            )
            .with_member(model.signature(op)),
        );
        members.push(model.any_type());
    }

    trace!(op = %template.name, index, members = members.len(), "synthesize");
    stats.variants_synthesized += members.len();
    members
        .into_iter()
        .map(|member| {
            let mut variant = template.clone();
            variant.parameters[index].ty = Some(member);
            model.alloc_operation(variant)
        })
        .collect()
}

fn decompose_group(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    name: &str,
    stats: &mut DecompositionStats,
) -> Result<(), StructuralError> {
    let mut steps = 0u32;
    let mut synthetic: FxHashSet<OperationId> = FxHashSet::default();
    loop {
        let Some(head) = model.find_operation(owner, name) else {
            return Ok(());
        };
        let variants = model.variants(head);
        for &variant in &variants {
            widen_union_return(model, cx, owner, variant, stats);
        }

        let Some((variant, unions)) = variants.iter().find_map(|&variant| {
            let unions = union_parameters(model, variant);
            (!unions.is_empty()).then_some((variant, unions))
        }) else {
            return Ok(());
        };

        steps += 1;
        if steps > cx.options.max_decomposition_steps {
            return Err(StructuralError::DecompositionLimit {
                type_name: model.ty(owner).name.clone(),
                operation: name.to_string(),
                limit: cx.options.max_decomposition_steps,
            });
        }
        if !synthetic.contains(&variant) {
            check_ambiguity(model, cx, owner, variant, unions.len())?;
        }

        let replacements = synthesize(model, cx, owner, variant, unions[0], stats);
        synthetic.extend(replacements.iter().copied());
        replace_variant(model, cx, owner, head, variant, replacements);
        stats.variants_expanded += 1;
    }
}

/// Remove `variant` from the group headed by `head` and fold `replacements` in.
///
/// When the head itself is replaced, its first replacement takes over the
/// head's slot and overload table.
fn replace_variant(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    head: OperationId,
    variant: OperationId,
    replacements: Vec<OperationId>,
) {
    if variant != head {
        model
            .operation_mut(head)
            .overloads
            .retain(|_, entry| *entry != variant);
        for replacement in replacements {
            fold_operation(model, cx, owner, replacement);
        }
        return;
    }

    let table = std::mem::take(&mut model.operation_mut(head).overloads);
    let mut replacements = replacements.into_iter();
    let Some(new_head) = replacements.next().or_else(|| table.values().next().copied()) else {
        model.ty_mut(owner).operations.retain(|&op| op != head);
        return;
    };
    if let Some(slot) = model.ty(owner).operations.iter().position(|&op| op == head) {
        model.ty_mut(owner).operations[slot] = new_head;
    }
    for entry in table.into_values() {
        merge_operation(model, cx, owner, new_head, entry);
    }
    for replacement in replacements {
        fold_operation(model, cx, owner, replacement);
    }
}

fn decompose_constructors(
    model: &mut Model,
    cx: &mut MergeContext,
    owner: TypeId,
    stats: &mut DecompositionStats,
) -> Result<(), StructuralError> {
    let mut steps = 0u32;
    let mut synthetic: FxHashSet<OperationId> = FxHashSet::default();
    let mut index = 0;
    while index < model.ty(owner).constructors.len() {
        let ctor = model.ty(owner).constructors[index];
        widen_union_return(model, cx, owner, ctor, stats);
        let unions = union_parameters(model, ctor);
        if unions.is_empty() {
            index += 1;
            continue;
        }

        steps += 1;
        if steps > cx.options.max_decomposition_steps {
            return Err(StructuralError::DecompositionLimit {
                type_name: model.ty(owner).name.clone(),
                operation: model.signature(ctor),
                limit: cx.options.max_decomposition_steps,
            });
        }
        if !synthetic.contains(&ctor) {
            check_ambiguity(model, cx, owner, ctor, unions.len())?;
        }

        let mut known: FxHashSet<String> = model
            .ty(owner)
            .constructors
            .iter()
            .filter(|&&other| other != ctor)
            .map(|&other| model.signature(other))
            .collect();
        let replacements: Vec<OperationId> = synthesize(model, cx, owner, ctor, unions[0], stats)
            .into_iter()
            .filter(|&replacement| known.insert(model.signature(replacement)))
            .collect();
        synthetic.extend(replacements.iter().copied());
        let constructors = &mut model.ty_mut(owner).constructors;
        constructors.remove(index);
        for (offset, replacement) in replacements.into_iter().enumerate() {
            constructors.insert(index + offset, replacement);
        }
        stats.constructors_expanded += 1;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/decompose_tests.rs"]
mod tests;
