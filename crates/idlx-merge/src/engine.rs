//! Library merge.
//!
//! Walks libraries in registration order and elects the first declaration
//! of each Type name as canonical. Every other declaration of that name is
//! folded into the canonical one. References are rewritten to canonical ids
//! before anything is folded, so operation signatures and parameter
//! identity checks always compare canonical Types.

use crate::context::MergeContext;
use crate::overload::fold_operation;
use idlx_common::{StructuralError, Warning, WarningKind};
use idlx_model::{LibraryId, Model, OperationId, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, debug_span};

/// Counters reported by `merge_libraries`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// Declarations elected as canonical.
    pub canonical_types: usize,
    /// Declarations folded into an existing canonical Type.
    pub folded_types: usize,
    /// Placeholder references bound to a declaration.
    pub resolved_references: usize,
    /// Placeholder references no library declared.
    pub unresolved_references: usize,
}

/// Merge every library of `model` into one canonical Type per name.
pub fn merge_libraries(
    model: &mut Model,
    cx: &mut MergeContext,
) -> Result<MergeStats, StructuralError> {
    let _span = debug_span!("merge_libraries", libraries = model.libraries().len()).entered();
    let mut stats = MergeStats::default();

    // Election. A node listed by several libraries is handled once.
    let mut seen: FxHashSet<TypeId> = FxHashSet::default();
    let mut elected: Vec<TypeId> = Vec::new();
    let mut duplicates: Vec<(TypeId, TypeId)> = Vec::new();
    for library in 0..model.libraries().len() {
        let types = model.library(LibraryId(library as u32)).types.clone();
        for ty in types {
            if !seen.insert(ty) {
                continue;
            }
            match model.register(ty) {
                None => elected.push(ty),
                Some(canonical) if canonical == ty => {}
                Some(canonical) => duplicates.push((ty, canonical)),
            }
        }
    }
    stats.canonical_types = elected.len();
    stats.folded_types = duplicates.len();

    let mut remap: FxHashMap<TypeId, TypeId> = duplicates.iter().copied().collect();
    for placeholder in model.placeholders() {
        let name = model.ty(placeholder).name.clone();
        match model.lookup(&name) {
            Some(canonical) if canonical != placeholder => {
                remap.insert(placeholder, canonical);
                stats.resolved_references += 1;
            }
            Some(_) => {}
            None => {
                model.register(placeholder);
                stats.unresolved_references += 1;
                cx.warn(Warning::new(
                    WarningKind::UnresolvedReference,
                    name,
                    "referenced but never declared; kept as an empty interface",
                ));
            }
        }
    }

    canonicalize_references(model, &remap);

    for &ty in &elected {
        normalize_operations(model, cx, ty);
    }
    for (ty, canonical) in duplicates {
        fold_type(model, cx, ty, canonical);
    }

    debug!(
        canonical = stats.canonical_types,
        folded = stats.folded_types,
        unresolved = stats.unresolved_references,
        "merge_libraries finished"
    );
    Ok(stats)
}

/// Point every Type reference in the graph at its canonical Type.
fn canonicalize_references(model: &mut Model, remap: &FxHashMap<TypeId, TypeId>) {
    if remap.is_empty() {
        return;
    }
    let canonical = |id: TypeId| remap.get(&id).copied().unwrap_or(id);

    for id in model.type_ids().collect::<Vec<_>>() {
        let ty = model.ty_mut(id);
        ty.supertype = ty.supertype.map(canonical);
        ty.types = dedup(ty.types.iter().copied().map(canonical));
        ty.implemented_by = dedup(
            ty.implemented_by
                .iter()
                .copied()
                .map(canonical)
                .filter(|&implementor| implementor != id),
        );
        for property in &mut ty.properties {
            property.ty = property.ty.map(canonical);
        }
    }

    for index in 0..model.operation_count() {
        let op = model.operation_mut(OperationId(index as u32));
        op.return_type = op.return_type.map(canonical);
        for param in &mut op.parameters {
            param.ty = param.ty.map(canonical);
        }
    }
}

fn dedup(ids: impl Iterator<Item = TypeId>) -> Vec<TypeId> {
    let mut seen = FxHashSet::default();
    ids.filter(|id| seen.insert(*id)).collect()
}

/// Fold same-named own operations of a freshly elected canonical Type.
fn normalize_operations(model: &mut Model, cx: &mut MergeContext, ty: TypeId) {
    let declared = std::mem::take(&mut model.ty_mut(ty).operations);
    for op in declared {
        fold_operation(model, cx, ty, op);
    }
}

/// Fold the members of `source` into `target`.
fn fold_type(model: &mut Model, cx: &mut MergeContext, source: TypeId, target: TypeId) {
    let (source_kind, target_kind) = (model.ty(source).kind, model.ty(target).kind);
    let target_name = model.ty(target).name.clone();
    debug!(name = %target_name, from = source.0, into = target.0, "fold_type");

    if source_kind != target_kind {
        let library = model
            .ty(source)
            .library
            .map(|lib| model.library(lib).name.clone())
            .unwrap_or_default();
        cx.warn(Warning::new(
            WarningKind::KindMismatch,
            target_name.clone(),
            format!("declared as {source_kind:?} in `{library}`, keeping {target_kind:?}"),
        ));
    }

    let source_ty = model.ty_mut(source);
    let properties = std::mem::take(&mut source_ty.properties);
    let operations = std::mem::take(&mut source_ty.operations);
    let constructors = std::mem::take(&mut source_ty.constructors);
    let members = source_ty.types.clone();
    let implementors = source_ty.implemented_by.clone();
    let literals: Vec<String> = source_ty.enum_literals.iter().cloned().collect();
    let supertype = source_ty.supertype;

    for property in properties {
        if cx.options.warn_duplicate_properties && model.ty(target).property(&property.name).is_some()
        {
            cx.warn(
                Warning::new(
                    WarningKind::DuplicateProperty,
                    target_name.clone(),
                    "declared by more than one library",
                )
                .with_member(property.name.clone()),
            );
        }
        model.ty_mut(target).properties.push(property);
    }

    for op in operations {
        fold_operation(model, cx, target, op);
    }

    let target_ty = model.ty_mut(target);
    for member in members {
        if member != target {
            target_ty.add_type(member);
        }
    }
    for implementor in implementors {
        if implementor != target {
            target_ty.add_implemented_by(implementor);
        }
    }
    for literal in literals {
        target_ty.add_enum_literal(literal);
    }
    target_ty.constructors.extend(constructors);
    if target_ty.supertype.is_none() && supertype != Some(target) {
        target_ty.supertype = supertype;
    }
}

#[cfg(test)]
#[path = "../tests/engine_tests.rs"]
mod tests;
