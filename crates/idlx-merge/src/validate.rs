//! Structural validation.
//!
//! Runs before merge and again before decomposition. Every check here guards
//! a later pass against a graph it cannot process: dangling ids would panic,
//! alias and union cycles would never terminate.

use idlx_common::limits::MAX_UNION_NESTING;
use idlx_common::{MergeOptions, StructuralError};
use idlx_model::{Model, OperationId, TypeId, TypeKind};
use tracing::trace;

pub fn validate(model: &Model, options: &MergeOptions) -> Result<(), StructuralError> {
    let ids: Vec<TypeId> = model.type_ids().collect();
    for &id in &ids {
        check_references(model, id)?;
    }
    for &id in &ids {
        match model.ty(id).kind {
            TypeKind::Alias => {
                model.try_resolve_alias(id, options.alias_depth())?;
            }
            TypeKind::Union => {
                let mut path = Vec::new();
                check_union(model, id, id, &mut path)?;
            }
            _ => {}
        }
    }
    trace!(types = ids.len(), "validate ok");
    Ok(())
}

fn check_references(model: &Model, id: TypeId) -> Result<(), StructuralError> {
    let ty = model.ty(id);
    if ty.name.is_empty() {
        return Err(StructuralError::EmptyTypeName { id: id.0 });
    }
    let dangling = |target: TypeId| StructuralError::DanglingType {
        from: ty.name.clone(),
        id: target.0,
    };
    let check = |target: Option<TypeId>| match target {
        Some(target) if !model.contains_type(target) => Err(dangling(target)),
        _ => Ok(()),
    };

    check(ty.supertype)?;
    for &member in ty.types.iter().chain(&ty.implemented_by) {
        check(Some(member))?;
    }
    for property in &ty.properties {
        check(property.ty)?;
    }
    for &op_id in ty.operations.iter().chain(&ty.constructors) {
        for variant in variants(model, op_id) {
            let op = model.operation(variant);
            if op.name.is_empty() && !op.is_constructor() {
                return Err(StructuralError::EmptyOperationName {
                    type_name: ty.name.clone(),
                    id: variant.0,
                });
            }
            check(op.return_type)?;
            for param in &op.parameters {
                check(param.ty)?;
            }
        }
    }
    Ok(())
}

fn variants(model: &Model, head: OperationId) -> Vec<OperationId> {
    if head.index() < model.operation_count() {
        model.variants(head)
    } else {
        Vec::new()
    }
}

fn check_union(
    model: &Model,
    root: TypeId,
    union: TypeId,
    path: &mut Vec<TypeId>,
) -> Result<(), StructuralError> {
    if path.contains(&union) || path.len() as u32 >= MAX_UNION_NESTING {
        return Err(StructuralError::UnionCycle {
            name: model.ty(root).name.clone(),
            limit: MAX_UNION_NESTING,
        });
    }
    path.push(union);
    for &member in &model.ty(union).types {
        let resolved = model.resolve_alias(member);
        if model.ty(resolved).kind == TypeKind::Union {
            check_union(model, root, resolved, path)?;
        }
    }
    path.pop();
    Ok(())
}

#[cfg(test)]
#[path = "../tests/validate_tests.rs"]
mod tests;
