//! Read-only view handed to generators.

use idlx_common::StructuralError;
use idlx_model::{Model, OperationId, Type, TypeId};
use rustc_hash::FxHashSet;
use std::ops::Deref;

/// A merged and decomposed `Model` that can no longer be mutated.
///
/// Construction re-checks the postconditions of merge and decomposition, so
/// holding a `FrozenModel` is proof that:
/// - every registered name maps to exactly one Type
/// - within a Type, operation names are unique and every variant signature
///   is unique
/// - every overload table key is the signature of the entry stored under it
/// - no operation variant or constructor takes or returns a union
#[derive(Debug, Clone)]
pub struct FrozenModel {
    model: Model,
}

impl FrozenModel {
    pub fn freeze(model: Model) -> Result<Self, StructuralError> {
        check_postconditions(&model)?;
        Ok(Self { model })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Give the graph back for another round of edits.
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Canonical Types in registration order.
    pub fn types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.model.canonical_types()
    }

    /// Canonical Types a generator emits; aliases and sequences are inlined.
    pub fn renderable_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types()
            .filter(|&ty| self.model.ty(ty).kind.is_renderable())
    }

    pub fn type_named(&self, name: &str) -> Option<&Type> {
        self.model.lookup(name).map(|id| self.model.ty(id))
    }

    /// All operation variants of `ty`, group by group, without repeated signatures.
    pub fn operation_variants(&self, ty: TypeId) -> Vec<OperationId> {
        let mut seen = FxHashSet::default();
        self.model
            .ty(ty)
            .operations
            .iter()
            .flat_map(|&head| self.model.variants(head))
            .filter(|&op| seen.insert(self.model.signature(op)))
            .collect()
    }
}

impl Deref for FrozenModel {
    type Target = Model;

    fn deref(&self) -> &Model {
        &self.model
    }
}

fn violated(message: String) -> StructuralError {
    StructuralError::InvariantViolated(message)
}

fn check_postconditions(model: &Model) -> Result<(), StructuralError> {
    for id in model.canonical_types() {
        let ty = model.ty(id);
        if !model.is_canonical(id) {
            return Err(violated(format!("`{}` is registered under another name", ty.name)));
        }

        let mut names = FxHashSet::default();
        let mut signatures = FxHashSet::default();
        for &head in &ty.operations {
            let op = model.operation(head);
            if !names.insert(op.name.as_str()) {
                return Err(violated(format!("`{}.{}` has two heads", ty.name, op.name)));
            }
            let head_signature = model.signature(head);
            if op.overloads.contains_key(&head_signature) {
                return Err(violated(format!(
                    "`{}.{head_signature}` is in its own overload table",
                    ty.name
                )));
            }
            for (key, &entry) in &op.overloads {
                let actual = model.signature(entry);
                if *key != actual {
                    return Err(violated(format!(
                        "`{}` overload keyed `{key}` has signature `{actual}`",
                        ty.name
                    )));
                }
            }
            for variant in model.variants(head) {
                let signature = model.signature(variant);
                check_union_free(model, &ty.name, variant, &signature)?;
                if !signatures.insert(signature) {
                    return Err(violated(format!(
                        "`{}` has two variants with one signature",
                        ty.name
                    )));
                }
            }
        }

        for &ctor in &ty.constructors {
            check_union_free(model, &ty.name, ctor, &model.signature(ctor))?;
        }
    }
    Ok(())
}

fn check_union_free(
    model: &Model,
    type_name: &str,
    op: OperationId,
    signature: &str,
) -> Result<(), StructuralError> {
    let op = model.operation(op);
    if model.is_union(op.return_type) || op.parameters.iter().any(|p| model.is_union(p.ty)) {
        return Err(violated(format!(
            "`{type_name}.{signature}` still refers to a union"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/freeze_tests.rs"]
mod tests;
