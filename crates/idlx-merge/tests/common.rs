//! Builders shared by the unit tests of this crate.

use crate::context::MergeContext;
use idlx_common::MergeOptions;
use idlx_model::{LibraryId, Model, Operation, OperationId, Parameter, TypeId, TypeKind};

pub(crate) fn context() -> MergeContext {
    MergeContext::new(MergeOptions::default())
}

/// An operation taking `(name, type)` parameters in order.
pub(crate) fn op(name: &str, params: &[(&str, TypeId)]) -> Operation {
    params
        .iter()
        .fold(Operation::new(name), |op, &(param, ty)| op.with_param(Parameter::new(param, ty)))
}

pub(crate) fn union_of(model: &mut Model, lib: LibraryId, name: &str, members: &[TypeId]) -> TypeId {
    let union = model.declare_type(lib, name, TypeKind::Union);
    for &member in members {
        model.add_member_type(union, member);
    }
    union
}

/// Signatures of every variant of every operation group of `ty`, sorted.
pub(crate) fn signatures(model: &Model, ty: TypeId) -> Vec<String> {
    let mut out: Vec<String> = model
        .ty(ty)
        .operations
        .iter()
        .flat_map(|&head| model.variants(head))
        .map(|op| model.signature(op))
        .collect();
    out.sort();
    out
}

pub(crate) fn constructor_signatures(model: &Model, ty: TypeId) -> Vec<String> {
    model
        .ty(ty)
        .constructors
        .iter()
        .map(|&op: &OperationId| model.signature(op))
        .collect()
}
